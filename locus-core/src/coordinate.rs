//! Parsing and validation of WGS84 coordinates.
//!
//! Coordinates are `geo::Coord<f64>` values with `x = longitude` and
//! `y = latitude`. Inbound requests carry positions as `"lat,lng"` text, so
//! the parser swaps the order while building the coordinate.

use geo::Coord;
use thiserror::Error;

/// Errors raised while parsing or validating a coordinate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// The text did not contain exactly two comma-separated parts.
    #[error("expected \"lat,lng\" but found {input:?}")]
    Malformed {
        /// Text supplied by the caller.
        input: String,
    },
    /// One of the parts was not a number.
    #[error("{axis} {raw:?} is not a number")]
    NotANumber {
        /// Axis that failed to parse.
        axis: &'static str,
        /// Raw text of the offending part.
        raw: String,
    },
    /// Latitude outside `[-90, 90]` or not finite.
    #[error("latitude {value} is outside [-90, 90]")]
    LatitudeOutOfRange {
        /// Offending latitude.
        value: f64,
    },
    /// Longitude outside `[-180, 180]` or not finite.
    #[error("longitude {value} is outside [-180, 180]")]
    LongitudeOutOfRange {
        /// Offending longitude.
        value: f64,
    },
}

/// Parse a `"lat,lng"` pair into a validated coordinate.
///
/// Whitespace around either part is ignored.
///
/// # Examples
/// ```
/// use locus_core::parse_lat_lng;
///
/// let coord = parse_lat_lng(" 51.5072, -0.1276 ")?;
/// assert_eq!(coord.y, 51.5072);
/// assert_eq!(coord.x, -0.1276);
/// # Ok::<(), locus_core::CoordinateError>(())
/// ```
pub fn parse_lat_lng(input: &str) -> Result<Coord<f64>, CoordinateError> {
    let mut parts = input.split(',');
    let (Some(lat_raw), Some(lng_raw), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CoordinateError::Malformed {
            input: input.to_owned(),
        });
    };
    let lat = parse_axis("latitude", lat_raw)?;
    let lng = parse_axis("longitude", lng_raw)?;
    validate_coord(Coord { x: lng, y: lat })
}

fn parse_axis(axis: &'static str, raw: &str) -> Result<f64, CoordinateError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CoordinateError::NotANumber {
            axis,
            raw: raw.trim().to_owned(),
        })
}

/// Check that a coordinate lies within WGS84 bounds.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use locus_core::{CoordinateError, validate_coord};
///
/// assert!(validate_coord(Coord { x: 179.9, y: -89.9 }).is_ok());
/// assert!(matches!(
///     validate_coord(Coord { x: 0.0, y: 91.0 }),
///     Err(CoordinateError::LatitudeOutOfRange { .. })
/// ));
/// ```
pub fn validate_coord(coord: Coord<f64>) -> Result<Coord<f64>, CoordinateError> {
    if !(-90.0..=90.0).contains(&coord.y) {
        return Err(CoordinateError::LatitudeOutOfRange { value: coord.y });
    }
    if !(-180.0..=180.0).contains(&coord.x) {
        return Err(CoordinateError::LongitudeOutOfRange { value: coord.x });
    }
    Ok(coord)
}
