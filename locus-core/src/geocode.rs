//! Forward and reverse geocoding.

use std::sync::Arc;

use geo::Coord;
use log::warn;
use thiserror::Error;

use crate::TransportError;

/// Address reported when reverse geocoding finds nothing.
pub const NO_ADDRESS_FOUND: &str = "No address found";

/// Address reported when reverse geocoding fails outright.
pub const ADDRESS_LOOKUP_FAILED: &str = "Error retrieving address";

/// Errors from [`Geocoder`] lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The service resolved nothing for the query.
    #[error("no geocoding result for {query:?}")]
    NotFound {
        /// Address or coordinate text that was looked up.
        query: String,
    },
    /// The service could not be reached or understood.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Convert between addresses and coordinates.
pub trait Geocoder: Send + Sync {
    /// Resolve a free-form address to a coordinate.
    fn geocode(&self, address: &str) -> Result<Coord<f64>, GeocodeError>;

    /// Resolve a coordinate to a formatted address.
    fn reverse_geocode(&self, location: Coord<f64>) -> Result<String, GeocodeError>;
}

impl<T: Geocoder + ?Sized> Geocoder for Arc<T> {
    fn geocode(&self, address: &str) -> Result<Coord<f64>, GeocodeError> {
        (**self).geocode(address)
    }

    fn reverse_geocode(&self, location: Coord<f64>) -> Result<String, GeocodeError> {
        (**self).reverse_geocode(location)
    }
}

impl<T: Geocoder + ?Sized> Geocoder for Box<T> {
    fn geocode(&self, address: &str) -> Result<Coord<f64>, GeocodeError> {
        (**self).geocode(address)
    }

    fn reverse_geocode(&self, location: Coord<f64>) -> Result<String, GeocodeError> {
        (**self).reverse_geocode(location)
    }
}

/// Reverse geocode `location`, substituting a sentinel on failure.
///
/// [`GeocodeError::NotFound`] becomes [`NO_ADDRESS_FOUND`]; any other
/// failure is logged and becomes [`ADDRESS_LOOKUP_FAILED`].
pub fn reverse_geocode_or_sentinel<G>(geocoder: &G, location: Coord<f64>) -> String
where
    G: Geocoder + ?Sized,
{
    match geocoder.reverse_geocode(location) {
        Ok(address) => address,
        Err(GeocodeError::NotFound { .. }) => NO_ADDRESS_FOUND.to_owned(),
        Err(err) => {
            warn!(
                "Reverse geocoding ({}, {}) failed: {err}",
                location.y, location.x
            );
            ADDRESS_LOOKUP_FAILED.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::FixedGeocoder;

    const POINT: Coord<f64> = Coord { x: 1.0, y: 2.0 };

    #[rstest]
    fn returns_resolved_address() {
        let geocoder = FixedGeocoder::new(POINT).with_address("10 Downing St");
        assert_eq!(reverse_geocode_or_sentinel(&geocoder, POINT), "10 Downing St");
    }

    #[rstest]
    fn not_found_uses_no_address_sentinel() {
        let geocoder = FixedGeocoder::new(POINT);
        assert_eq!(reverse_geocode_or_sentinel(&geocoder, POINT), NO_ADDRESS_FOUND);
    }

    #[rstest]
    fn transport_failure_uses_error_sentinel() {
        let geocoder = FixedGeocoder::new(POINT).with_reverse_error(TransportError::Parse {
            message: "truncated body".into(),
        });
        assert_eq!(
            reverse_geocode_or_sentinel(&geocoder, POINT),
            ADDRESS_LOOKUP_FAILED
        );
    }
}
