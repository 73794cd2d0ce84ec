//! In-memory collaborator doubles used by unit and behaviour tests.
//!
//! None of these types perform I/O. They are public so integration tests
//! and downstream crates can drive the engine deterministically.

use std::collections::HashMap;

use geo::Coord;

use crate::{
    Amenity, GeocodeError, Geocoder, PlacesDirectory, TransportError, TravelMode, TravelTimeError,
    TravelTimeProvider, geodesic_distance_km,
};

/// Places directory answering from a keyword map.
///
/// Unknown keywords yield an empty list; the search centre and radius are
/// ignored.
#[derive(Debug, Clone, Default)]
pub struct MemoryPlaces {
    by_keyword: HashMap<String, Vec<Amenity>>,
}

impl MemoryPlaces {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the amenities returned for `keyword`.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>, amenities: Vec<Amenity>) -> Self {
        self.by_keyword.insert(keyword.into(), amenities);
        self
    }
}

impl PlacesDirectory for MemoryPlaces {
    fn nearby(
        &self,
        _center: Coord<f64>,
        _radius_m: u32,
        keyword: &str,
    ) -> Result<Vec<Amenity>, TransportError> {
        Ok(self.by_keyword.get(keyword).cloned().unwrap_or_default())
    }
}

/// Places directory whose every lookup fails with a network error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingPlaces;

impl PlacesDirectory for FailingPlaces {
    fn nearby(
        &self,
        _center: Coord<f64>,
        _radius_m: u32,
        _keyword: &str,
    ) -> Result<Vec<Amenity>, TransportError> {
        Err(TransportError::Network {
            url: "http://places.invalid/nearbysearch".to_owned(),
            message: "connection refused".to_owned(),
        })
    }
}

/// Geocoder resolving every address to one coordinate.
///
/// Reverse lookups report [`GeocodeError::NotFound`] unless an address or
/// an error has been configured.
#[derive(Debug, Clone)]
pub struct FixedGeocoder {
    location: Option<Coord<f64>>,
    reverse: Result<String, GeocodeError>,
}

impl FixedGeocoder {
    /// Resolve every address to `location`.
    #[must_use]
    pub fn new(location: Coord<f64>) -> Self {
        Self {
            location: Some(location),
            reverse: Err(GeocodeError::NotFound {
                query: String::new(),
            }),
        }
    }

    /// A geocoder that resolves nothing.
    #[must_use]
    pub fn unresolved() -> Self {
        Self {
            location: None,
            ..Self::new(Coord { x: 0.0, y: 0.0 })
        }
    }

    /// Answer reverse lookups with `address`.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.reverse = Ok(address.into());
        self
    }

    /// Fail reverse lookups with `error`.
    #[must_use]
    pub fn with_reverse_error(mut self, error: TransportError) -> Self {
        self.reverse = Err(GeocodeError::Transport(error));
        self
    }
}

impl Geocoder for FixedGeocoder {
    fn geocode(&self, address: &str) -> Result<Coord<f64>, GeocodeError> {
        self.location.ok_or_else(|| GeocodeError::NotFound {
            query: address.to_owned(),
        })
    }

    fn reverse_geocode(&self, location: Coord<f64>) -> Result<String, GeocodeError> {
        match &self.reverse {
            Ok(address) => Ok(address.clone()),
            Err(GeocodeError::NotFound { .. }) => Err(GeocodeError::NotFound {
                query: format!("{},{}", location.y, location.x),
            }),
            Err(err) => Err(err.clone()),
        }
    }
}

/// Travel-time provider backed by a closure over `(origin, destination)`.
pub struct FnTravelTimeProvider<F> {
    lookup: F,
}

impl<F> FnTravelTimeProvider<F>
where
    F: Fn(Coord<f64>, Coord<f64>) -> Result<f64, TravelTimeError> + Send + Sync,
{
    /// Wrap `lookup`.
    pub const fn new(lookup: F) -> Self {
        Self { lookup }
    }
}

impl<F> TravelTimeProvider for FnTravelTimeProvider<F>
where
    F: Fn(Coord<f64>, Coord<f64>) -> Result<f64, TravelTimeError> + Send + Sync,
{
    fn travel_time(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        _mode: TravelMode,
    ) -> Result<f64, TravelTimeError> {
        (self.lookup)(origin, destination)
    }
}

/// Travel-time provider reporting no route for every pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreachableTravelTimeProvider;

impl TravelTimeProvider for UnreachableTravelTimeProvider {
    fn travel_time(
        &self,
        _origin: Coord<f64>,
        _destination: Coord<f64>,
        _mode: TravelMode,
    ) -> Result<f64, TravelTimeError> {
        Err(TravelTimeError::NoRoute)
    }
}

/// Travel time proportional to geodesic distance.
///
/// The default of two minutes per kilometre models a steady 30 km/h.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTravelTimeProvider {
    minutes_per_km: f64,
}

impl LinearTravelTimeProvider {
    /// Construct a provider with the given pace.
    #[must_use]
    pub const fn new(minutes_per_km: f64) -> Self {
        Self { minutes_per_km }
    }
}

impl Default for LinearTravelTimeProvider {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl TravelTimeProvider for LinearTravelTimeProvider {
    #[expect(clippy::float_arithmetic, reason = "time is distance times pace")]
    fn travel_time(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        _mode: TravelMode,
    ) -> Result<f64, TravelTimeError> {
        Ok(geodesic_distance_km(origin, destination) * self.minutes_per_km)
    }
}
