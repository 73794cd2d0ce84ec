//! Test utilities for routing providers.
//!
//! This module provides [`StubTravelTimeProvider`], a deterministic test
//! double for [`TravelTimeProvider`] that returns pre-configured responses
//! without making HTTP requests.

use std::sync::atomic::{AtomicUsize, Ordering};

use geo::Coord;
use locus_core::{TravelMode, TravelTimeError, TravelTimeProvider};

/// Stub `TravelTimeProvider` for testing.
///
/// # Example
///
/// ```
/// use geo::Coord;
/// use locus_core::{TravelMode, TravelTimeProvider};
/// use locus_data::routing::test_support::StubTravelTimeProvider;
///
/// let provider = StubTravelTimeProvider::with_minutes(12.0);
/// let here = Coord { x: 0.0, y: 0.0 };
///
/// assert_eq!(provider.travel_time(here, here, TravelMode::Driving), Ok(12.0));
/// assert_eq!(provider.calls(), 1);
/// ```
#[derive(Debug)]
pub struct StubTravelTimeProvider {
    response: Result<f64, TravelTimeError>,
    calls: AtomicUsize,
}

impl StubTravelTimeProvider {
    /// Create a provider that answers every lookup with `minutes`.
    #[must_use]
    pub const fn with_minutes(minutes: f64) -> Self {
        Self {
            response: Ok(minutes),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a provider that fails every lookup with `error`.
    #[must_use]
    pub const fn with_error(error: TravelTimeError) -> Self {
        Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a provider for which no destination is reachable.
    #[must_use]
    pub const fn unreachable() -> Self {
        Self::with_error(TravelTimeError::NoRoute)
    }

    /// Number of lookups served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl TravelTimeProvider for StubTravelTimeProvider {
    fn travel_time(
        &self,
        _origin: Coord<f64>,
        _destination: Coord<f64>,
        _mode: TravelMode,
    ) -> Result<f64, TravelTimeError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.response.clone()
    }
}
