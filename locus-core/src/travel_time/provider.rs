//! Travel-time provider trait and the unreachable fallback.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use geo::Coord;
use log::warn;

use super::error::TravelTimeError;

/// How the traveller moves between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TravelMode {
    /// By car.
    #[default]
    Driving,
    /// On foot.
    Walking,
    /// By bicycle.
    Cycling,
}

impl TravelMode {
    /// Lowercase name used in configuration and service requests.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" => Ok(Self::Driving),
            "walking" => Ok(Self::Walking),
            "cycling" | "bicycling" => Ok(Self::Cycling),
            other => Err(format!("unknown travel mode {other:?}")),
        }
    }
}

/// Fetch the travel time between two coordinates.
///
/// Implementations must be thread-safe: the engine calls a single provider
/// from every worker thread at once. Each call should be bounded by a
/// timeout so one slow lookup cannot stall the batch.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use locus_core::{TravelMode, TravelTimeError, TravelTimeProvider};
///
/// struct TenMinutes;
///
/// impl TravelTimeProvider for TenMinutes {
///     fn travel_time(
///         &self,
///         _origin: Coord<f64>,
///         _destination: Coord<f64>,
///         _mode: TravelMode,
///     ) -> Result<f64, TravelTimeError> {
///         Ok(10.0)
///     }
/// }
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let minutes = TenMinutes.travel_time(origin, origin, TravelMode::Driving)?;
/// assert_eq!(minutes, 10.0);
/// # Ok::<(), TravelTimeError>(())
/// ```
pub trait TravelTimeProvider: Send + Sync {
    /// Return the travel time in minutes from `origin` to `destination`.
    ///
    /// Implementations return [`TravelTimeError::NoRoute`] when the
    /// destination cannot be reached.
    fn travel_time(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        mode: TravelMode,
    ) -> Result<f64, TravelTimeError>;
}

impl<T: TravelTimeProvider + ?Sized> TravelTimeProvider for Arc<T> {
    fn travel_time(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        mode: TravelMode,
    ) -> Result<f64, TravelTimeError> {
        (**self).travel_time(origin, destination, mode)
    }
}

impl<T: TravelTimeProvider + ?Sized> TravelTimeProvider for Box<T> {
    fn travel_time(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        mode: TravelMode,
    ) -> Result<f64, TravelTimeError> {
        (**self).travel_time(origin, destination, mode)
    }
}

/// Look up a travel time, folding every failure into `f64::INFINITY`.
///
/// Negative and NaN answers are treated as unreachable too. Errors other
/// than [`TravelTimeError::NoRoute`] are logged at `warn`.
pub fn minutes_or_unreachable<T>(
    provider: &T,
    origin: Coord<f64>,
    destination: Coord<f64>,
    mode: TravelMode,
) -> f64
where
    T: TravelTimeProvider + ?Sized,
{
    match provider.travel_time(origin, destination, mode) {
        Ok(minutes) if minutes >= 0.0 => minutes,
        Ok(minutes) => {
            warn!(
                "Discarded travel time {minutes} to ({}, {}); treating as unreachable",
                destination.y, destination.x
            );
            f64::INFINITY
        }
        Err(TravelTimeError::NoRoute) => f64::INFINITY,
        Err(err) => {
            warn!(
                "Travel time lookup to ({}, {}) failed: {err}; treating as unreachable",
                destination.y, destination.x
            );
            f64::INFINITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::TransportError;
    use crate::test_support::{FnTravelTimeProvider, UnreachableTravelTimeProvider};

    const ORIGIN: Coord<f64> = Coord { x: 0.0, y: 0.0 };

    #[rstest]
    fn passes_through_valid_minutes() {
        let provider = FnTravelTimeProvider::new(|_, _| Ok(12.5));
        let minutes = minutes_or_unreachable(&provider, ORIGIN, ORIGIN, TravelMode::Driving);
        assert_eq!(minutes, 12.5);
    }

    #[rstest]
    fn no_route_is_infinite() {
        let minutes = minutes_or_unreachable(
            &UnreachableTravelTimeProvider,
            ORIGIN,
            ORIGIN,
            TravelMode::Driving,
        );
        assert!(minutes.is_infinite());
    }

    #[rstest]
    #[case(Err(TravelTimeError::Transport(TransportError::Timeout {
        url: "http://routing.invalid/route".into(),
        timeout_secs: 5,
    })))]
    #[case(Ok(-3.0))]
    #[case(Ok(f64::NAN))]
    fn failures_and_garbage_are_infinite(#[case] answer: Result<f64, TravelTimeError>) {
        let provider = FnTravelTimeProvider::new(move |_, _| answer.clone());
        let minutes = minutes_or_unreachable(&provider, ORIGIN, ORIGIN, TravelMode::Walking);
        assert_eq!(minutes, f64::INFINITY);
    }

    #[rstest]
    #[case("driving", TravelMode::Driving)]
    #[case(" Walking ", TravelMode::Walking)]
    #[case("bicycling", TravelMode::Cycling)]
    fn parses_modes(#[case] raw: &str, #[case] expected: TravelMode) {
        assert_eq!(raw.parse::<TravelMode>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_mode() {
        assert!("teleport".parse::<TravelMode>().is_err());
    }

    #[rstest]
    fn boxed_provider_delegates() {
        let provider: Box<dyn TravelTimeProvider> =
            Box::new(FnTravelTimeProvider::new(|_, _| Ok(4.0)));
        assert_eq!(
            provider.travel_time(ORIGIN, ORIGIN, TravelMode::Cycling),
            Ok(4.0)
        );
    }
}
