//! Shared normalisation denominators for one evaluation pass.
//!
//! Distances and travel times are divided by the largest value observed
//! over the whole candidate grid, never per cluster or per category.
//! Unreachable candidates (infinite travel time) are left out of the time
//! maximum so one missing route cannot flatten every other candidate's
//! time term to zero.

use geo::Coord;
use thiserror::Error;

use crate::{CandidateGrid, geodesic_distance_km};

/// Errors raised while deriving [`NormalizationBounds`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundsError {
    /// The candidate grid contained no points.
    #[error("candidate grid is empty")]
    EmptyGrid,
    /// Every candidate was unreachable from the origin.
    #[error("none of the {candidates} candidates is reachable")]
    NoReachableCandidates {
        /// Number of candidates examined.
        candidates: usize,
    },
    /// The travel-time slice did not line up with the grid.
    #[error("{travel_times} travel times supplied for {candidates} candidates")]
    LengthMismatch {
        /// Number of grid points.
        candidates: usize,
        /// Number of travel times.
        travel_times: usize,
    },
}

/// Maximum distance and travel time from the origin across the grid.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use locus_core::{CandidateGrid, ClusterCenter, GridSpec, NormalizationBounds};
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let centre = ClusterCenter { location: Coord { x: 0.01, y: 0.0 }, members: 1 };
/// let grid = CandidateGrid::from_centers(&[centre], GridSpec::new(0.0, 1)?);
/// let err = NormalizationBounds::from_grid(origin, &grid, &[f64::INFINITY])
///     .unwrap_err();
/// assert_eq!(err.to_string(), "none of the 1 candidates is reachable");
///
/// let bounds = NormalizationBounds::from_grid(origin, &grid, &[20.0]).unwrap();
/// assert_eq!(bounds.normalise_time(5.0), 0.25);
/// # Ok::<(), locus_core::GridSpecError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizationBounds {
    max_distance_km: f64,
    max_time_minutes: f64,
    reachable: usize,
}

impl NormalizationBounds {
    /// Build bounds from explicit maxima.
    ///
    /// Non-positive or non-finite maxima are replaced by `1.0` when
    /// normalising.
    #[must_use]
    pub const fn new(max_distance_km: f64, max_time_minutes: f64) -> Self {
        Self {
            max_distance_km,
            max_time_minutes,
            reachable: 0,
        }
    }

    /// Derive bounds over `grid` given each candidate's travel time.
    ///
    /// `travel_times` is index-aligned with `grid`; `f64::INFINITY` marks an
    /// unreachable candidate.
    ///
    /// # Errors
    /// Returns [`BoundsError::EmptyGrid`] for an empty grid,
    /// [`BoundsError::LengthMismatch`] when the slices disagree, and
    /// [`BoundsError::NoReachableCandidates`] when every travel time is
    /// infinite.
    pub fn from_grid(
        origin: Coord<f64>,
        grid: &CandidateGrid,
        travel_times: &[f64],
    ) -> Result<Self, BoundsError> {
        if grid.is_empty() {
            return Err(BoundsError::EmptyGrid);
        }
        if grid.len() != travel_times.len() {
            return Err(BoundsError::LengthMismatch {
                candidates: grid.len(),
                travel_times: travel_times.len(),
            });
        }

        let max_distance_km = grid
            .iter()
            .map(|&candidate| geodesic_distance_km(origin, candidate))
            .fold(0.0, f64::max);

        let reachable_times = travel_times.iter().copied().filter(|t| t.is_finite());
        let (reachable, max_time_minutes) =
            reachable_times.fold((0_usize, 0.0_f64), |(n, max), t| (n + 1, max.max(t)));
        if reachable == 0 {
            return Err(BoundsError::NoReachableCandidates {
                candidates: grid.len(),
            });
        }

        Ok(Self {
            max_distance_km,
            max_time_minutes,
            reachable,
        })
    }

    /// Largest origin-to-candidate geodesic distance in kilometres.
    #[must_use]
    pub const fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    /// Largest finite origin-to-candidate travel time in minutes.
    #[must_use]
    pub const fn max_time_minutes(&self) -> f64 {
        self.max_time_minutes
    }

    /// Candidates with a finite travel time.
    #[must_use]
    pub const fn reachable(&self) -> usize {
        self.reachable
    }

    /// Scale a distance in kilometres by the distance maximum.
    #[must_use]
    pub fn normalise_distance(&self, km: f64) -> f64 {
        scale(km, self.max_distance_km)
    }

    /// Scale a travel time in minutes by the time maximum.
    #[must_use]
    pub fn normalise_time(&self, minutes: f64) -> f64 {
        scale(minutes, self.max_time_minutes)
    }
}

#[expect(clippy::float_arithmetic, reason = "normalisation is a division")]
fn scale(value: f64, max: f64) -> f64 {
    let denominator = if max > 0.0 && max.is_finite() { max } else { 1.0 };
    value / denominator
}
