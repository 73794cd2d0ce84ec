//! Candidate grid generation around cluster centres.

use geo::Coord;
use thiserror::Error;

use crate::ClusterCenter;
use crate::amenity::count_as_f64;

/// Errors returned by [`GridSpec::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridSpecError {
    /// A grid needs at least one point per axis.
    #[error("points_per_axis must be at least 1")]
    NoPoints,
    /// The radius was negative, NaN or infinite.
    #[error("radius_degrees must be finite and non-negative (found {0})")]
    InvalidRadius(f64),
}

/// Shape of the square grid laid around every cluster centre.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    radius_degrees: f64,
    points_per_axis: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            radius_degrees: 0.005,
            points_per_axis: 5,
        }
    }
}

impl GridSpec {
    /// Validate and construct a grid shape.
    pub fn new(radius_degrees: f64, points_per_axis: usize) -> Result<Self, GridSpecError> {
        if points_per_axis == 0 {
            return Err(GridSpecError::NoPoints);
        }
        if !radius_degrees.is_finite() || radius_degrees < 0.0 {
            return Err(GridSpecError::InvalidRadius(radius_degrees));
        }
        Ok(Self {
            radius_degrees,
            points_per_axis,
        })
    }

    /// Half-width of the grid in degrees.
    #[must_use]
    pub const fn radius_degrees(&self) -> f64 {
        self.radius_degrees
    }

    /// Number of latitudes (and longitudes) sampled.
    #[must_use]
    pub const fn points_per_axis(&self) -> usize {
        self.points_per_axis
    }

    /// Candidates generated per centre.
    #[must_use]
    pub const fn points_per_center(&self) -> usize {
        self.points_per_axis.saturating_mul(self.points_per_axis)
    }

    /// Evenly spaced values spanning `center ± radius`.
    ///
    /// The span is symmetric, so an odd count reproduces `center` exactly
    /// and the end points are exactly `center - radius` and
    /// `center + radius`.
    #[expect(clippy::float_arithmetic, reason = "linear interpolation")]
    fn axis(&self, center: f64) -> impl Iterator<Item = f64> + '_ {
        let last = self.points_per_axis.saturating_sub(1);
        (0..self.points_per_axis).map(move |i| {
            if last == 0 {
                return center;
            }
            let offset = count_as_f64(2 * i) - count_as_f64(last);
            center + self.radius_degrees * (offset / count_as_f64(last))
        })
    }
}

/// Every candidate point for one evaluation pass.
///
/// Points are laid out centre by centre; within a centre latitudes vary
/// slowest. Overlapping grids from nearby centres are not deduplicated.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use locus_core::{CandidateGrid, ClusterCenter, GridSpec};
///
/// let centre = ClusterCenter { location: Coord { x: -0.12, y: 51.5 }, members: 3 };
/// let grid = CandidateGrid::from_centers(&[centre], GridSpec::default());
/// assert_eq!(grid.len(), 25);
/// assert!(grid.iter().any(|p| *p == centre.location));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateGrid {
    points: Vec<Coord<f64>>,
}

impl CandidateGrid {
    /// Expand each centre into `points_per_axis²` candidates.
    #[must_use]
    pub fn from_centers(centers: &[ClusterCenter], spec: GridSpec) -> Self {
        let mut points = Vec::with_capacity(centers.len().saturating_mul(spec.points_per_center()));
        for center in centers {
            for lat in spec.axis(center.location.y) {
                points.extend(spec.axis(center.location.x).map(|lng| Coord { x: lng, y: lat }));
            }
        }
        Self { points }
    }

    /// Candidates as a slice, in generation order.
    #[must_use]
    pub fn as_slice(&self) -> &[Coord<f64>] {
        &self.points
    }

    /// Iterate over the candidates.
    pub fn iter(&self) -> std::slice::Iter<'_, Coord<f64>> {
        self.points.iter()
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<'a> IntoIterator for &'a CandidateGrid {
    type Item = &'a Coord<f64>;
    type IntoIter = std::slice::Iter<'a, Coord<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
