//! Centroid clustering of amenity locations.
//!
//! [`ClusterFinder`] runs k-means (Lloyd's algorithm with k-means++ seeding)
//! directly in latitude/longitude space. Treating degrees as Euclidean is
//! a fair approximation at city scale and keeps the search cheap. Seeding
//! uses a fixed-seed `ChaCha8Rng`, so identical input yields identical
//! centres.

use std::collections::HashSet;

use geo::Coord;
use log::debug;
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::amenity::count_as_f64;

/// Squared centre movement, in degrees², below which iteration stops.
const CONVERGENCE_TOLERANCE_SQ: f64 = 1.0e-18;

/// A cluster centroid and the number of points assigned to it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterCenter {
    /// Mean position of the member points.
    pub location: Coord<f64>,
    /// Number of input points (duplicates included) nearest this centre.
    pub members: usize,
}

/// Reduces a set of points to at most `max_clusters` representative centres.
///
/// The number of centres returned is `min(max_clusters, distinct points)`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use locus_core::ClusterFinder;
///
/// let points = [
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 1.0, y: 1.0 },
/// ];
/// let centres = ClusterFinder::default().find(&points);
/// assert_eq!(centres.len(), 2);
/// assert!(ClusterFinder::default().find(&[]).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterFinder {
    max_clusters: usize,
    seed: u64,
    max_iterations: usize,
}

impl Default for ClusterFinder {
    fn default() -> Self {
        Self {
            max_clusters: 5,
            seed: 0,
            max_iterations: 300,
        }
    }
}

impl ClusterFinder {
    /// Set the maximum number of centres.
    #[must_use]
    pub const fn with_max_clusters(mut self, max_clusters: usize) -> Self {
        self.max_clusters = max_clusters;
        self
    }

    /// Set the seed used for k-means++ initialisation.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the upper bound on Lloyd iterations.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Maximum number of centres returned.
    #[must_use]
    pub const fn max_clusters(&self) -> usize {
        self.max_clusters
    }

    /// Cluster `points`, returning an empty vector for empty input.
    #[must_use]
    pub fn find(&self, points: &[Coord<f64>]) -> Vec<ClusterCenter> {
        let distinct = distinct_points(points);
        let k = self.max_clusters.min(distinct.len());
        if k == 0 {
            return Vec::new();
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut centres = seed_centres(&distinct, k, &mut rng);
        let mut assignments = vec![0_usize; points.len()];
        let mut iterations = 0_usize;
        while iterations < self.max_iterations {
            iterations += 1;
            assign(points, &centres, &mut assignments);
            let updated = recompute(points, &assignments, &centres);
            let shift = max_shift(&centres, &updated);
            centres = updated;
            if shift <= CONVERGENCE_TOLERANCE_SQ {
                break;
            }
        }
        assign(points, &centres, &mut assignments);
        debug!(
            "k-means settled {} points into {k} clusters after {iterations} iterations",
            points.len()
        );

        let mut members = vec![0_usize; k];
        for &cluster in &assignments {
            if let Some(count) = members.get_mut(cluster) {
                *count += 1;
            }
        }
        centres
            .into_iter()
            .zip(members)
            .map(|(location, members)| ClusterCenter { location, members })
            .collect()
    }
}

/// Unique points in first-seen order; `-0.0` and `0.0` compare equal.
#[expect(
    clippy::float_arithmetic,
    reason = "adding zero folds negative zero into positive zero"
)]
fn distinct_points(points: &[Coord<f64>]) -> Vec<Coord<f64>> {
    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .copied()
        .filter(|p| seen.insert(((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())))
        .collect()
}

/// k-means++ seeding over distinct points.
fn seed_centres(distinct: &[Coord<f64>], k: usize, rng: &mut ChaCha8Rng) -> Vec<Coord<f64>> {
    let mut centres = Vec::with_capacity(k);
    let Some(&first) = distinct.get(rng.gen_range(0..distinct.len())) else {
        return centres;
    };
    centres.push(first);
    let mut nearest: Vec<f64> = distinct
        .iter()
        .map(|&p| squared_distance(p, first))
        .collect();

    while centres.len() < k {
        let next = match WeightedIndex::new(nearest.iter().copied()) {
            Ok(weights) => distinct.get(weights.sample(rng)).copied(),
            // Every remaining point coincides numerically with a centre.
            Err(_) => distinct.iter().copied().find(|p| !centres.contains(p)),
        };
        let Some(next) = next else {
            break;
        };
        centres.push(next);
        for (distance, &p) in nearest.iter_mut().zip(distinct) {
            *distance = distance.min(squared_distance(p, next));
        }
    }
    centres
}

/// Assign every point to its nearest centre; ties go to the lower index.
fn assign(points: &[Coord<f64>], centres: &[Coord<f64>], assignments: &mut [usize]) {
    for (slot, &point) in assignments.iter_mut().zip(points) {
        let mut best = (0_usize, f64::INFINITY);
        for (index, &centre) in centres.iter().enumerate() {
            let distance = squared_distance(point, centre);
            if distance < best.1 {
                best = (index, distance);
            }
        }
        *slot = best.0;
    }
}

/// Mean of each cluster; an emptied cluster keeps its previous centre.
#[expect(clippy::float_arithmetic, reason = "centroids are coordinate means")]
fn recompute(
    points: &[Coord<f64>],
    assignments: &[usize],
    previous: &[Coord<f64>],
) -> Vec<Coord<f64>> {
    let mut sums = vec![(Coord { x: 0.0, y: 0.0 }, 0_usize); previous.len()];
    for (&point, &cluster) in points.iter().zip(assignments) {
        if let Some((sum, count)) = sums.get_mut(cluster) {
            sum.x += point.x;
            sum.y += point.y;
            *count += 1;
        }
    }
    sums.into_iter()
        .zip(previous)
        .map(|((sum, count), &old)| {
            if count == 0 {
                old
            } else {
                let n = count_as_f64(count);
                Coord {
                    x: sum.x / n,
                    y: sum.y / n,
                }
            }
        })
        .collect()
}

fn max_shift(old: &[Coord<f64>], new: &[Coord<f64>]) -> f64 {
    old.iter()
        .zip(new)
        .map(|(&a, &b)| squared_distance(a, b))
        .fold(0.0, f64::max)
}

#[expect(clippy::float_arithmetic, reason = "squared Euclidean distance")]
fn squared_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}
