//! Geodesic distance between coordinates.

use geo::{Coord, Distance, Geodesic, Point};

/// Distance in kilometres along the WGS84 ellipsoid.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use locus_core::geodesic_distance_km;
///
/// // One degree of latitude at the equator is roughly 110.6 km.
/// let d = geodesic_distance_km(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 });
/// assert!((d - 110.574).abs() < 0.01);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "metres to kilometres")]
pub fn geodesic_distance_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Geodesic.distance(Point::from(a), Point::from(b)) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn zero_for_identical_points() {
        let p = Coord { x: -0.1276, y: 51.5072 };
        assert!(geodesic_distance_km(p, p).abs() < 1e-9);
    }

    #[rstest]
    fn symmetric() {
        let a = Coord { x: -0.1276, y: 51.5072 };
        let b = Coord { x: 2.3522, y: 48.8566 };
        let forward = geodesic_distance_km(a, b);
        let backward = geodesic_distance_km(b, a);
        assert!((forward - backward).abs() < 1e-6);
        // London to Paris is a little over 340 km.
        assert!((340.0..350.0).contains(&forward), "found {forward}");
    }
}
