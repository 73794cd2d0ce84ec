//! The recommendation service boundary.

use geo::Coord;

use crate::{Amenity, NearestAmenity, RecommendError, RecommendQuery};

/// A recommended location and the amenities around it.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use locus_core::{Amenity, Recommendation};
///
/// let venue = Amenity::new("Desk Space", "3 Low St", 4.6, Coord { x: 0.0, y: 0.0 });
/// let recommendation = Recommendation {
///     location: Coord { x: 0.001, y: 0.0 },
///     address: "1 High St".into(),
///     score: -0.4,
///     nearest: Vec::new(),
///     venue,
/// };
/// assert_eq!(recommendation.venue.name, "Desk Space");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    /// Winning candidate position.
    pub location: Coord<f64>,
    /// Reverse-geocoded address of the winner, or a sentinel.
    pub address: String,
    /// Cost of the winner; lower is better.
    pub score: f64,
    /// Nearest amenity of every resolved category, in category order.
    pub nearest: Vec<NearestAmenity>,
    /// Venue of the requested type closest to the winner.
    pub venue: Amenity,
}

/// Produce a recommendation for a validated query.
///
/// Implementations must be `Send + Sync` so a single service can be shared
/// across request handlers. Nothing-found conditions are reported as
/// errors whose [`RecommendError::outcome`] is
/// [`crate::Outcome::NotFound`] rather than as panics.
pub trait RecommendService: Send + Sync {
    /// Run the full recommendation pipeline.
    fn recommend(&self, query: &RecommendQuery) -> Result<Recommendation, RecommendError>;
}

impl<T: RecommendService + ?Sized> RecommendService for Box<T> {
    fn recommend(&self, query: &RecommendQuery) -> Result<Recommendation, RecommendError> {
        (**self).recommend(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::PreferenceWeights;

    struct NothingNearby;

    impl RecommendService for NothingNearby {
        fn recommend(&self, _query: &RecommendQuery) -> Result<Recommendation, RecommendError> {
            Err(RecommendError::NoAmenities)
        }
    }

    #[rstest]
    fn boxed_service_delegates() {
        let service: Box<dyn RecommendService> = Box::new(NothingNearby);
        let query = RecommendQuery {
            origin: Coord { x: 0.0, y: 0.0 },
            city: "Paris".into(),
            country: "France".into(),
            best_location_type: "library".into(),
            preferences: PreferenceWeights::new(1.0, 1.0).expect("valid preferences"),
            min_rating: 0.0,
            keywords: vec!["cafe".into()],
        };
        assert_eq!(service.recommend(&query), Err(RecommendError::NoAmenities));
    }
}
