//! Normalised weighted cost of a candidate location.
//!
//! Lower scores are better. For each category with weight `w` the cost
//! adds
//!
//! ```text
//! w × (time_weight × (min_distance + travel_time) − rating_weight × max_rating)
//! ```
//!
//! where `min_distance` and `travel_time` are divided by the grid-wide
//! maxima in [`NormalizationBounds`]. Ratings are used raw. Scores may be
//! negative and are never clamped.

use geo::Coord;

use crate::{AmenitySet, Category, NormalizationBounds, PreferenceWeights, geodesic_distance_km};

/// Compute the cost of placing the caller at `candidate`.
///
/// Implementations must be thread-safe (`Send` + `Sync`) because the
/// evaluator calls one scorer from every worker. They must also be pure:
/// identical arguments give identical scores.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use locus_core::CandidateScorer;
///
/// struct TravelOnly;
///
/// impl CandidateScorer for TravelOnly {
///     fn score(&self, _candidate: Coord<f64>, travel_minutes: f64) -> f64 {
///         travel_minutes
///     }
/// }
///
/// assert_eq!(TravelOnly.score(Coord { x: 0.0, y: 0.0 }, 7.0), 7.0);
/// ```
pub trait CandidateScorer: Send + Sync {
    /// Return the cost of `candidate` given its travel time in minutes.
    ///
    /// `travel_minutes` is `f64::INFINITY` when the candidate is
    /// unreachable.
    fn score(&self, candidate: Coord<f64>, travel_minutes: f64) -> f64;
}

/// The weighted distance, travel-time and rating cost.
///
/// Borrows the amenity data read-only for the duration of one pass.
///
/// Unrated amenities (rating `0.0`) take part in each category's maximum
/// rating like any other value. A category of unrated places therefore
/// contributes no rating reward.
#[derive(Debug, Clone, Copy)]
pub struct WeightedCostScorer<'a> {
    amenities: &'a AmenitySet,
    preferences: PreferenceWeights,
    bounds: NormalizationBounds,
}

impl<'a> WeightedCostScorer<'a> {
    /// Bind a scorer to one pass's amenities, preferences and bounds.
    #[must_use]
    pub const fn new(
        amenities: &'a AmenitySet,
        preferences: PreferenceWeights,
        bounds: NormalizationBounds,
    ) -> Self {
        Self {
            amenities,
            preferences,
            bounds,
        }
    }

    /// Weighted contribution of one category, or `None` when it is empty.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "weighted cost term")]
    pub fn category_term(
        &self,
        category: &Category<'_>,
        candidate: Coord<f64>,
        travel_norm: f64,
    ) -> Option<f64> {
        let min_distance = category
            .amenities
            .iter()
            .map(|amenity| {
                self.bounds
                    .normalise_distance(geodesic_distance_km(candidate, amenity.location))
            })
            .reduce(f64::min)?;
        let max_rating = category
            .amenities
            .iter()
            .map(|amenity| amenity.rating)
            .reduce(f64::max)?;
        let time_weight = self.preferences.time_weight();
        let rating_weight = self.preferences.rating_weight();
        Some(
            category.weight
                * (time_weight * (min_distance + travel_norm) - rating_weight * max_rating),
        )
    }
}

impl CandidateScorer for WeightedCostScorer<'_> {
    #[expect(clippy::float_arithmetic, reason = "accumulating category terms")]
    fn score(&self, candidate: Coord<f64>, travel_minutes: f64) -> f64 {
        if !travel_minutes.is_finite() {
            return f64::INFINITY;
        }
        let travel_norm = self.bounds.normalise_time(travel_minutes);
        self.amenities
            .categories()
            .filter_map(|category| self.category_term(&category, candidate, travel_norm))
            .fold(0.0, |total, term| total + term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    use crate::Amenity;

    const CANDIDATE: Coord<f64> = Coord { x: 0.0, y: 0.0 };

    fn place(rating: f64, x: f64) -> Amenity {
        Amenity::new("p", "a", rating, Coord { x, y: 0.0 })
    }

    #[fixture]
    fn amenities() -> AmenitySet {
        AmenitySet::new()
            .with_category("cafe", 0.5, [place(4.0, 0.01), place(3.0, 0.02)])
            .with_category("gym", 0.5, [place(0.0, 0.03)])
            .with_category("museum", 0.0, Vec::new())
    }

    #[fixture]
    fn bounds() -> NormalizationBounds {
        NormalizationBounds::new(10.0, 20.0)
    }

    #[rstest]
    fn unreachable_candidates_score_infinity(amenities: AmenitySet, bounds: NormalizationBounds) {
        let prefs = PreferenceWeights::new(1.0, 1.0).expect("valid preferences");
        let scorer = WeightedCostScorer::new(&amenities, prefs, bounds);
        assert_eq!(scorer.score(CANDIDATE, f64::INFINITY), f64::INFINITY);
    }

    #[rstest]
    fn empty_categories_contribute_nothing(amenities: AmenitySet, bounds: NormalizationBounds) {
        let prefs = PreferenceWeights::new(1.0, 0.0).expect("valid preferences");
        let scorer = WeightedCostScorer::new(&amenities, prefs, bounds);
        let museum = amenities
            .categories()
            .find(|c| c.keyword == "museum")
            .expect("museum category");
        assert_eq!(scorer.category_term(&museum, CANDIDATE, 0.5), None);
        assert!(scorer.score(CANDIDATE, 10.0).is_finite());
    }

    #[rstest]
    fn score_is_sum_of_category_terms(amenities: AmenitySet, bounds: NormalizationBounds) {
        let prefs = PreferenceWeights::new(2.0, 1.0).expect("valid preferences");
        let scorer = WeightedCostScorer::new(&amenities, prefs, bounds);
        let (time_weight, rating_weight) = (2.0 / 3.0, 1.0 / 3.0);
        let travel = 8.0 / 20.0;
        let cafe_km = geodesic_distance_km(CANDIDATE, Coord { x: 0.01, y: 0.0 });
        let gym_km = geodesic_distance_km(CANDIDATE, Coord { x: 0.03, y: 0.0 });
        let cafe = 0.5 * (time_weight * (cafe_km / 10.0 + travel) - rating_weight * 4.0);
        let gym = 0.5 * (time_weight * (gym_km / 10.0 + travel) - rating_weight * 0.0);
        assert!((scorer.score(CANDIDATE, 8.0) - (cafe + gym)).abs() < 1e-12);
    }

    #[rstest]
    #[case::travel_only(1.0, 0.0, 0.5)]
    #[case::rating_only(0.0, 1.0, -2.5)]
    fn category_weights_scale_each_term(
        #[case] time: f64,
        #[case] rating: f64,
        #[case] expected: f64,
        bounds: NormalizationBounds,
    ) {
        let amenities = AmenitySet::new()
            .with_category("cafe", 0.25, [place(4.0, 0.0)])
            .with_category("gym", 0.75, [place(2.0, 0.0)]);
        let prefs = PreferenceWeights::new(time, rating).expect("valid preferences");
        let scorer = WeightedCostScorer::new(&amenities, prefs, bounds);
        assert!((scorer.score(CANDIDATE, 10.0) - expected).abs() < 1e-12);
    }

    #[rstest]
    fn unrated_places_join_the_rating_maximum(bounds: NormalizationBounds) {
        let amenities = AmenitySet::new().with_category("gym", 1.0, [place(0.0, 0.0)]);
        let prefs = PreferenceWeights::new(0.0, 1.0).expect("valid preferences");
        let scorer = WeightedCostScorer::new(&amenities, prefs, bounds);
        assert_eq!(scorer.score(CANDIDATE, 5.0), 0.0);
    }

    #[rstest]
    fn pure_rating_preference_rewards_best_rating(bounds: NormalizationBounds) {
        let amenities =
            AmenitySet::new().with_category("cafe", 1.0, [place(4.5, 0.0), place(2.0, 0.0)]);
        let prefs = PreferenceWeights::new(0.0, 3.0).expect("valid preferences");
        let scorer = WeightedCostScorer::new(&amenities, prefs, bounds);
        assert_eq!(scorer.score(CANDIDATE, 5.0), -4.5);
    }

    #[rstest]
    fn zero_preferences_score_zero(amenities: AmenitySet, bounds: NormalizationBounds) {
        let prefs = PreferenceWeights::new(0.0, 0.0).expect("valid preferences");
        let scorer = WeightedCostScorer::new(&amenities, prefs, bounds);
        assert_eq!(scorer.score(CANDIDATE, 5.0), 0.0);
    }

    #[rstest]
    fn shorter_travel_scores_lower(amenities: AmenitySet, bounds: NormalizationBounds) {
        let prefs = PreferenceWeights::new(1.0, 0.0).expect("valid preferences");
        let scorer = WeightedCostScorer::new(&amenities, prefs, bounds);
        assert!(scorer.score(CANDIDATE, 4.0) < scorer.score(CANDIDATE, 6.0));
    }
}
