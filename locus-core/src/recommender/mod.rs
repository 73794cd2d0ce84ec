//! The end-to-end recommendation pipeline.
//!
//! [`Recommender`] is generic over the three collaborator boundaries: a
//! places directory, a travel-time provider and a geocoder. It fetches
//! amenities, clusters them, lays a candidate grid around each centre,
//! scores every candidate in parallel and assembles the winner.

use std::num::NonZeroUsize;
use std::thread;
use std::time::{Duration, Instant};

use geo::Coord;
use log::{debug, info};

use crate::{
    AmenitySet, AssemblyError, CandidateGrid, CandidateScorer, ClusterFinder, Geocoder, GridSpec,
    NormalizationBounds, ParallelEvaluator, PlacesDirectory, PreferenceWeights, RecommendError,
    RecommendQuery, RecommendService, Recommendation, ScoreResult, TravelMode, TravelTimeProvider,
    WeightedCostScorer, assemble, filter_by_min_rating, minutes_or_unreachable, nearby_or_empty,
};

/// Configuration for [`Recommender`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecommenderConfig {
    /// Radius in metres of every places lookup around the city centre.
    pub search_radius_m: u32,
    /// Grid laid around each cluster centre.
    pub grid: GridSpec,
    /// Clustering parameters.
    pub clusters: ClusterFinder,
    /// Mode passed to every travel-time lookup.
    pub travel_mode: TravelMode,
    /// Upper bound on evaluation threads.
    pub workers: NonZeroUsize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            search_radius_m: 1000,
            grid: GridSpec::default(),
            clusters: ClusterFinder::default(),
            travel_mode: TravelMode::default(),
            workers: thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// Timing and counts gathered while locating the best candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    /// Wall-clock time spent clustering, fetching travel times and scoring.
    pub elapsed: Duration,
    /// Cluster centres found.
    pub clusters: usize,
    /// Candidates scored.
    pub candidates_evaluated: usize,
    /// Candidates with no route from the origin.
    pub unreachable_candidates: usize,
}

/// The best candidate and how it was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Lowest-scoring candidate.
    pub winner: ScoreResult,
    /// Search statistics.
    pub diagnostics: Diagnostics,
}

/// Location recommender wired to concrete collaborators.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use locus_core::test_support::{FixedGeocoder, LinearTravelTimeProvider, MemoryPlaces};
/// use locus_core::{Amenity, RecommendRequest, RecommendService, Recommender};
///
/// let centre = Coord { x: -0.1278, y: 51.5074 };
/// let places = MemoryPlaces::new()
///     .with_keyword("cafe", vec![Amenity::new("Bean", "1 High St", 4.2, centre)])
///     .with_keyword("library", vec![Amenity::new("Books", "2 Low St", 4.8, centre)]);
/// let recommender = Recommender::new(
///     places,
///     LinearTravelTimeProvider::default(),
///     FixedGeocoder::new(centre).with_address("Somewhere, London"),
/// );
/// let query = RecommendRequest {
///     current_location: "51.50,-0.12".into(),
///     city: "London".into(),
///     country: "UK".into(),
///     best_location_type: "library".into(),
///     time_preference: 1.0.into(),
///     rating_preference: 1.0.into(),
///     min_rating: 4.0.into(),
///     amenities: "cafe".into(),
/// }
/// .validate()?;
/// let recommendation = recommender.recommend(&query)?;
/// assert_eq!(recommendation.venue.name, "Books");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Recommender<P, T, G>
where
    P: PlacesDirectory,
    T: TravelTimeProvider,
    G: Geocoder,
{
    places: P,
    travel_times: T,
    geocoder: G,
    config: RecommenderConfig,
}

impl<P, T, G> Recommender<P, T, G>
where
    P: PlacesDirectory,
    T: TravelTimeProvider,
    G: Geocoder,
{
    /// Construct a recommender using default configuration.
    #[must_use]
    pub fn new(places: P, travel_times: T, geocoder: G) -> Self {
        Self::with_config(places, travel_times, geocoder, RecommenderConfig::default())
    }

    /// Construct a recommender with explicit configuration.
    #[must_use]
    pub const fn with_config(
        places: P,
        travel_times: T,
        geocoder: G,
        config: RecommenderConfig,
    ) -> Self {
        Self {
            places,
            travel_times,
            geocoder,
            config,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Find the lowest-cost candidate around the amenity clusters.
    ///
    /// Travel times are fetched once per candidate, in parallel, and
    /// shared by the normalisation bounds and the scorer.
    ///
    /// # Errors
    /// Returns [`RecommendError::NoClusters`] when `amenities` holds no
    /// locations and [`RecommendError::NoReachableCandidates`] when no
    /// candidate can be reached from `origin`.
    pub fn locate(
        &self,
        origin: Coord<f64>,
        amenities: &AmenitySet,
        preferences: PreferenceWeights,
    ) -> Result<Placement, RecommendError> {
        let started_at = Instant::now();
        let points: Vec<Coord<f64>> = amenities.locations().collect();
        let centres = self.config.clusters.find(&points);
        if centres.is_empty() {
            return Err(RecommendError::NoClusters);
        }

        let grid = CandidateGrid::from_centers(&centres, self.config.grid);
        let candidates = grid.as_slice();
        let evaluator = ParallelEvaluator::new(self.config.workers);
        let mode = self.config.travel_mode;
        let travel_minutes = evaluator.map(candidates.len(), |index| {
            candidates.get(index).map_or(f64::INFINITY, |&candidate| {
                minutes_or_unreachable(&self.travel_times, origin, candidate, mode)
            })
        });

        let bounds = NormalizationBounds::from_grid(origin, &grid, &travel_minutes)?;
        let scorer = WeightedCostScorer::new(amenities, preferences, bounds);
        let winner = evaluator
            .minimum(candidates, |index, candidate| {
                let minutes = travel_minutes.get(index).copied().unwrap_or(f64::INFINITY);
                scorer.score(candidate, minutes)
            })
            .ok_or(RecommendError::NoReachableCandidates)?;

        let diagnostics = Diagnostics {
            elapsed: started_at.elapsed(),
            clusters: centres.len(),
            candidates_evaluated: candidates.len(),
            unreachable_candidates: candidates.len().saturating_sub(bounds.reachable()),
        };
        debug!(
            "Scored {} candidates around {} clusters in {:?} ({} unreachable); best {:.4} at ({}, {})",
            diagnostics.candidates_evaluated,
            diagnostics.clusters,
            diagnostics.elapsed,
            diagnostics.unreachable_candidates,
            winner.score,
            winner.candidate.y,
            winner.candidate.x,
        );
        Ok(Placement {
            winner,
            diagnostics,
        })
    }

    /// Fetch every requested category around `centre`, skipping empty ones.
    fn gather_amenities(&self, query: &RecommendQuery, centre: Coord<f64>) -> AmenitySet {
        let radius = self.config.search_radius_m;
        let groups: Vec<_> = query
            .keywords
            .iter()
            .filter_map(|keyword| {
                let found = nearby_or_empty(&self.places, centre, radius, keyword);
                if found.is_empty() {
                    info!("No {keyword} locations found near {}", query.city);
                    None
                } else {
                    Some((keyword.clone(), found))
                }
            })
            .collect();
        AmenitySet::with_equal_weights(groups)
    }
}

impl<P, T, G> RecommendService for Recommender<P, T, G>
where
    P: PlacesDirectory,
    T: TravelTimeProvider,
    G: Geocoder,
{
    fn recommend(&self, query: &RecommendQuery) -> Result<Recommendation, RecommendError> {
        let city_query = query.city_query();
        let centre = self
            .geocoder
            .geocode(&city_query)
            .map_err(|source| RecommendError::CityNotFound {
                query: city_query.clone(),
                source,
            })?;

        let amenities = self.gather_amenities(query, centre);
        let venues = filter_by_min_rating(
            nearby_or_empty(
                &self.places,
                centre,
                self.config.search_radius_m,
                &query.best_location_type,
            ),
            query.min_rating,
        );
        let no_venues = || RecommendError::NoVenueCandidates {
            keyword: query.best_location_type.clone(),
            min_rating: query.min_rating,
        };
        if amenities.is_empty() {
            return Err(RecommendError::NoAmenities);
        }
        if venues.is_empty() {
            return Err(no_venues());
        }

        let placement = self.locate(query.origin, &amenities, query.preferences)?;
        assemble(&placement.winner, &amenities, &venues, &self.geocoder).map_err(|err| match err {
            AssemblyError::NoAmenities => RecommendError::NoAmenities,
            AssemblyError::NoVenues => no_venues(),
        })
    }
}
