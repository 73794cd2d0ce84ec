//! Core domain types and search engine for Locus.
//!
//! Locus recommends a location that balances travel time from the caller's
//! current position against proximity to, and the ratings of, nearby
//! amenities. The engine is synchronous and free of global state: every
//! external lookup goes through one of the collaborator traits
//! ([`TravelTimeProvider`], [`PlacesDirectory`], [`Geocoder`]) supplied by
//! the caller.
//!
//! The search runs in stages:
//!
//! 1. [`ClusterFinder`] reduces every amenity location to at most five
//!    centroids.
//! 2. [`CandidateGrid`] expands each centroid into a square grid of
//!    candidate points.
//! 3. [`NormalizationBounds`] derives the shared distance and travel-time
//!    denominators over the whole grid.
//! 4. [`ParallelEvaluator`] scores every candidate with a
//!    [`CandidateScorer`] across worker threads and keeps the minimum.
//! 5. [`assemble`] turns the winning candidate into a [`Recommendation`].
//!
//! [`Recommender`] wires the stages together behind the
//! [`RecommendService`] trait.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod amenity;
pub mod assembler;
pub mod bounds;
pub mod cluster;
pub mod coordinate;
pub mod error;
pub mod evaluator;
pub mod geocode;
pub mod geodesic;
pub mod grid;
pub mod places;
pub mod preference;
pub mod recommender;
pub mod request;
pub mod scorer;
pub mod service;
#[doc(hidden)]
pub mod test_support;
pub mod transport;
pub mod travel_time;

pub use amenity::{Amenity, AmenitySet, Category, NO_ADDRESS, filter_by_min_rating};
pub use assembler::{AssemblyError, NearestAmenity, assemble};
pub use bounds::{BoundsError, NormalizationBounds};
pub use cluster::{ClusterCenter, ClusterFinder};
pub use coordinate::{CoordinateError, parse_lat_lng, validate_coord};
pub use error::{Outcome, RecommendError};
pub use evaluator::{ParallelEvaluator, ScoreResult};
pub use geocode::{
    ADDRESS_LOOKUP_FAILED, GeocodeError, Geocoder, NO_ADDRESS_FOUND, reverse_geocode_or_sentinel,
};
pub use geodesic::geodesic_distance_km;
pub use grid::{CandidateGrid, GridSpec, GridSpecError};
pub use places::{PlacesDirectory, nearby_or_empty};
pub use preference::{PreferenceError, PreferenceWeights};
pub use recommender::{Diagnostics, Placement, Recommender, RecommenderConfig};
pub use request::{NumericField, RecommendQuery, RecommendRequest, RequestValidationError};
pub use scorer::{CandidateScorer, WeightedCostScorer};
pub use service::{RecommendService, Recommendation};
pub use transport::TransportError;
pub use travel_time::{TravelMode, TravelTimeError, TravelTimeProvider, minutes_or_unreachable};
