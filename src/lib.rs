//! Facade crate for the Locus location-recommendation engine.
//!
//! This crate re-exports the core domain types and exposes the HTTP
//! collaborators behind the `http` feature flag.

#![forbid(unsafe_code)]

pub use locus_core::{
    Amenity, AmenitySet, ClusterFinder, Geocoder, GridSpec, NearestAmenity, Outcome,
    PlacesDirectory, PreferenceWeights, RecommendError, RecommendQuery, RecommendRequest,
    RecommendService, Recommendation, Recommender, RecommenderConfig, TransportError, TravelMode,
    TravelTimeError, TravelTimeProvider,
};

#[cfg(feature = "http")]
pub use locus_data::{
    GoogleMapsClient, GoogleMapsConfig, HttpTravelTimeProvider, HttpTravelTimeProviderConfig,
    ProviderBuildError,
};
