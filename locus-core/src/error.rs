//! Errors surfaced by a recommendation and their caller-facing outcome.

use thiserror::Error;

use crate::{BoundsError, GeocodeError, RequestValidationError};

/// Coarse classification of a failed recommendation.
///
/// Outer layers map these to status codes: not found, bad request and
/// internal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Nothing suitable was found for the request.
    NotFound,
    /// The request was malformed.
    Invalid,
    /// Any other failure.
    Failure,
}

/// Errors returned by [`crate::RecommendService::recommend`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    /// The request failed validation.
    #[error(transparent)]
    InvalidRequest(#[from] RequestValidationError),
    /// The city could not be geocoded.
    #[error("could not locate {query:?}: {source}")]
    CityNotFound {
        /// Address that was geocoded.
        query: String,
        /// Underlying geocoder error.
        #[source]
        source: GeocodeError,
    },
    /// None of the requested keywords produced amenities.
    #[error("no amenities found for any requested keyword")]
    NoAmenities,
    /// No venue of the requested type survived the rating filter.
    #[error("no {keyword:?} venues rated at least {min_rating}")]
    NoVenueCandidates {
        /// Venue keyword.
        keyword: String,
        /// Minimum rating applied.
        min_rating: f64,
    },
    /// Clustering produced no centres.
    #[error("no suitable clusters found")]
    NoClusters,
    /// The candidate grid was empty.
    #[error("candidate grid is empty")]
    EmptyCandidateGrid,
    /// No candidate could be reached from the origin.
    #[error("no candidate location is reachable from the origin")]
    NoReachableCandidates,
    /// Internal inconsistency between pipeline stages.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RecommendError {
    /// Map the error onto the three caller-facing outcomes.
    ///
    /// # Examples
    /// ```
    /// use locus_core::{Outcome, RecommendError};
    ///
    /// assert_eq!(RecommendError::NoClusters.outcome(), Outcome::NotFound);
    /// assert_eq!(RecommendError::Internal("boom".into()).outcome(), Outcome::Failure);
    /// ```
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        match self {
            Self::InvalidRequest(_) => Outcome::Invalid,
            Self::CityNotFound { .. }
            | Self::NoAmenities
            | Self::NoVenueCandidates { .. }
            | Self::NoClusters
            | Self::EmptyCandidateGrid
            | Self::NoReachableCandidates => Outcome::NotFound,
            Self::Internal(_) => Outcome::Failure,
        }
    }
}

impl From<BoundsError> for RecommendError {
    fn from(err: BoundsError) -> Self {
        match err {
            BoundsError::EmptyGrid => Self::EmptyCandidateGrid,
            BoundsError::NoReachableCandidates { .. } => Self::NoReachableCandidates,
            BoundsError::LengthMismatch { .. } => Self::Internal(err.to_string()),
        }
    }
}
