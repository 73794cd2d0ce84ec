use thiserror::Error;

use crate::TransportError;

/// Errors from [`crate::travel_time::TravelTimeProvider::travel_time`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TravelTimeError {
    /// The routing service found no route between the points.
    #[error("no route between origin and destination")]
    NoRoute,
    /// The routing service could not be reached or understood.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
