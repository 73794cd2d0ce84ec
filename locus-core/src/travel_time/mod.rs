//! Travel times from the caller's position to candidate points.
//!
//! The [`TravelTimeProvider`] trait abstracts the routing service. Callers
//! supply an origin, a destination and a [`TravelMode`] and receive the
//! duration in minutes. Unreachable destinations surface as
//! [`TravelTimeError::NoRoute`]; [`minutes_or_unreachable`] is the single
//! place where the engine folds every error into `f64::INFINITY`.

mod error;
mod provider;

pub use error::TravelTimeError;
pub use provider::{TravelMode, TravelTimeProvider, minutes_or_unreachable};
