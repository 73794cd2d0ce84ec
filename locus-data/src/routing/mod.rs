//! HTTP-based travel time providers for routing services.
//!
//! This module provides [`HttpTravelTimeProvider`], an implementation of
//! [`locus_core::TravelTimeProvider`] that asks an OSRM Route service for
//! the duration of the fastest route between two points.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use locus_data::routing::{HttpTravelTimeProvider, HttpTravelTimeProviderConfig};
//!
//! let config = HttpTravelTimeProviderConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let provider = HttpTravelTimeProvider::with_config(config)?;
//! # Ok::<(), locus_data::ProviderBuildError>(())
//! ```

mod osrm;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{HttpTravelTimeProvider, HttpTravelTimeProviderConfig};
