//! HTTP collaborators for the Locus engine.
//!
//! Responsibilities:
//! - Implement the `locus-core` collaborator traits against remote services.
//! - Decode service payloads and classify their status codes.
//! - Keep credentials out of error messages and logs.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `locus-core`).
//! - Keep blocking I/O off async executors; the synchronous traits are
//!   bridged onto an owned Tokio runtime.
//!
//! Invariants:
//! - Thread-safe: one client serves every evaluator thread.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod google;
mod http;
pub mod routing;

pub use google::{GoogleMapsClient, GoogleMapsConfig};
pub use http::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ProviderBuildError};
pub use routing::{HttpTravelTimeProvider, HttpTravelTimeProviderConfig};
