//! Google Maps web-services collaborators.
//!
//! [`GoogleMapsClient`] implements [`locus_core::Geocoder`],
//! [`locus_core::PlacesDirectory`] and [`locus_core::TravelTimeProvider`]
//! against the Geocoding, Places Nearby Search and Directions JSON APIs.
//! `ZERO_RESULTS` answers become "not found", an empty list or
//! [`locus_core::TravelTimeError::NoRoute`] respectively; any other
//! non-`OK` status becomes [`locus_core::TransportError::Service`].

mod client;
mod wire;

pub use client::{DEFAULT_BASE_URL, GoogleMapsClient, GoogleMapsConfig};
