//! JSON response body written by `locus recommend`.

use std::collections::BTreeMap;

use locus_core::Recommendation;
use serde::{Deserialize, Serialize};

/// Serialised form of a [`Recommendation`].
///
/// Field names match the HTTP surface clients already consume.
/// `distances_to_amenities` is keyed by keyword and ordered
/// alphabetically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
    /// Winning coordinate.
    pub best_location: LatLng,
    /// Reverse-geocoded address of the winner.
    pub best_location_address: String,
    /// Cost of the winner; lower is better.
    pub best_location_score: f64,
    /// Nearest amenity per keyword.
    pub distances_to_amenities: BTreeMap<String, ClosestAmenity>,
    /// Venue of the requested type closest to the winner.
    pub chosen_best_location: ChosenVenue,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Closest amenity of one keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosestAmenity {
    /// Geodesic distance from the winner in kilometres.
    pub closest_distance: f64,
    /// Amenity name.
    pub closest_name: String,
    /// Amenity address.
    pub closest_address: String,
    /// Amenity rating; `0` when unrated.
    pub closest_rating: f64,
}

/// The venue picked for the requested location type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChosenVenue {
    /// Venue name.
    pub name: String,
    /// Venue address.
    pub address: String,
    /// Venue rating; `0` when unrated.
    pub rating: f64,
}

impl From<Recommendation> for RecommendResponse {
    fn from(recommendation: Recommendation) -> Self {
        let distances_to_amenities = recommendation
            .nearest
            .into_iter()
            .map(|nearest| {
                (
                    nearest.keyword,
                    ClosestAmenity {
                        closest_distance: nearest.distance_km,
                        closest_name: nearest.name,
                        closest_address: nearest.address,
                        closest_rating: nearest.rating,
                    },
                )
            })
            .collect();
        Self {
            best_location: LatLng {
                lat: recommendation.location.y,
                lng: recommendation.location.x,
            },
            best_location_address: recommendation.address,
            best_location_score: recommendation.score,
            distances_to_amenities,
            chosen_best_location: ChosenVenue {
                name: recommendation.venue.name,
                address: recommendation.venue.address,
                rating: recommendation.venue.rating,
            },
        }
    }
}
