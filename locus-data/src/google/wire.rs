//! Google Maps web-service response types.
//!
//! Every endpoint answers with a `status` string plus an optional
//! `error_message`; only the fields the client reads are decoded.

use geo::Coord;
use locus_core::TransportError;
use serde::Deserialize;

/// Status reported when a request succeeded with results.
pub const STATUS_OK: &str = "OK";

/// Status reported when a request succeeded without results.
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Status reported by Directions when an endpoint could not be geocoded.
pub const STATUS_NOT_FOUND: &str = "NOT_FOUND";

/// Outcome classification shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Results are present.
    Ok,
    /// The service resolved nothing.
    Empty,
    /// The service refused or failed the request.
    Failed(TransportError),
}

/// Classify a raw `status` / `error_message` pair.
pub fn classify(status: &str, error_message: Option<&str>) -> Status {
    match status {
        STATUS_OK => Status::Ok,
        STATUS_ZERO_RESULTS | STATUS_NOT_FOUND => Status::Empty,
        code => Status::Failed(TransportError::Service {
            code: code.to_owned(),
            message: error_message.unwrap_or_default().to_owned(),
        }),
    }
}

/// Latitude/longitude pair as Google encodes it.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl From<LatLng> for Coord<f64> {
    fn from(value: LatLng) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}

/// Geometry block carried by geocoding and places results.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Geometry {
    /// Representative point.
    pub location: LatLng,
}

/// Geocoding API response (forward and reverse).
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// Request status.
    pub status: String,
    /// Explanation accompanying a failure status.
    pub error_message: Option<String>,
    /// Matches, best first.
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

/// One geocoding match.
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    /// Human-readable address.
    #[serde(default)]
    pub formatted_address: String,
    /// Position of the match.
    pub geometry: Geometry,
}

/// Places Nearby Search response.
#[derive(Debug, Deserialize)]
pub struct PlacesResponse {
    /// Request status.
    pub status: String,
    /// Explanation accompanying a failure status.
    pub error_message: Option<String>,
    /// Places in prominence order.
    #[serde(default)]
    pub results: Vec<PlaceResult>,
}

/// One nearby place.
#[derive(Debug, Deserialize)]
pub struct PlaceResult {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Short address; absent for some places.
    pub vicinity: Option<String>,
    /// Average user rating; absent when unrated.
    pub rating: Option<f64>,
    /// Position of the place.
    pub geometry: Geometry,
}

/// Directions API response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Request status.
    pub status: String,
    /// Explanation accompanying a failure status.
    pub error_message: Option<String>,
    /// Alternative routes, recommended first.
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

/// One route from origin to destination.
#[derive(Debug, Deserialize)]
pub struct DirectionsRoute {
    /// Route legs; a request without waypoints has exactly one.
    #[serde(default)]
    pub legs: Vec<Leg>,
}

/// One leg of a route.
#[derive(Debug, Deserialize)]
pub struct Leg {
    /// Leg duration.
    pub duration: Option<TextValue>,
}

/// A numeric value with its localised rendering.
#[derive(Debug, Deserialize)]
pub struct TextValue {
    /// Value in base units (seconds for durations).
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("OK", Status::Ok)]
    #[case("ZERO_RESULTS", Status::Empty)]
    #[case("NOT_FOUND", Status::Empty)]
    fn classifies_known_statuses(#[case] raw: &str, #[case] expected: Status) {
        assert_eq!(classify(raw, None), expected);
    }

    #[rstest]
    fn failure_status_carries_message() {
        let status = classify("REQUEST_DENIED", Some("The provided API key is invalid."));
        assert_eq!(
            status,
            Status::Failed(TransportError::Service {
                code: "REQUEST_DENIED".to_owned(),
                message: "The provided API key is invalid.".to_owned(),
            })
        );
    }

    #[rstest]
    fn deserialises_place_without_optional_fields() {
        let json = r#"{
            "status": "OK",
            "results": [{"name": "Bean", "geometry": {"location": {"lat": 51.5, "lng": -0.12}}}]
        }"#;

        let response: PlacesResponse = serde_json::from_str(json).expect("should deserialise");

        let place = response.results.first().expect("one place");
        assert!(place.vicinity.is_none());
        assert!(place.rating.is_none());
        assert_eq!(
            Coord::from(place.geometry.location),
            Coord { x: -0.12, y: 51.5 }
        );
    }

    #[rstest]
    fn deserialises_directions_duration() {
        let json = r#"{
            "status": "OK",
            "routes": [{"legs": [{"duration": {"text": "12 mins", "value": 720}}]}]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).expect("should deserialise");

        let seconds = response
            .routes
            .first()
            .and_then(|route| route.legs.first())
            .and_then(|leg| leg.duration.as_ref())
            .map(|duration| duration.value);
        assert_eq!(seconds, Some(720.0));
    }

    #[rstest]
    fn deserialises_error_without_results() {
        let json = r#"{"status": "OVER_QUERY_LIMIT", "error_message": "quota"}"#;
        let response: GeocodeResponse = serde_json::from_str(json).expect("should deserialise");
        assert!(response.results.is_empty());
        assert_eq!(response.error_message.as_deref(), Some("quota"));
    }
}
