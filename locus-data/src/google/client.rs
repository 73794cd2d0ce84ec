//! Blocking Google Maps web-services client.

use std::time::Duration;

use geo::Coord;
use locus_core::{
    Amenity, GeocodeError, Geocoder, NO_ADDRESS, PlacesDirectory, TransportError, TravelMode,
    TravelTimeError, TravelTimeProvider,
};
use log::debug;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::wire::{DirectionsResponse, GeocodeResponse, PlacesResponse, Status, classify};
use crate::http::{
    BlockingHttp, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ProviderBuildError, parse_base_url,
};

/// Production endpoint root of the Google Maps web services.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

const GEOCODE_PATH: &str = "geocode/json";
const NEARBY_PATH: &str = "place/nearbysearch/json";
const DIRECTIONS_PATH: &str = "directions/json";

/// Configuration for [`GoogleMapsClient`].
#[derive(Debug, Clone)]
pub struct GoogleMapsConfig {
    /// API key sent with every request.
    pub api_key: SecretString,
    /// Endpoint root, overridable for proxies and tests.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl GoogleMapsConfig {
    /// Create a configuration for the production endpoints.
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the endpoint root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Google Maps client implementing every collaborator boundary.
///
/// One instance serves geocoding, places lookups and travel times, so the
/// same client can be shared by the whole recommender (wrap it in an
/// [`std::sync::Arc`]).
///
/// The API key travels as a query parameter. Transport errors report the
/// request URL without its query string so the key never reaches logs.
///
/// # Example
///
/// ```no_run
/// use geo::Coord;
/// use locus_core::PlacesDirectory;
/// use locus_data::google::GoogleMapsClient;
/// use secrecy::SecretString;
///
/// let client = GoogleMapsClient::new(SecretString::from("my-key".to_owned()))?;
/// let cafes = client.nearby(Coord { x: 2.35, y: 48.86 }, 1000, "cafe")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct GoogleMapsClient {
    http: BlockingHttp,
    base: Url,
    config: GoogleMapsConfig,
}

impl GoogleMapsClient {
    /// Create a client for the production endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(api_key: SecretString) -> Result<Self, ProviderBuildError> {
        Self::with_config(GoogleMapsConfig::new(api_key))
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is malformed or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: GoogleMapsConfig) -> Result<Self, ProviderBuildError> {
        let base = parse_base_url(&config.base_url)?;
        let http = BlockingHttp::new(config.timeout, &config.user_agent)?;
        Ok(Self { http, base, config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &GoogleMapsConfig {
        &self.config
    }

    /// Build an endpoint URL with `params` and the API key.
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, TransportError> {
        let mut url = self.base.join(path).map_err(|err| TransportError::Parse {
            message: format!("invalid endpoint {path:?}: {err}"),
        })?;
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("key", self.config.api_key.expose_secret());
        Ok(url)
    }
}

/// `"lat,lng"` as the Google web services expect it.
fn lat_lng(coord: Coord<f64>) -> String {
    format!("{},{}", coord.y, coord.x)
}

/// Directions `mode` parameter for a travel mode.
const fn directions_mode(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Driving => "driving",
        TravelMode::Walking => "walking",
        TravelMode::Cycling => "bicycling",
    }
}

fn first_location(response: GeocodeResponse, query: &str) -> Result<Coord<f64>, GeocodeError> {
    let not_found = || GeocodeError::NotFound {
        query: query.to_owned(),
    };
    match classify(&response.status, response.error_message.as_deref()) {
        Status::Ok => response
            .results
            .first()
            .map(|result| Coord::from(result.geometry.location))
            .ok_or_else(not_found),
        Status::Empty => Err(not_found()),
        Status::Failed(err) => Err(GeocodeError::Transport(err)),
    }
}

fn first_address(response: GeocodeResponse, query: &str) -> Result<String, GeocodeError> {
    let not_found = || GeocodeError::NotFound {
        query: query.to_owned(),
    };
    match classify(&response.status, response.error_message.as_deref()) {
        Status::Ok => response
            .results
            .into_iter()
            .map(|result| result.formatted_address)
            .find(|address| !address.is_empty())
            .ok_or_else(not_found),
        Status::Empty => Err(not_found()),
        Status::Failed(err) => Err(GeocodeError::Transport(err)),
    }
}

fn into_amenities(response: PlacesResponse) -> Result<Vec<Amenity>, TransportError> {
    match classify(&response.status, response.error_message.as_deref()) {
        Status::Ok => Ok(response
            .results
            .into_iter()
            .map(|place| {
                Amenity::new(
                    place.name,
                    place.vicinity.unwrap_or_else(|| NO_ADDRESS.to_owned()),
                    place.rating.unwrap_or(0.0),
                    Coord::from(place.geometry.location),
                )
            })
            .collect()),
        Status::Empty => Ok(Vec::new()),
        Status::Failed(err) => Err(err),
    }
}

#[expect(clippy::float_arithmetic, reason = "seconds to minutes")]
fn directions_minutes(response: DirectionsResponse) -> Result<f64, TravelTimeError> {
    match classify(&response.status, response.error_message.as_deref()) {
        Status::Ok => response
            .routes
            .first()
            .and_then(|route| route.legs.first())
            .and_then(|leg| leg.duration.as_ref())
            .map(|duration| duration.value)
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(|secs| secs / 60.0)
            .ok_or(TravelTimeError::NoRoute),
        Status::Empty => Err(TravelTimeError::NoRoute),
        Status::Failed(err) => Err(TravelTimeError::Transport(err)),
    }
}

impl Geocoder for GoogleMapsClient {
    fn geocode(&self, address: &str) -> Result<Coord<f64>, GeocodeError> {
        let url = self.endpoint(GEOCODE_PATH, &[("address", address)])?;
        let response: GeocodeResponse = self.http.get_json(url)?;
        let location = first_location(response, address)?;
        debug!("Geocoded {address:?} to ({}, {})", location.y, location.x);
        Ok(location)
    }

    fn reverse_geocode(&self, location: Coord<f64>) -> Result<String, GeocodeError> {
        let query = lat_lng(location);
        let url = self.endpoint(GEOCODE_PATH, &[("latlng", query.as_str())])?;
        let response: GeocodeResponse = self.http.get_json(url)?;
        first_address(response, &query)
    }
}

impl PlacesDirectory for GoogleMapsClient {
    fn nearby(
        &self,
        center: Coord<f64>,
        radius_m: u32,
        keyword: &str,
    ) -> Result<Vec<Amenity>, TransportError> {
        let location = lat_lng(center);
        let radius = radius_m.to_string();
        let url = self.endpoint(
            NEARBY_PATH,
            &[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("keyword", keyword),
            ],
        )?;
        let response: PlacesResponse = self.http.get_json(url)?;
        let amenities = into_amenities(response)?;
        debug!("Found {} {keyword:?} places near {location}", amenities.len());
        Ok(amenities)
    }
}

impl TravelTimeProvider for GoogleMapsClient {
    fn travel_time(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        mode: TravelMode,
    ) -> Result<f64, TravelTimeError> {
        let from = lat_lng(origin);
        let to = lat_lng(destination);
        let url = self.endpoint(
            DIRECTIONS_PATH,
            &[
                ("origin", from.as_str()),
                ("destination", to.as_str()),
                ("mode", directions_mode(mode)),
            ],
        )?;
        let response: DirectionsResponse = self.http.get_json(url)?;
        directions_minutes(response)
    }
}
