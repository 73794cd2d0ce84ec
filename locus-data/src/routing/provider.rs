//! HTTP-based `TravelTimeProvider` using OSRM's Route API.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use locus_core::{TravelMode, TravelTimeProvider};
//! use locus_data::routing::HttpTravelTimeProvider;
//!
//! let provider = HttpTravelTimeProvider::new("http://localhost:5000")?;
//! let minutes = provider.travel_time(
//!     Coord { x: -0.1, y: 51.5 },
//!     Coord { x: -0.2, y: 51.6 },
//!     TravelMode::Driving,
//! )?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use geo::Coord;
use locus_core::{TransportError, TravelMode, TravelTimeError, TravelTimeProvider};
use url::Url;

use super::osrm::RouteResponse;
use crate::http::{
    BlockingHttp, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ProviderBuildError, parse_base_url,
};

/// Configuration for [`HttpTravelTimeProvider`].
#[derive(Debug, Clone)]
pub struct HttpTravelTimeProviderConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpTravelTimeProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpTravelTimeProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
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

/// Travel-time provider backed by an OSRM Route service.
///
/// Each call issues one route request between the two coordinates and
/// reports the fastest route's duration in minutes. A timed-out request
/// surfaces as [`TransportError::Timeout`], which the engine treats as
/// unreachable.
#[derive(Debug)]
pub struct HttpTravelTimeProvider {
    http: BlockingHttp,
    base: Url,
    config: HttpTravelTimeProviderConfig,
}

impl HttpTravelTimeProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is malformed or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpTravelTimeProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is malformed or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: HttpTravelTimeProviderConfig) -> Result<Self, ProviderBuildError> {
        let base = parse_base_url(&config.base_url)?;
        let http = BlockingHttp::new(config.timeout, &config.user_agent)?;
        Ok(Self { http, base, config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpTravelTimeProviderConfig {
        &self.config
    }

    /// Build the OSRM Route API URL.
    ///
    /// The URL format is
    /// `{base_url}/route/v1/{profile}/{lng},{lat};{lng},{lat}?overview=false`.
    fn build_route_url(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        mode: TravelMode,
    ) -> Result<Url, TravelTimeError> {
        let path = format!(
            "route/v1/{mode}/{},{};{},{}",
            origin.x, origin.y, destination.x, destination.y
        );
        let mut url = self.base.join(&path).map_err(|err| {
            TravelTimeError::Transport(TransportError::Parse {
                message: format!("invalid route URL: {err}"),
            })
        })?;
        url.set_query(Some("overview=false"));
        Ok(url)
    }
}

/// Convert an OSRM response to a duration in minutes.
#[expect(clippy::float_arithmetic, reason = "seconds to minutes")]
fn convert_response(response: RouteResponse) -> Result<f64, TravelTimeError> {
    if response.is_no_route() {
        return Err(TravelTimeError::NoRoute);
    }
    if !response.is_ok() {
        return Err(TravelTimeError::Transport(TransportError::Service {
            code: response.code,
            message: response.message.unwrap_or_default(),
        }));
    }

    // Missing or invalid durations (negative, NaN, infinite) mean OSRM
    // could not produce a usable route.
    response
        .routes
        .first()
        .and_then(|route| route.duration)
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(|secs| secs / 60.0)
        .ok_or(TravelTimeError::NoRoute)
}

impl TravelTimeProvider for HttpTravelTimeProvider {
    fn travel_time(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
        mode: TravelMode,
    ) -> Result<f64, TravelTimeError> {
        let url = self.build_route_url(origin, destination, mode)?;
        let response: RouteResponse = self.http.get_json(url)?;
        convert_response(response)
    }
}
