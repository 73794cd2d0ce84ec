//! Recommend command implementation for the Locus CLI.

use std::io::{BufReader, Write};
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use locus_core::{
    RecommendQuery, RecommendRequest, RecommendService, Recommender, RecommenderConfig, TravelMode,
};
use locus_data::google::DEFAULT_BASE_URL;
use locus_data::{
    DEFAULT_TIMEOUT_SECS, GoogleMapsClient, GoogleMapsConfig, HttpTravelTimeProvider,
    HttpTravelTimeProviderConfig,
};
use log::{debug, info};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

use crate::fs::{is_regular_file, open_utf8_file};
use crate::logging::{self, DEFAULT_LOG_LEVEL};
use crate::response::RecommendResponse;
use crate::{
    ARG_GOOGLE_API_KEY, ARG_LOG_LEVEL, ARG_REQUEST, ARG_SEARCH_RADIUS_M, ARG_TIMEOUT_SECS,
    ARG_TRAVEL_MODE, ARG_TRAVEL_PROVIDER, ARG_WORKERS, CliError, ENV_GOOGLE_API_KEY, ENV_REQUEST,
};

const SERVICE_GOOGLE: &str = "Google Maps";
const SERVICE_OSRM: &str = "OSRM";

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Recommend a location balancing travel time from the current \
                 position against proximity to, and ratings of, nearby \
                 amenities. The request is provided as a JSON file; service \
                 settings can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Recommend the best location for a request"
)]
#[ortho_config(prefix = "LOCUS")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON file containing the recommendation request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Travel-time backend: `google` (Directions API) or `osrm`.
    #[arg(long = ARG_TRAVEL_PROVIDER, value_name = "name")]
    #[serde(default)]
    pub(crate) travel_provider: Option<String>,
    /// Google Maps web-services API key.
    #[arg(long = ARG_GOOGLE_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) google_api_key: Option<String>,
    /// Override the Google Maps endpoint root.
    #[arg(long = "google-base-url", value_name = "url")]
    #[serde(default)]
    pub(crate) google_base_url: Option<String>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = "osrm-base-url", value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Travel mode: driving, walking or cycling.
    #[arg(long = ARG_TRAVEL_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) travel_mode: Option<String>,
    /// Radius in metres of every places lookup.
    #[arg(long = ARG_SEARCH_RADIUS_M, value_name = "metres")]
    #[serde(default)]
    pub(crate) search_radius_m: Option<u32>,
    /// Number of evaluation threads.
    #[arg(long = ARG_WORKERS, value_name = "count")]
    #[serde(default)]
    pub(crate) workers: Option<usize>,
    /// Timeout applied to every external request.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Log filter level (error, warn, info, debug, trace, off).
    #[arg(long = ARG_LOG_LEVEL, value_name = "level")]
    #[serde(default)]
    pub(crate) log_level: Option<String>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Service answering travel-time lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TravelBackend {
    /// Google Directions API, sharing the places client.
    Google,
    /// An OSRM route service.
    Osrm { base_url: String },
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct RecommendConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Google Maps API key.
    pub(crate) google_api_key: SecretString,
    /// Google Maps endpoint root.
    pub(crate) google_base_url: String,
    /// Travel-time backend.
    pub(crate) travel: TravelBackend,
    /// Engine tuning.
    pub(crate) engine: RecommenderConfig,
    /// Timeout applied to every external request.
    pub(crate) timeout: Duration,
    /// Log filter level.
    pub(crate) log_level: LevelFilter,
}

impl RecommendConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match is_regular_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_REQUEST,
        })?;
        let google_api_key = args
            .google_api_key
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::from)
            .ok_or(CliError::MissingArgument {
                field: ARG_GOOGLE_API_KEY,
                env: ENV_GOOGLE_API_KEY,
            })?;

        let travel = parse_travel_backend(args.travel_provider, args.osrm_base_url)?;
        let travel_mode = args
            .travel_mode
            .map(|raw| {
                TravelMode::from_str(&raw).map_err(|reason| CliError::InvalidArgument {
                    field: ARG_TRAVEL_MODE,
                    value: raw,
                    reason,
                })
            })
            .transpose()?
            .unwrap_or_default();

        let defaults = RecommenderConfig::default();
        let search_radius_m = args
            .search_radius_m
            .map(|radius| positive(ARG_SEARCH_RADIUS_M, radius))
            .transpose()?
            .unwrap_or(defaults.search_radius_m);
        let workers = args
            .workers
            .map(|count| {
                NonZeroUsize::new(count).ok_or_else(|| zero_rejected(ARG_WORKERS, count))
            })
            .transpose()?
            .unwrap_or(defaults.workers);
        let timeout_secs = args
            .timeout_secs
            .map(|secs| positive(ARG_TIMEOUT_SECS, secs))
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let log_level = args
            .log_level
            .map(|raw| {
                LevelFilter::from_str(raw.trim()).map_err(|err| CliError::InvalidArgument {
                    field: ARG_LOG_LEVEL,
                    value: raw,
                    reason: err.to_string(),
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Ok(Self {
            request_path,
            google_api_key,
            google_base_url: args
                .google_base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            travel,
            engine: RecommenderConfig {
                search_radius_m,
                travel_mode,
                workers,
                ..defaults
            },
            timeout: Duration::from_secs(timeout_secs),
            log_level,
        })
    }
}

fn parse_travel_backend(
    provider: Option<String>,
    osrm_base_url: Option<String>,
) -> Result<TravelBackend, CliError> {
    let Some(raw) = provider else {
        return Ok(TravelBackend::Google);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "google" => Ok(TravelBackend::Google),
        "osrm" => Ok(TravelBackend::Osrm {
            base_url: osrm_base_url
                .unwrap_or_else(|| HttpTravelTimeProviderConfig::default().base_url),
        }),
        _ => Err(CliError::InvalidArgument {
            field: ARG_TRAVEL_PROVIDER,
            value: raw,
            reason: "expected `google` or `osrm`".to_owned(),
        }),
    }
}

fn positive<T>(field: &'static str, value: T) -> Result<T, CliError>
where
    T: Copy + Default + PartialEq + ToString,
{
    if value == T::default() {
        Err(zero_rejected(field, value))
    } else {
        Ok(value)
    }
}

fn zero_rejected(field: &'static str, value: impl ToString) -> CliError {
    CliError::InvalidArgument {
        field,
        value: value.to_string(),
        reason: "must be greater than zero".to_owned(),
    }
}

/// Builds the recommendation service for the current invocation.
pub(super) trait RecommendServiceBuilder {
    fn build(&self, config: &RecommendConfig) -> Result<Box<dyn RecommendService>, CliError>;
}

/// Wires the Google Maps client and the chosen travel-time backend into a
/// [`Recommender`].
pub(super) struct DefaultServiceBuilder;

impl RecommendServiceBuilder for DefaultServiceBuilder {
    fn build(&self, config: &RecommendConfig) -> Result<Box<dyn RecommendService>, CliError> {
        let google_config = GoogleMapsConfig::new(config.google_api_key.clone())
            .with_base_url(config.google_base_url.clone())
            .with_timeout(config.timeout);
        let google = Arc::new(GoogleMapsClient::with_config(google_config).map_err(|source| {
            CliError::BuildProvider {
                service: SERVICE_GOOGLE,
                base_url: config.google_base_url.clone(),
                source,
            }
        })?);

        match &config.travel {
            TravelBackend::Google => Ok(Box::new(Recommender::with_config(
                Arc::clone(&google),
                Arc::clone(&google),
                google,
                config.engine.clone(),
            ))),
            TravelBackend::Osrm { base_url } => {
                let provider_config =
                    HttpTravelTimeProviderConfig::new(base_url.clone()).with_timeout(config.timeout);
                let provider =
                    HttpTravelTimeProvider::with_config(provider_config).map_err(|source| {
                        CliError::BuildProvider {
                            service: SERVICE_OSRM,
                            base_url: base_url.clone(),
                            source,
                        }
                    })?;
                Ok(Box::new(Recommender::with_config(
                    Arc::clone(&google),
                    provider,
                    google,
                    config.engine.clone(),
                )))
            }
        }
    }
}

pub(super) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let config = configure(args, logging::init)?;
    let mut stdout = std::io::stdout().lock();
    execute(&config, &DefaultServiceBuilder, &mut stdout)
}

pub(super) fn run_recommend_with(
    args: RecommendArgs,
    builder: &dyn RecommendServiceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_config(args)?;
    execute(&config, builder, writer)
}

fn execute(
    config: &RecommendConfig,
    builder: &dyn RecommendServiceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let query = load_query(&config.request_path)?;
    let service = builder.build(config)?;
    info!(
        "recommending a {:?} near {:?} for {} amenity keyword(s)",
        query.best_location_type,
        query.city_query(),
        query.keywords.len()
    );
    let recommendation = service.recommend(&query)?;
    debug!(
        "best location {:?} scored {}",
        recommendation.address, recommendation.score
    );
    write_response(writer, &RecommendResponse::from(recommendation))
}

/// Resolve the configuration and install logging through `install`.
///
/// A failed resolution still installs logging at [`DEFAULT_LOG_LEVEL`] so
/// the error reported by `main` reaches the log.
pub(super) fn configure<I>(args: RecommendArgs, install: I) -> Result<RecommendConfig, CliError>
where
    I: FnOnce(LevelFilter) -> Result<(), CliError>,
{
    let resolved = resolve_config(args);
    let level = resolved
        .as_ref()
        .map_or(DEFAULT_LOG_LEVEL, |config| config.log_level);
    let installed = install(level);
    let config = resolved?;
    installed?;
    Ok(config)
}

fn resolve_config(args: RecommendArgs) -> Result<RecommendConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Load and validate the request stored at `path`.
fn load_query(path: &Utf8Path) -> Result<RecommendQuery, CliError> {
    load_request(path)?
        .validate()
        .map_err(|source| CliError::InvalidRequest {
            path: path.to_path_buf(),
            source,
        })
}

/// Loads a JSON-encoded [`RecommendRequest`] from disk.
pub(super) fn load_request(path: &Utf8Path) -> Result<RecommendRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_response(writer: &mut dyn Write, response: &RecommendResponse) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(response).map_err(CliError::SerialiseResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
