//! Command-line interface for the Locus recommendation engine.
//!
//! `locus recommend <request.json>` reads a recommendation request, runs
//! the engine against Google Maps (and optionally OSRM for travel times)
//! and prints the JSON response on stdout. Service settings are layered
//! from configuration files, `LOCUS_CMDS_RECOMMEND_*` environment
//! variables and command-line flags.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod logging;
mod recommend;
mod response;

pub use error::{CliError, EXIT_FAILURE, EXIT_INVALID, EXIT_NOT_FOUND, EXIT_SUCCESS};
pub use response::{ChosenVenue, ClosestAmenity, LatLng, RecommendResponse};

use recommend::{RecommendArgs, run_recommend};

const ARG_REQUEST: &str = "request-path";
const ARG_TRAVEL_PROVIDER: &str = "travel-provider";
const ARG_GOOGLE_API_KEY: &str = "google-api-key";
const ARG_TRAVEL_MODE: &str = "travel-mode";
const ARG_SEARCH_RADIUS_M: &str = "search-radius-m";
const ARG_WORKERS: &str = "workers";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_LOG_LEVEL: &str = "log-level";
const ENV_REQUEST: &str = "LOCUS_CMDS_RECOMMEND_REQUEST_PATH";
const ENV_GOOGLE_API_KEY: &str = "LOCUS_CMDS_RECOMMEND_GOOGLE_API_KEY";

/// Run the Locus CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] describing the first failure; see
/// [`CliError::exit_code`] for the matching process status.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "locus",
    about = "Multi-criteria location recommendations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend a location from a JSON request file.
    Recommend(RecommendArgs),
}

#[cfg(test)]
mod tests;
