//! Log subscriber installation.
//!
//! Library crates log through the `log` facade; the fmt subscriber bridges
//! those records and writes them to stderr so stdout carries only the JSON
//! response.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::CliError;

/// Level used when neither `--log-level` nor its environment variable is set.
pub(crate) const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

/// Install the global subscriber. `RUST_LOG` directives take precedence
/// over `level`.
pub(crate) fn init(level: LevelFilter) -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .finish()
        .try_init()
        .map_err(CliError::InstallLogger)
}

fn filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}
