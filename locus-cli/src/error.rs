//! Error types emitted by the Locus CLI.
//!
//! Helpers return `Result<_, CliError>` throughout and the workspace denies
//! `clippy::result_large_err`, so large payloads are boxed.

use std::sync::Arc;

use camino::Utf8PathBuf;
use locus_core::{Outcome, RecommendError, RequestValidationError};
use locus_data::ProviderBuildError;
use thiserror::Error;

/// Process exit status for a successful run.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status for unexpected failures.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status when no suitable location was found.
pub const EXIT_NOT_FOUND: u8 = 2;
/// Exit status for invalid requests, arguments or configuration.
pub const EXIT_INVALID: u8 = 3;

/// Errors emitted by the Locus CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that also sets it.
        env: &'static str,
    },
    /// An option carried a value outside its accepted range.
    #[error("invalid {field} {value:?}: {reason}")]
    InvalidArgument {
        /// Option name.
        field: &'static str,
        /// Value as supplied.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the request file failed.
    #[error("failed to open request at {path:?}: {source}")]
    OpenRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Request JSON could not be decoded.
    #[error("failed to parse request JSON at {path:?}: {source}")]
    ParseRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The request payload failed validation.
    #[error("request in {path:?} failed validation: {source}")]
    InvalidRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// First validation failure.
        #[source]
        source: RequestValidationError,
    },
    /// Constructing an HTTP collaborator failed.
    #[error("failed to build {service} client for {base_url:?}: {source}")]
    BuildProvider {
        /// Service being configured.
        service: &'static str,
        /// Configured endpoint root.
        base_url: String,
        /// Construction failure.
        #[source]
        source: ProviderBuildError,
    },
    /// Installing the log subscriber failed.
    #[error("failed to install logger: {0}")]
    InstallLogger(#[source] tracing_subscriber::util::TryInitError),
    /// The engine could not produce a recommendation.
    #[error(transparent)]
    Recommend(Box<RecommendError>),
    /// Serialising the response failed.
    #[error("failed to serialise response: {0}")]
    SerialiseResponse(#[source] serde_json::Error),
    /// Writing the response failed.
    #[error("failed to write response: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl From<RecommendError> for CliError {
    fn from(err: RecommendError) -> Self {
        Self::Recommend(Box::new(err))
    }
}

impl CliError {
    /// Process exit status for this error.
    ///
    /// # Examples
    /// ```
    /// use locus_cli::CliError;
    /// use locus_core::RecommendError;
    ///
    /// assert_eq!(CliError::from(RecommendError::NoClusters).exit_code(), 2);
    /// ```
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Recommend(err) => match err.outcome() {
                Outcome::NotFound => EXIT_NOT_FOUND,
                Outcome::Invalid => EXIT_INVALID,
                Outcome::Failure => EXIT_FAILURE,
            },
            Self::ArgumentParsing(_)
            | Self::Configuration(_)
            | Self::MissingArgument { .. }
            | Self::InvalidArgument { .. }
            | Self::MissingSourceFile { .. }
            | Self::SourcePathNotFile { .. }
            | Self::ParseRequest { .. }
            | Self::InvalidRequest { .. } => EXIT_INVALID,
            Self::InspectSourcePath { .. }
            | Self::OpenRequest { .. }
            | Self::BuildProvider { .. }
            | Self::InstallLogger(_)
            | Self::SerialiseResponse(_)
            | Self::WriteOutput(_) => EXIT_FAILURE,
        }
    }

    /// Whether the error is a generic failure whose detail stays in the log.
    #[must_use]
    pub fn is_unexpected(&self) -> bool {
        self.exit_code() == EXIT_FAILURE
    }
}
