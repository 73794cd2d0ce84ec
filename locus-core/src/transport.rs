//! Failures talking to an external lookup service.
//!
//! Every collaborator error wraps a [`TransportError`] when the failure lies
//! in reaching or understanding the remote service rather than in the
//! answer itself. The engine never propagates these: each boundary converts
//! them to a neutral value and logs a warning.

use thiserror::Error;

/// Errors raised while calling an external service.
///
/// URLs are stored without their query string so credentials carried as
/// query parameters never reach logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be sent or the connection failed.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Request URL without query string.
        url: String,
        /// Underlying error message.
        message: String,
    },
    /// The request exceeded its timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL without query string.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Request URL without query string.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Underlying error message.
        message: String,
    },
    /// The service answered but reported an error status in its payload.
    #[error("service returned {code}: {message}")]
    Service {
        /// Service-specific status code.
        code: String,
        /// Message supplied by the service, possibly empty.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse response: {message}")]
    Parse {
        /// Decoder error message.
        message: String,
    },
}
