//! Blocking JSON-over-HTTP bridge shared by every collaborator.
//!
//! The collaborator traits in `locus-core` are synchronous so the engine
//! stays embeddable outside async contexts. [`BlockingHttp`] owns a Tokio
//! runtime and a `reqwest` client and blocks on each request.
//!
//! # Runtime behaviour
//!
//! Outside any Tokio runtime the owned runtime drives the request. Inside a
//! multi-threaded runtime (detected via [`Handle::try_current`]) the
//! caller's handle is used with [`tokio::task::block_in_place`] to avoid
//! nested runtime panics. Inside a `current_thread` runtime the owned
//! runtime is used; this may deadlock if the caller's runtime drives IO the
//! request depends on.

use std::time::Duration;

use locus_core::TransportError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = "locus/0.1";

/// Worker threads of the owned runtime. Requests are IO-bound, so a small
/// pool serves every evaluator thread.
const RUNTIME_WORKERS: usize = 2;

/// Error type for HTTP collaborator construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The configured base URL does not parse.
    #[error("invalid base URL {url:?}: {source}")]
    BaseUrl {
        /// URL as configured.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
}

/// Owned client and runtime issuing blocking GET requests.
pub(crate) struct BlockingHttp {
    client: Client,
    runtime: Runtime,
    timeout: Duration,
}

impl std::fmt::Debug for BlockingHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingHttp")
            .field("client", &self.client)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl BlockingHttp {
    pub(crate) fn new(timeout: Duration, user_agent: &str) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(RUNTIME_WORKERS)
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            runtime,
            timeout,
        })
    }

    /// Fetch `url` and decode the JSON body.
    pub(crate) fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, TransportError> {
        let future = self.fetch_json(url);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, TransportError> {
        let redacted = redact(&url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &redacted))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &redacted))?;
        response.json().await.map_err(|err| TransportError::Parse {
            message: err.without_url().to_string(),
        })
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.timeout.as_secs(),
            };
        }

        // reqwest embeds the full URL in its message; strip it.
        let message = strip_url(error);
        if let Some(status) = error.status() {
            return TransportError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message,
            };
        }

        TransportError::Network {
            url: url.to_owned(),
            message,
        }
    }
}

fn strip_url(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    if let Some(url) = error.url() {
        message = message.replace(url.as_str(), &redact(url));
    }
    message
}

/// Render `url` without its query string or fragment.
pub(crate) fn redact(url: &Url) -> String {
    let mut bare = url.clone();
    bare.set_query(None);
    bare.set_fragment(None);
    bare.into()
}

/// Parse a base URL and make sure it ends with a slash so relative joins
/// keep its path.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, ProviderBuildError> {
    let with_slash = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };
    Url::parse(&with_slash).map_err(|source| ProviderBuildError::BaseUrl {
        url: raw.to_owned(),
        source,
    })
}
