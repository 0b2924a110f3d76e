//! Typed errors for the opportunity scout.
//!
//! Two layers, mirroring the error taxonomy of the pipeline:
//!
//! - [`SourceError`] is what a single capability call (search, scrape,
//!   fetch, generate) can fail with. The pipeline never lets these escape;
//!   they are logged and the call is treated as having yielded nothing.
//! - [`ScoutError`] is what the public entry points can return. It is
//!   reserved for caller misuse and broken configuration.

use thiserror::Error;

/// Errors surfaced to callers of the scout entry points.
#[derive(Debug, Error)]
pub enum ScoutError {
    /// No keyword was supplied and no URL override was given.
    #[error("keyword is required when no urls are provided")]
    MissingKeyword,

    /// A URL supplied by the caller could not be parsed.
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Configuration could not be loaded or is malformed.
    #[error("config error: {0}")]
    Config(String),
}

/// Errors from a single call to an external capability.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The remote answered with a non-success status.
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// The call did not finish within its timeout.
    #[error("timeout calling: {url}")]
    Timeout { url: String },

    /// The response body did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Every retry attempt failed.
    #[error("gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<SourceError>,
    },

    /// The capability has no credentials or endpoint configured.
    #[error("capability not configured")]
    NotConfigured,
}

impl SourceError {
    /// Whether a retry could plausibly succeed (rate limiting, server errors,
    /// transport hiccups). Other 4xx answers are final.
    pub fn is_retryable(&self) -> bool {
        match self {
            SourceError::Http(_) | SourceError::Timeout { .. } => true,
            SourceError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            let url = error
                .url()
                .map(|u| u.to_string())
                .unwrap_or_else(|| "<unknown>".to_string());
            return SourceError::Timeout { url };
        }
        if error.is_decode() {
            return SourceError::Decode(error.to_string());
        }
        SourceError::Http(Box::new(error))
    }
}

/// Turn a non-2xx response into [`SourceError::Status`], keeping the body.
pub(crate) async fn ensure_success(response: reqwest::Response) -> SourceResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SourceError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Result type alias for scout entry points.
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for capability calls.
pub type SourceResult<T> = std::result::Result<T, SourceError>;
