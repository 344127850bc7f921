//! Per-target fetch errors

use reqwest::StatusCode;
use thiserror::Error;

/// Why fetching a single target failed
///
/// These never abort a crawl; they are stored in the target's
/// [`FetchResult`](crate::state::FetchResult).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: StatusCode },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

impl FetchError {
    /// Classifies a client error; timeouts get their own variant
    pub fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Transport {
                url: url.to_string(),
                source,
            }
        }
    }

    /// Stable name of the error kind, used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Status { .. } => "HttpResponseError",
            Self::Timeout { .. } => "TimeoutError",
            Self::Transport { .. } => "TransportError",
            Self::InvalidUrl { .. } => "InvalidUrlError",
            Self::Body { .. } => "BodyError",
        }
    }

    /// HTTP status of the failing response, if one was received
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short description without the address
    pub fn detail(&self) -> String {
        match self {
            Self::Status { status, .. } => status.as_u16().to_string(),
            Self::Timeout { .. } => "request timed out".to_string(),
            Self::Transport { source, .. } | Self::Body { source, .. } => source.to_string(),
            Self::InvalidUrl { message, .. } => message.clone(),
        }
    }

    /// Returns true if the request may succeed when sent again
    ///
    /// Network failures, timeouts and 5xx responses are retried; 4xx
    /// responses and malformed addresses are final.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Transport { .. } => true,
            Self::Status { status, .. } => status.is_server_error(),
            Self::InvalidUrl { .. } | Self::Body { .. } => false,
        }
    }
}
