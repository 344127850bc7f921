//! Dead-Seeker: a broken link auditor
//!
//! This crate crawls a set of seed addresses, follows links up to a configured
//! depth and reports every address that failed to load (HTTP error status,
//! network error or timeout).

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod timer;
pub mod url;

use thiserror::Error;

/// Main error type for run-level failures
///
/// Per-address failures are never reported through this type; they are
/// recorded in [`state::FetchResult`] instead.
#[derive(Debug, Error)]
pub enum SeekError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid link search attribute: {0}")]
    InvalidAttribute(String),
}

/// Result type alias for Dead-Seeker operations
pub type Result<T> = std::result::Result<T, SeekError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::SeekerConfig;
pub use crawler::{DeadSeeker, FetchError};
pub use output::{LoggingObserver, ResponseObserver};
pub use state::{CrawlResults, Depth, FetchResult, Target};
pub use crate::url::{LinkAcceptor, LinkAcceptorBuilder};
