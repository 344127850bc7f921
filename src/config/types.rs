use crate::state::Depth;
use serde::Deserialize;
use std::time::Duration;

/// Default configuration values
pub mod defaults {
    /// Desktop browser User-Agent; some hosts reject unknown agents
    pub const WEB_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/60.0.3112.113 Safari/537.36";

    /// Maximum number of attempts per request (first try included)
    pub const RETRY_MAX_TRIES: u32 = 4;

    /// Maximum total time spent retrying one request, in seconds
    pub const RETRY_MAX_TIME_SECS: u64 = 30;

    /// Crawl depth; negative means unlimited
    pub const MAX_DEPTH: i64 = -1;

    /// Link prefixes that are never followed
    pub const EXCLUDE_PREFIX: &[&str] = &["mailto:", "tel:"];

    /// Attributes scanned for links
    pub const SEARCH_ATTRS: &[&str] = &["href", "src"];

    /// Concurrent requests per host; 0 disables the cap
    pub const CONNECT_LIMIT_PER_HOST: usize = 10;

    /// Request timeout, in seconds
    pub const TIMEOUT_SECS: u64 = 60;

    /// Concurrent requests across the whole run; 0 disables the cap
    pub const MAX_CONCURRENT_REQUESTS: usize = 0;
}

/// Run configuration for the seeker
///
/// Every field has a default, so an empty TOML document is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SeekerConfig {
    /// Maximum number of attempts per request
    pub max_retries: u32,

    /// Maximum total retry time per request (seconds)
    pub max_retry_time: u64,

    /// Crawl depth limit; negative means unlimited
    pub max_depth: i64,

    /// Only follow links starting with one of these
    pub include_prefix: Vec<String>,

    /// Never follow links starting with one of these
    pub exclude_prefix: Vec<String>,

    /// Only follow links ending with one of these
    pub include_suffix: Vec<String>,

    /// Never follow links ending with one of these
    pub exclude_suffix: Vec<String>,

    /// Only follow links containing one of these
    pub include_contained: Vec<String>,

    /// Never follow links containing one of these
    pub exclude_contained: Vec<String>,

    /// HTML attributes scanned for links
    pub search_attrs: Vec<String>,

    /// Concurrent requests per host (0 = unlimited)
    pub connect_limit_per_host: usize,

    /// Request timeout (seconds)
    pub timeout: u64,

    /// Concurrent requests across the run (0 = unlimited)
    pub max_concurrent_requests: usize,

    /// Always GET on-site pages instead of HEAD first
    pub always_get_onsite: bool,

    /// Resolve links to absolute form before applying link rules
    pub resolve_before_filter: bool,

    /// User-Agent header sent with every request
    pub agent: String,
}

impl Default for SeekerConfig {
    fn default() -> Self {
        use defaults::*;

        Self {
            max_retries: RETRY_MAX_TRIES,
            max_retry_time: RETRY_MAX_TIME_SECS,
            max_depth: MAX_DEPTH,
            include_prefix: Vec::new(),
            exclude_prefix: EXCLUDE_PREFIX.iter().map(|s| s.to_string()).collect(),
            include_suffix: Vec::new(),
            exclude_suffix: Vec::new(),
            include_contained: Vec::new(),
            exclude_contained: Vec::new(),
            search_attrs: SEARCH_ATTRS.iter().map(|s| s.to_string()).collect(),
            connect_limit_per_host: CONNECT_LIMIT_PER_HOST,
            timeout: TIMEOUT_SECS,
            max_concurrent_requests: MAX_CONCURRENT_REQUESTS,
            always_get_onsite: false,
            resolve_before_filter: false,
            agent: WEB_AGENT.to_string(),
        }
    }
}

impl SeekerConfig {
    /// Depth budget given to each seed
    pub fn depth(&self) -> Depth {
        Depth::from_limit(self.max_depth)
    }

    /// Total retry budget per request
    pub fn retry_budget(&self) -> Duration {
        Duration::from_secs(self.max_retry_time)
    }

    /// Per-request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Adds exclude prefixes, keeping the existing ones
    pub fn add_exclude_prefix<I, S>(&mut self, prefixes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for prefix in prefixes {
            let prefix = prefix.into();
            if !self.exclude_prefix.contains(&prefix) {
                self.exclude_prefix.push(prefix);
            }
        }
    }
}
