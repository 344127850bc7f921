//! Per-target fetch results and whole-run results

use crate::crawler::FetchError;
use crate::state::Target;
use crate::timer::as_millis_f64;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of fetching one target
///
/// An error implies no HTML. A successful response that is not HTML, or not
/// on-site, carries neither.
#[derive(Debug)]
pub struct FetchResult {
    /// The target that was fetched
    pub target: Arc<Target>,

    /// HTTP status of the last response received, if any
    pub status: Option<StatusCode>,

    /// Why the fetch failed, if it did
    pub error: Option<FetchError>,

    /// Page body, only for on-site HTML responses
    pub html: Option<String>,

    /// Time until the first response (or the failure)
    pub elapsed: Duration,
}

impl FetchResult {
    /// Creates an empty result for a target
    pub fn new(target: Arc<Target>) -> Self {
        Self {
            target,
            status: None,
            error: None,
            html: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Returns true if this result counts as a broken link
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    pub fn url(&self) -> &str {
        self.target.url()
    }

    pub fn elapsed_ms(&self) -> f64 {
        as_millis_f64(self.elapsed)
    }
}

/// Results of a whole crawl, in completion order
#[derive(Debug, Default)]
pub struct CrawlResults {
    pub successes: Vec<FetchResult>,
    pub failures: Vec<FetchResult>,

    /// Total wall time of the run
    pub elapsed: Duration,
}

impl CrawlResults {
    /// Files a result under successes or failures
    pub fn record(&mut self, result: FetchResult) {
        if result.is_failure() {
            self.failures.push(result);
        } else {
            self.successes.push(result);
        }
    }

    /// Number of addresses fetched
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Returns true if no broken link was found
    pub fn is_healthy(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn elapsed_ms(&self) -> f64 {
        as_millis_f64(self.elapsed)
    }
}
