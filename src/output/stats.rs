//! Crawl statistics
//!
//! This module summarizes a finished crawl for the final report.

use crate::state::CrawlResults;
use std::collections::BTreeMap;

/// Message logged when at least one broken link was found
pub const BROKEN_LINKS_MESSAGE: &str = "Found some broken links!";

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// Number of addresses fetched
    pub total: usize,

    /// Number of addresses that loaded fine
    pub successes: usize,

    /// Number of broken links
    pub failures: usize,

    /// Broken links per error kind
    pub failures_by_kind: BTreeMap<&'static str, usize>,

    /// Total wall time in milliseconds
    pub elapsed_ms: f64,
}

impl CrawlStatistics {
    pub fn from_results(results: &CrawlResults) -> Self {
        let mut failures_by_kind = BTreeMap::new();
        for error in results.failures.iter().filter_map(|r| r.error.as_ref()) {
            *failures_by_kind.entry(error.kind()).or_insert(0) += 1;
        }

        Self {
            total: results.total(),
            successes: results.successes.len(),
            failures: results.failures.len(),
            failures_by_kind,
            elapsed_ms: results.elapsed_ms(),
        }
    }

    /// One-line summary of the crawl
    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "Checked {} link(s) in {:.2} ms: {} ok, {} broken",
            self.total, self.elapsed_ms, self.successes, self.failures
        );

        if !self.failures_by_kind.is_empty() {
            let kinds: Vec<String> = self
                .failures_by_kind
                .iter()
                .map(|(kind, count)| format!("{}: {}", kind, count))
                .collect();
            line.push_str(&format!(" ({})", kinds.join(", ")));
        }

        line
    }
}

/// Logs the statistics of a finished crawl
///
/// # Arguments
///
/// * `stats` - The statistics to report
/// * `annotate` - Prefix the broken links message with a workflow annotation
pub fn log_statistics(stats: &CrawlStatistics, annotate: bool) {
    tracing::info!("{}", stats.summary_line());

    if stats.failures > 0 {
        let prefix = if annotate {
            crate::output::logging::ERROR_ANNOTATION
        } else {
            ""
        };
        tracing::error!("{}{}", prefix, BROKEN_LINKS_MESSAGE);
    }
}
