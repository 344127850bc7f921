//! Output module for reporting crawl results
//!
//! This module handles:
//! - The observer hook called for every completed fetch
//! - Logging one line per result
//! - Summarizing a finished crawl

pub mod logging;
pub mod stats;
mod traits;

pub use logging::{LoggingObserver, ERROR_ANNOTATION};
pub use stats::{log_statistics, CrawlStatistics, BROKEN_LINKS_MESSAGE};
pub use traits::ResponseObserver;
