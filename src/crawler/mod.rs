//! Crawler module for finding broken links
//!
//! This module contains the core crawling logic, including:
//! - HTTP transport with retries and concurrency limits
//! - Fetch strategies (HEAD-first or GET-always)
//! - HTML parsing and link extraction
//! - Overall crawl orchestration

mod error;
mod fetcher;
mod limiter;
mod parser;
mod seeker;
mod session;

pub use error::FetchError;
pub use fetcher::FetchStrategy;
pub use limiter::{host_key, Admission, ConcurrencyLimiter};
pub use parser::LinkParser;
pub use seeker::DeadSeeker;
pub use session::{build_http_client, ClientSession, RetryPolicy, SessionResponse};

use crate::config::SeekerConfig;
use crate::output::ResponseObserver;
use crate::state::CrawlResults;
use crate::SeekError;

/// Runs a complete crawl from the given seeds
///
/// Link rules come from the configuration; every result is passed to
/// `observer`.
///
/// # Returns
///
/// * `Ok(CrawlResults)` - Crawl finished; broken links are in `failures`
/// * `Err(SeekError)` - The HTTP client could not be built
pub async fn seek<I, S>(
    config: SeekerConfig,
    urls: I,
    observer: &dyn ResponseObserver,
) -> Result<CrawlResults, SeekError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    DeadSeeker::new(config).seek(urls, Some(observer)).await
}
