//! Crawl orchestration
//!
//! The seeker drives a breadth-expanding traversal in waves:
//! - The whole frontier is dispatched at once as concurrent fetches
//! - Results are handled in completion order
//! - Links found on on-site HTML pages feed the next wave
//!
//! Actual parallelism is bounded by the session's admission gates, not by
//! the wave size.

use crate::config::SeekerConfig;
use crate::crawler::fetcher::FetchStrategy;
use crate::crawler::parser::LinkParser;
use crate::crawler::session::ClientSession;
use crate::output::ResponseObserver;
use crate::state::{CrawlResults, FetchResult, Target};
use crate::timer::Timer;
use crate::url::{resolve_link, LinkAcceptor};
use crate::SeekError;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// Broken link seeker
///
/// # Examples
///
/// ```no_run
/// use dead_seeker::{DeadSeeker, SeekerConfig};
///
/// # async fn run() -> Result<(), dead_seeker::SeekError> {
/// let seeker = DeadSeeker::new(SeekerConfig::default());
/// let results = seeker.seek(["https://example.com/"], None).await?;
/// for failure in &results.failures {
///     println!("broken: {}", failure.url());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DeadSeeker {
    config: SeekerConfig,
    acceptor: LinkAcceptor,
}

impl DeadSeeker {
    /// Creates a seeker whose link rules come from the configuration
    pub fn new(config: SeekerConfig) -> Self {
        let acceptor = LinkAcceptor::from_config(&config);
        Self { config, acceptor }
    }

    /// Creates a seeker with its own link rules
    pub fn with_acceptor(config: SeekerConfig, acceptor: LinkAcceptor) -> Self {
        Self { config, acceptor }
    }

    /// Crawls from the given seeds and collects every fetch result
    ///
    /// # Arguments
    ///
    /// * `urls` - Seed addresses; each is its own home
    /// * `observer` - Called once per completed fetch, before its links are
    ///   followed
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlResults)` - Successes and failures in completion order
    /// * `Err(SeekError)` - The HTTP client could not be built
    pub async fn seek<I, S>(
        &self,
        urls: I,
        observer: Option<&dyn ResponseObserver>,
    ) -> Result<CrawlResults, SeekError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut timer = Timer::start();
        let session = ClientSession::new(&self.config)?;
        let strategy = FetchStrategy::from_config(&self.config);
        let parser = LinkParser::new(&self.config, self.acceptor.clone());
        let depth = self.config.depth();

        let mut results = CrawlResults::default();
        let mut visited: HashSet<String> = HashSet::new();
        let mut frontier: VecDeque<Arc<Target>> = VecDeque::new();

        for url in urls {
            let url = url.into();
            if visited.insert(url.clone()) {
                frontier.push_back(Target::seed(url, depth));
            }
        }

        tracing::debug!(
            "Seeking broken links from {} seed(s), depth {}, strategy {:?}",
            frontier.len(),
            depth,
            strategy
        );

        let mut wave_number = 0;
        while !frontier.is_empty() {
            wave_number += 1;
            tracing::debug!("Wave {}: dispatching {} fetch(es)", wave_number, frontier.len());

            let mut wave: FuturesUnordered<_> = frontier
                .drain(..)
                .map(|target| strategy.fetch(&session, target))
                .collect();

            while let Some(result) = wave.next().await {
                if let Some(observer) = observer {
                    observer.on_response(&result);
                }
                expand(&parser, &result, &mut visited, &mut frontier);
                results.record(result);
            }
            tracing::debug!(
                "Wave {} finished at {:.2} ms, {} link(s) queued",
                wave_number,
                timer.elapsed_ms(),
                frontier.len()
            );
        }

        results.elapsed = timer.stop();
        tracing::debug!("Process took {:.2} ms", results.elapsed_ms());

        Ok(results)
    }
}

/// Queues the unvisited links of a fetched page
///
/// Pages without HTML, or whose depth budget is spent, add nothing.
fn expand(
    parser: &LinkParser,
    result: &FetchResult,
    visited: &mut HashSet<String>,
    frontier: &mut VecDeque<Arc<Target>>,
) {
    if result.html.is_none() || !result.target.depth().can_expand() {
        return;
    }

    for link in parser.parse(result) {
        let Some(url) = resolve_link(result.url(), &link) else {
            continue;
        };

        if visited.insert(url.clone()) {
            tracing::debug!("Discovered {} on {}", url, result.url());
            frontier.push_back(Target::child(&result.target, url));
        }
    }
}
