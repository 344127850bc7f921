//! Observer interface for completed fetches

use crate::state::FetchResult;

/// Receives every fetch result as soon as it completes
///
/// Observers are called synchronously by the seeker, in completion order,
/// and cannot influence the crawl.
pub trait ResponseObserver: Send + Sync {
    fn on_response(&self, result: &FetchResult);
}

impl<F> ResponseObserver for F
where
    F: Fn(&FetchResult) + Send + Sync,
{
    fn on_response(&self, result: &FetchResult) {
        self(result)
    }
}
