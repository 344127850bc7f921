//! Admission gates bounding in-flight requests
//!
//! Two independent caps are applied to every request:
//! - a global cap across the whole run (optional)
//! - a per-host cap keyed by `host:port` (optional)
//!
//! Permits are owned by an [`Admission`] and released when it is dropped,
//! which covers success, error and cancellation alike.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use url::Url;

/// Permits held by one in-flight request
#[derive(Debug)]
pub struct Admission {
    _host: Option<OwnedSemaphorePermit>,
    _global: Option<OwnedSemaphorePermit>,
}

/// Counting gates shared by every request of a run
#[derive(Debug)]
pub struct ConcurrencyLimiter {
    /// Global semaphore; `None` when the cap is disabled
    global: Option<Arc<Semaphore>>,

    /// Permits per host; 0 disables the per-host cap
    per_host: usize,

    /// One semaphore per host, created on first use
    hosts: Mutex<HashMap<String, Arc<Semaphore>>>,
}

impl ConcurrencyLimiter {
    /// Creates a limiter
    ///
    /// # Arguments
    ///
    /// * `max_concurrent` - Requests in flight across the run (0 = unlimited)
    /// * `per_host` - Requests in flight per host (0 = unlimited)
    pub fn new(max_concurrent: usize, per_host: usize) -> Self {
        Self {
            global: (max_concurrent > 0).then(|| Arc::new(Semaphore::new(max_concurrent))),
            per_host,
            hosts: Mutex::new(HashMap::new()),
        }
    }

    /// Waits until a request to `host` may be sent
    ///
    /// The host gate is taken before the global one so that requests queued
    /// behind a busy host do not hold global slots.
    pub async fn admit(&self, host: &str) -> Admission {
        let host_permit = match self.host_semaphore(host) {
            Some(semaphore) => {
                tracing::trace!("Waiting for host slot: {}", host);
                semaphore.acquire_owned().await.ok()
            }
            None => None,
        };

        let global_permit = match &self.global {
            Some(semaphore) => {
                tracing::debug!(
                    "Attempting to acquire request slot ({} available)",
                    semaphore.available_permits()
                );
                let permit = Arc::clone(semaphore).acquire_owned().await.ok();
                tracing::debug!("Acquired request slot");
                permit
            }
            None => None,
        };

        Admission {
            _host: host_permit,
            _global: global_permit,
        }
    }

    /// Free global slots, or `None` if the global cap is disabled
    pub fn available_global(&self) -> Option<usize> {
        self.global.as_ref().map(|s| s.available_permits())
    }

    fn host_semaphore(&self, host: &str) -> Option<Arc<Semaphore>> {
        if self.per_host == 0 {
            return None;
        }

        let mut hosts = self.hosts.lock().unwrap_or_else(|e| e.into_inner());
        let semaphore = hosts
            .entry(host.to_string())
            .or_insert_with(|| Arc::new(Semaphore::new(self.per_host)));
        Some(Arc::clone(semaphore))
    }
}

/// Key identifying the destination of a request (`host:port`)
pub fn host_key(url: &Url) -> String {
    format!(
        "{}:{}",
        url.host_str().unwrap_or_default(),
        url.port_or_known_default().unwrap_or_default()
    )
}
