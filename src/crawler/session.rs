//! HTTP client session
//!
//! This module wraps the HTTP client used for a whole run:
//! - Building the client with User-Agent, timeout and per-host pool size
//! - Exponential-backoff retries bounded by attempts and a time budget
//! - Admission through the run's concurrency gates
//! - Treating 4xx/5xx responses as errors

use crate::config::SeekerConfig;
use crate::crawler::error::FetchError;
use crate::crawler::limiter::{host_key, Admission, ConcurrencyLimiter};
use crate::url::is_html_content_type;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response, StatusCode};
use std::time::{Duration, Instant};
use url::Url;

/// Delay before the first retry
const RETRY_START_DELAY: Duration = Duration::from_millis(100);

/// Growth factor of the retry delay
const RETRY_FACTOR: u32 = 2;

/// Exponential backoff retry policy
///
/// | Condition | Action |
/// |-----------|--------|
/// | Network error / timeout | Retry |
/// | HTTP 5xx | Retry |
/// | HTTP 4xx | Fail immediately |
///
/// Retrying stops when `max_tries` attempts were made or when the next delay
/// would exceed the time budget measured from the first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per request, first try included
    pub max_tries: u32,

    /// Total time budget for one request and its retries
    pub max_time: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &SeekerConfig) -> Self {
        Self {
            max_tries: config.max_retries.max(1),
            max_time: config.retry_budget(),
        }
    }

    /// Delay to wait after the given (1-based) failed attempt
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        RETRY_START_DELAY.saturating_mul(RETRY_FACTOR.saturating_pow(exponent))
    }

    /// Returns the delay before the next attempt, or `None` to give up
    fn next_delay(&self, attempt: u32, started: Instant) -> Option<Duration> {
        if attempt >= self.max_tries {
            return None;
        }
        let delay = self.delay_after(attempt);
        (started.elapsed() + delay <= self.max_time).then_some(delay)
    }
}

/// Builds the HTTP client shared by a run
///
/// # Arguments
///
/// * `config` - The run configuration (agent, timeout, per-host limit)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &SeekerConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.agent.as_str())
        .timeout(config.request_timeout())
        .gzip(true)
        .brotli(true);

    if config.connect_limit_per_host > 0 {
        builder = builder.pool_max_idle_per_host(config.connect_limit_per_host);
    }

    builder.build()
}

/// Long-lived client session for one run
#[derive(Debug)]
pub struct ClientSession {
    client: Client,
    retry: RetryPolicy,
    limiter: ConcurrencyLimiter,
}

impl ClientSession {
    /// Creates a session from the run configuration
    pub fn new(config: &SeekerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            retry: RetryPolicy::from_config(config),
            limiter: ConcurrencyLimiter::new(
                config.max_concurrent_requests,
                config.connect_limit_per_host,
            ),
        })
    }

    pub fn limiter(&self) -> &ConcurrencyLimiter {
        &self.limiter
    }

    /// Sends a HEAD request
    pub async fn head(&self, url: &str) -> Result<SessionResponse, FetchError> {
        self.send(Method::HEAD, url).await
    }

    /// Sends a GET request
    pub async fn get(&self, url: &str) -> Result<SessionResponse, FetchError> {
        self.send(Method::GET, url).await
    }

    /// Sends a request, retrying per the session's policy
    ///
    /// A successful response keeps its admission permits until it is
    /// dropped, so reading the body still counts as in flight.
    pub async fn send(&self, method: Method, url: &str) -> Result<SessionResponse, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        let host = host_key(&parsed);
        let started = Instant::now();
        let mut attempt = 1;

        loop {
            if attempt > 1 {
                tracing::warn!(
                    "Retry attempt #{} of {}: {} {}",
                    attempt,
                    self.retry.max_tries,
                    method,
                    url
                );
            }

            let error = match self.attempt(&method, &parsed, url, &host).await {
                Ok(response) => return Ok(response),
                Err(error) => error,
            };

            if !error.is_retryable() {
                return Err(error);
            }

            match self.retry.next_delay(attempt, started) {
                Some(delay) => {
                    tracing::debug!("{} failed ({}), retrying in {:?}", url, error, delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                None => return Err(error),
            }
        }
    }

    /// Makes a single attempt; permits are released on every error path
    async fn attempt(
        &self,
        method: &Method,
        parsed: &Url,
        url: &str,
        host: &str,
    ) -> Result<SessionResponse, FetchError> {
        let admission = self.limiter.admit(host).await;

        let response = self
            .client
            .request(method.clone(), parsed.clone())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(SessionResponse {
            response,
            _admission: admission,
        })
    }
}

/// A successful response, holding its admission permits
#[derive(Debug)]
pub struct SessionResponse {
    response: Response,
    _admission: Admission,
}

impl SessionResponse {
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// Content-Type header value, if present and valid text
    pub fn content_type(&self) -> Option<&str> {
        self.response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Returns true if the Content-Type header describes HTML
    pub fn is_html(&self) -> bool {
        self.content_type().is_some_and(is_html_content_type)
    }

    /// Reads the body as text
    pub async fn text(self) -> Result<String, reqwest::Error> {
        self.response.text().await
    }
}
