//! Response fetching strategies
//!
//! This module decides which requests are sent for a target:
//! - HEAD first, then GET only for on-site HTML pages (default)
//! - GET for every on-site target, HEAD-first for off-site ones
//!
//! Whatever happens, a fetch produces a [`FetchResult`]; errors are captured
//! into the result and never returned.

use crate::config::SeekerConfig;
use crate::crawler::error::FetchError;
use crate::crawler::session::{ClientSession, SessionResponse};
use crate::state::{FetchResult, Target};
use crate::timer::Timer;
use reqwest::StatusCode;
use std::sync::Arc;

/// How requests are issued for a target, chosen once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// HEAD, falling back to GET on 405; GET the body of on-site HTML
    HeadThenGetIfHtml,

    /// GET on-site targets directly; off-site targets as `HeadThenGetIfHtml`
    AlwaysGetIfOnsite,
}

impl FetchStrategy {
    pub fn from_config(config: &SeekerConfig) -> Self {
        if config.always_get_onsite {
            Self::AlwaysGetIfOnsite
        } else {
            Self::HeadThenGetIfHtml
        }
    }

    /// Fetches a target
    ///
    /// # Arguments
    ///
    /// * `session` - The run's client session
    /// * `target` - The target to fetch
    ///
    /// # Returns
    ///
    /// A result with the status of the first response, the body for on-site
    /// HTML pages, or the error that stopped the fetch. `elapsed` covers the
    /// time until the first response, or until the failure.
    pub async fn fetch(&self, session: &ClientSession, target: Arc<Target>) -> FetchResult {
        let mut result = FetchResult::new(Arc::clone(&target));
        let mut timer = Timer::start();

        let outcome = match self {
            Self::AlwaysGetIfOnsite if target.is_onsite() => {
                get_page(session, &target, &mut result, &mut timer).await
            }
            _ => head_then_get(session, &target, &mut result, &mut timer).await,
        };

        if let Err(error) = outcome {
            if let Some(status) = error.status() {
                result.status = Some(status);
            }
            result.error = Some(error);
        }
        result.elapsed = timer.stop();

        result
    }
}

/// Sends HEAD and follows up with GET when the body is needed
///
/// A 405 answer to HEAD is not a failure: the GET that replaces it provides
/// the status and, for on-site HTML, the body. Exactly one GET is sent in
/// that case.
async fn head_then_get(
    session: &ClientSession,
    target: &Target,
    result: &mut FetchResult,
    timer: &mut Timer,
) -> Result<(), FetchError> {
    let is_html = match session.head(target.url()).await {
        Ok(response) => {
            timer.stop();
            result.status = Some(response.status());
            response.is_html()
        }
        Err(FetchError::Status { status, .. }) if status == StatusCode::METHOD_NOT_ALLOWED => {
            tracing::debug!("HEAD not allowed for {}, using GET", target.url());
            return get_page(session, target, result, timer).await;
        }
        Err(error) => return Err(error),
    };

    if is_html && target.is_onsite() {
        get_page(session, target, result, timer).await?;
    }

    Ok(())
}

/// Sends GET, keeping the body of on-site HTML pages
async fn get_page(
    session: &ClientSession,
    target: &Target,
    result: &mut FetchResult,
    timer: &mut Timer,
) -> Result<(), FetchError> {
    let response = session.get(target.url()).await?;
    timer.stop();
    result.status = Some(response.status());

    if response.is_html() && target.is_onsite() {
        result.html = Some(read_body(target, response).await?);
    }

    Ok(())
}

async fn read_body(target: &Target, response: SessionResponse) -> Result<String, FetchError> {
    response.text().await.map_err(|source| FetchError::Body {
        url: target.url().to_string(),
        source,
    })
}
