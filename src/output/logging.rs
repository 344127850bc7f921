//! One log line per completed fetch
//!
//! Successes are logged at info level:
//!
//! ```text
//! 200 - https://example.com/about.html - 12.34 ms
//! ```
//!
//! Failures at error level, with the pages that led to the broken link:
//!
//! ```text
//! HttpResponseError: 404 - https://example.com/gone.html - found by navigating through: https://example.com/ -> https://example.com/about.html
//! ```

use crate::output::traits::ResponseObserver;
use crate::state::FetchResult;

/// Prefix that turns a log line into a GitHub workflow error annotation
pub const ERROR_ANNOTATION: &str = "::error ::";

/// Observer that logs every result through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver {
    /// Prefix failure lines with a workflow error annotation
    annotate: bool,
}

impl LoggingObserver {
    pub fn new(annotate: bool) -> Self {
        Self { annotate }
    }

    /// Line logged for a successful fetch
    pub fn success_line(result: &FetchResult) -> String {
        let status = result
            .status
            .map(|s| s.as_u16().to_string())
            .unwrap_or_else(|| "-".to_string());
        format!("{} - {} - {:.2} ms", status, result.url(), result.elapsed_ms())
    }

    /// Line logged for a failed fetch
    ///
    /// Shows the status code when a response was received, the error message
    /// otherwise.
    pub fn failure_line(&self, result: &FetchResult) -> String {
        let (kind, detail) = match &result.error {
            Some(error) => (error.kind(), error.detail()),
            None => ("UnknownError", String::new()),
        };
        let detail = match result.status {
            Some(status) => status.as_u16().to_string(),
            None => detail,
        };

        let mut line = format!(
            "{}{}: {} - {}",
            if self.annotate { ERROR_ANNOTATION } else { "" },
            kind,
            detail,
            result.url()
        );

        let path = result.target.parent_urls();
        if !path.is_empty() {
            line.push_str(" - found by navigating through: ");
            line.push_str(&path.join(" -> "));
        }

        line
    }
}

impl ResponseObserver for LoggingObserver {
    fn on_response(&self, result: &FetchResult) {
        match &result.error {
            Some(error) => {
                tracing::error!("{}", self.failure_line(result));
                tracing::debug!("The following error occurred: {:?}", error);
            }
            None => tracing::info!("{}", Self::success_line(result)),
        }
    }
}
