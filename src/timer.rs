//! Elapsed time measurement

use std::time::{Duration, Instant};

/// Measures wall time from creation until the first call to [`Timer::stop`]
///
/// Once stopped, the timer is frozen: later calls to `stop` return the same
/// duration. The fetcher relies on this to report the latency of the first
/// response even when a follow-up request is issued.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
    end: Option<Instant>,
}

impl Timer {
    /// Starts a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            end: None,
        }
    }

    /// Stops the timer (if still running) and returns the measured duration
    pub fn stop(&mut self) -> Duration {
        let end = *self.end.get_or_insert_with(Instant::now);
        end.duration_since(self.start)
    }

    /// Milliseconds measured so far, up to the stop instant if stopped
    pub fn elapsed_ms(&self) -> f64 {
        let end = self.end.unwrap_or_else(Instant::now);
        as_millis_f64(end.duration_since(self.start))
    }
}

/// Converts a duration to fractional milliseconds
pub fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
