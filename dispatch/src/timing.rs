//! Wall-clock timing for dispatch calls.
//!
//! The dispatcher starts one [`ExecutionTimer`] per call and reads
//! [`ExecutionTimer::elapsed_ms`] for the execution-end event. Dropping the
//! timer also emits a `trace` event, which is handy when chasing slow handlers
//! without turning on performance logging.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct ExecutionTimer {
    operation: String,
    start: Instant,
}

impl ExecutionTimer {
    /// Create and start a new timer
    pub fn start(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            start: Instant::now(),
        }
    }

    /// Get elapsed time without stopping the timer
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed whole milliseconds, saturating at `u64::MAX`
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }
}

impl Drop for ExecutionTimer {
    fn drop(&mut self) {
        tracing::trace!(
            operation = %self.operation,
            elapsed_ms = self.elapsed_ms(),
            "Operation completed"
        );
    }
}
