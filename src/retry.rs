//! Bounded retries with exponential backoff for filesystem work.
//!
//! Delays are blocking sleeps: the batch jobs are sequential, so a retry simply holds up the
//! remaining files for a moment.

use crate::error::Result;
use std::thread;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How often and how patiently to retry a failing operation.
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay after the first failure; doubles after each further failure.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    /// Delay to wait after failed attempt number `attempt` (1-based): 1s, 2s, 4s, ...
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.initial_delay.saturating_mul(1 << exponent)
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or attempts run out.
    ///
    /// `op` receives the 1-based attempt number. `label` identifies the work in log output.
    ///
    /// # Errors
    ///
    /// Returns the error of the final attempt, or the first non-retryable error.
    pub fn run<T>(&self, label: &str, mut op: impl FnMut(u32) -> Result<T>) -> Result<T> {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) if attempt >= max_attempts => {
                    tracing::error!(label, attempts = attempt, %err, "giving up");
                    return Err(err);
                }
                Err(err) => {
                    let delay = self.delay_after(attempt);
                    tracing::warn!(
                        label,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        %err,
                        "attempt failed, retrying"
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/retry.rs"]
mod tests;
