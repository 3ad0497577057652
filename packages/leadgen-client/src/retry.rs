//! Retry with exponential backoff, as a plain policy value.
//!
//! The policy knows nothing about HTTP beyond a status predicate; the
//! operation decides what counts as a failed attempt.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Default predicate: retry every non-success status except 400 and 404,
/// which point at a defect in the request itself.
pub fn default_retryable_status(status: u16) -> bool {
    !(200..300).contains(&status) && status != 400 && status != 404
}

/// How many times to try, how long to wait, and which statuses are transient.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts including the first (minimum 1)
    pub max_attempts: u32,

    /// Wait before the first retry
    pub base_delay: Duration,

    /// Factor applied to the wait after every retry
    pub multiplier: u32,

    /// Whether a response status should be retried
    pub retryable_status: fn(u16) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            multiplier: 2,
            retryable_status: default_retryable_status,
        }
    }
}

/// The last failure after every attempt was used up.
#[derive(Debug)]
pub struct RetryError<E> {
    pub attempts: u32,
    pub last_error: E,
}

impl RetryPolicy {
    /// Policy that tries exactly once.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_retryable_status(mut self, predicate: fn(u16) -> bool) -> Self {
        self.retryable_status = predicate;
        self
    }

    /// Whether `status` should be retried under this policy.
    pub fn is_retryable_status(&self, status: u16) -> bool {
        (self.retryable_status)(status)
    }

    /// Wait before retry number `retry` (0-based): `base * multiplier^retry`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(self.multiplier.saturating_pow(retry))
    }

    /// Every wait the policy would perform, in order.
    pub fn delays(&self) -> Vec<Duration> {
        (0..self.max_attempts.max(1) - 1)
            .map(|retry| self.delay_for(retry))
            .collect()
    }

    /// Run `operation` until it succeeds or attempts run out.
    ///
    /// The operation receives the 1-based attempt number. Every `Err` is
    /// treated as retryable; operations return `Ok` for outcomes that must
    /// reach the caller unchanged.
    pub async fn execute<T, E, F, Fut>(&self, mut operation: F) -> Result<T, RetryError<E>>
    where
        E: Display,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) if attempt >= max_attempts => {
                    return Err(RetryError {
                        attempts: attempt,
                        last_error: error,
                    });
                }
                Err(error) => {
                    let delay = self.delay_for(attempt - 1);
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
