//! Exponential backoff for transient remote failures.

use derive_getters::Getters;
use newsdesk_core::{EventSink, NullSink, StudioEvent};
use newsdesk_error::RetryableError;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// How many times to retry and how long to wait.
///
/// The wait before retry `n` (starting at 1) is `initial_delay * 2^(n-1)`.
///
/// # Examples
///
/// ```
/// use newsdesk_rate_limit::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(*policy.max_retries(), 3);
/// assert_eq!(policy.delay_for(1), Duration::from_secs(5));
/// assert_eq!(policy.delay_for(3), Duration::from_secs(20));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt
    max_retries: u32,
    /// Wait before the first retry
    initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(5000),
        }
    }
}

impl RetryPolicy {
    /// Create a policy.
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
        }
    }

    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Backoff before the given retry (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(31);
        self.initial_delay.saturating_mul(1u32 << exponent)
    }
}

/// Run `operation`, retrying transient failures according to `policy`.
///
/// Non-transient errors and the error of the last permitted attempt are
/// returned unchanged.
#[instrument(skip(sink, operation))]
pub async fn retry_with_backoff<F, Fut, T, E>(
    policy: &RetryPolicy,
    sink: &dyn EventSink,
    label: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: RetryableError + Display,
{
    let mut retries = 0u32;

    loop {
        match operation().await {
            Ok(value) => {
                if retries > 0 {
                    debug!(label, retries, "Operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) => {
                if !err.is_retryable() {
                    debug!(label, error = %err, "Error is not retryable, failing immediately");
                    return Err(err);
                }
                if retries >= policy.max_retries {
                    warn!(label, retries, error = %err, "All retry attempts exhausted");
                    return Err(err);
                }

                retries += 1;
                let delay = policy.delay_for(retries);
                warn!(
                    label,
                    attempt = retries,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Transient error, retrying"
                );
                sink.emit(StudioEvent::RetryScheduled {
                    attempt: retries,
                    max_retries: policy.max_retries,
                    delay,
                });
                sleep(delay).await;
            }
        }
    }
}

/// A reusable retry wrapper bound to a policy and an event sink.
///
/// Holds no per-call state, so one caller can wrap every remote call of a
/// studio.
#[derive(Debug, Clone)]
pub struct RetryableCaller {
    policy: RetryPolicy,
    sink: Arc<dyn EventSink>,
}

impl Default for RetryableCaller {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl RetryableCaller {
    /// Create a caller that reports nothing.
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            sink: Arc::new(NullSink),
        }
    }

    /// Report retry events to `sink`.
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The policy in force.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute `operation` with retries.
    pub async fn call<F, Fut, T, E>(&self, label: &str, operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: RetryableError + Display,
    {
        retry_with_backoff(&self.policy, self.sink.as_ref(), label, operation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_double_from_initial() {
        let policy = RetryPolicy::new(4, Duration::from_millis(100));
        let delays: Vec<_> = (1..=4).map(|n| policy.delay_for(n)).collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(400),
                Duration::from_millis(800),
            ]
        );
    }

    #[test]
    fn exponent_is_capped() {
        let policy = RetryPolicy::new(u32::MAX, Duration::from_secs(1));
        assert_eq!(policy.delay_for(200), Duration::from_secs(1 << 31));
    }
}
