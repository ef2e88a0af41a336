//! Spacing between consecutive remote calls.
//!
//! The image backend rejects bursts, so image calls are issued one at a time
//! with a pause between them. The pause is a policy: either a fixed minimum
//! interval measured from the end of the previous call, or a GCRA quota.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use newsdesk_core::{EventSink, NullSink, StudioEvent};
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, trace};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// How consecutive calls are spaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingPolicy {
    /// Wait until at least this long has passed since the previous call finished.
    FixedInterval(Duration),
    /// Allow this many calls per minute, smoothed by GCRA.
    PerMinute(NonZeroU32),
    /// No spacing.
    Unpaced,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self::FixedInterval(Duration::from_millis(15_000))
    }
}

/// Spaces out remote calls according to a [`PacingPolicy`].
///
/// # Examples
///
/// ```
/// use newsdesk_rate_limit::{PacingPolicy, RequestPacer};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let pacer = RequestPacer::new(PacingPolicy::FixedInterval(Duration::from_millis(10)));
/// {
///     let _permit = pacer.acquire().await;
///     // ... remote call ...
/// }
/// let _next = pacer.acquire().await; // waits roughly 10ms
/// # }
/// ```
pub struct RequestPacer {
    policy: PacingPolicy,
    limiter: Option<DirectRateLimiter>,
    last_completed: Mutex<Option<Instant>>,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for RequestPacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPacer")
            .field("policy", &self.policy)
            .field("last_completed", &self.last_completed)
            .finish_non_exhaustive()
    }
}

impl RequestPacer {
    /// Create a pacer that reports nothing.
    pub fn new(policy: PacingPolicy) -> Self {
        let limiter = match policy {
            PacingPolicy::PerMinute(rpm) => Some(RateLimiter::direct(Quota::per_minute(rpm))),
            PacingPolicy::FixedInterval(_) | PacingPolicy::Unpaced => None,
        };
        Self {
            policy,
            limiter,
            last_completed: Mutex::new(None),
            sink: Arc::new(NullSink),
        }
    }

    /// Report pacing waits to `sink`.
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The policy in force.
    pub fn policy(&self) -> PacingPolicy {
        self.policy
    }

    /// Wait for the next slot.
    ///
    /// Hold the returned permit for the duration of the call; dropping it
    /// marks the call finished.
    pub async fn acquire(&self) -> PacerPermit<'_> {
        let started = Instant::now();

        match self.policy {
            PacingPolicy::FixedInterval(interval) => {
                if let Some(previous) = self.last_completed() {
                    let ready_at = previous + interval;
                    if ready_at > started {
                        debug!(
                            wait_ms = (ready_at - started).as_millis() as u64,
                            "Pacing before next call"
                        );
                        sleep_until(ready_at).await;
                    }
                }
            }
            PacingPolicy::PerMinute(_) => {
                if let Some(limiter) = &self.limiter {
                    limiter.until_ready().await;
                }
            }
            PacingPolicy::Unpaced => {}
        }

        let waited = started.elapsed();
        if !waited.is_zero() {
            self.sink.emit(StudioEvent::CallPaced { waited });
        }
        trace!(waited_ms = waited.as_millis() as u64, "Pacer slot acquired");
        PacerPermit { pacer: self }
    }

    fn last_completed(&self) -> Option<Instant> {
        match self.last_completed.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn mark_completed(&self) {
        let now = Instant::now();
        match self.last_completed.lock() {
            Ok(mut guard) => *guard = Some(now),
            Err(poisoned) => *poisoned.into_inner() = Some(now),
        }
    }
}

/// Proof that the pacer granted a slot. Dropping it records completion.
#[derive(Debug)]
pub struct PacerPermit<'a> {
    pacer: &'a RequestPacer,
}

impl Drop for PacerPermit<'_> {
    fn drop(&mut self) {
        self.pacer.mark_completed();
    }
}
