//! Retry timing and attempt-count behavior under virtual time.

use newsdesk_core::{RecordingSink, StudioEvent};
use newsdesk_error::{BackendError, BackendErrorKind, BackendResult};
use newsdesk_rate_limit::{RetryPolicy, RetryableCaller};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

fn rate_limited() -> BackendError {
    BackendError::new(BackendErrorKind::Http {
        status_code: 429,
        message: "RESOURCE_EXHAUSTED".to_string(),
    })
}

fn bad_request() -> BackendError {
    BackendError::new(BackendErrorKind::Http {
        status_code: 400,
        message: "invalid argument".to_string(),
    })
}

/// Runs `outcomes` in order, recording when each attempt started.
async fn run_scripted(
    caller: &RetryableCaller,
    outcomes: Vec<BackendResult<u32>>,
) -> (BackendResult<u32>, Vec<Duration>) {
    let start = Instant::now();
    let attempts = Arc::new(Mutex::new(Vec::new()));
    let script = Arc::new(Mutex::new(outcomes.into_iter()));

    let result = caller
        .call("scripted", || {
            let attempts = Arc::clone(&attempts);
            let script = Arc::clone(&script);
            async move {
                attempts.lock().expect("lock").push(start.elapsed());
                script
                    .lock()
                    .expect("lock")
                    .next()
                    .unwrap_or_else(|| Err(bad_request()))
            }
        })
        .await;

    let attempts = attempts.lock().expect("lock").clone();
    (result, attempts)
}

#[tokio::test(start_paused = true)]
async fn transient_errors_back_off_exponentially() {
    let caller = RetryableCaller::default();
    let outcomes = vec![Err(rate_limited()); 4];

    let (result, attempts) = run_scripted(&caller, outcomes).await;

    let err = result.expect_err("budget exhausted");
    assert_eq!(err.status_code(), Some(429));
    assert_eq!(
        attempts,
        vec![
            Duration::ZERO,
            Duration::from_secs(5),
            Duration::from_secs(15),
            Duration::from_secs(35),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn attempts_never_exceed_budget_plus_one() {
    for budget in 0..4 {
        let caller = RetryableCaller::new(RetryPolicy::new(budget, Duration::from_millis(10)));
        let outcomes = vec![Err(rate_limited()); 10];
        let (_, attempts) = run_scripted(&caller, outcomes).await;
        assert_eq!(attempts.len(), budget as usize + 1);
    }
}

#[tokio::test(start_paused = true)]
async fn non_transient_error_fails_immediately() {
    let caller = RetryableCaller::default();
    let (result, attempts) = run_scripted(&caller, vec![Err(bad_request()), Ok(1)]).await;

    let err = result.expect_err("not retried");
    assert_eq!(err.status_code(), Some(400));
    assert_eq!(attempts, vec![Duration::ZERO]);
}

#[tokio::test(start_paused = true)]
async fn recovers_after_transient_failure() {
    let internal = BackendError::new(BackendErrorKind::Transport(
        "upstream internal error".to_string(),
    ));
    let caller = RetryableCaller::default();
    let (result, attempts) = run_scripted(&caller, vec![Err(internal), Ok(7)]).await;

    assert_eq!(result.expect("second attempt succeeds"), 7);
    assert_eq!(attempts, vec![Duration::ZERO, Duration::from_secs(5)]);
}

#[tokio::test(start_paused = true)]
async fn retries_are_reported_to_the_sink() {
    let sink = Arc::new(RecordingSink::new());
    let caller = RetryableCaller::new(RetryPolicy::new(2, Duration::from_secs(1)))
        .with_sink(sink.clone());

    let _ = run_scripted(&caller, vec![Err(rate_limited()); 3]).await;

    let delays: Vec<_> = sink
        .events()
        .into_iter()
        .filter_map(|event| match event {
            StudioEvent::RetryScheduled { attempt, delay, .. } => Some((attempt, delay)),
            _ => None,
        })
        .collect();
    assert_eq!(
        delays,
        vec![(1, Duration::from_secs(1)), (2, Duration::from_secs(2))]
    );
}
