//! Retry and pacing for remote generation calls.
//!
//! - [`RetryableCaller`] re-runs an operation on transient failures with
//!   exponential backoff.
//! - [`RequestPacer`] keeps consecutive calls apart, either by a fixed minimum
//!   interval or by a GCRA quota.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod pacer;
mod retry;

pub use config::{PacingConfig, RetryConfig};
pub use pacer::{PacerPermit, PacingPolicy, RequestPacer};
pub use retry::{RetryPolicy, RetryableCaller, retry_with_backoff};
