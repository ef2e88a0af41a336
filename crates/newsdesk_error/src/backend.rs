//! Generation backend error types and transient-error classification.

/// Failure conditions reported by a generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BackendErrorKind {
    /// Non-success HTTP status returned by the backend.
    #[display("HTTP {status_code} error: {message}")]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Response body or status text
        message: String,
    },
    /// The request never produced a response (connection, TLS, timeout).
    #[display("Transport error: {_0}")]
    Transport(String),
    /// The backend answered but the envelope could not be decoded.
    #[display("Failed to parse backend response: {_0}")]
    ResponseParsing(String),
    /// The backend refused the prompt outright.
    #[display("Request blocked: {_0}")]
    Blocked(String),
}

/// Backend error with source location tracking.
///
/// # Examples
///
/// ```
/// use newsdesk_error::{BackendError, BackendErrorKind, RetryableError};
///
/// let err = BackendError::new(BackendErrorKind::Http {
///     status_code: 429,
///     message: "RESOURCE_EXHAUSTED".to_string(),
/// });
/// assert!(err.is_retryable());
/// assert!(format!("{}", err).contains("RESOURCE_EXHAUSTED"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Backend Error: {} at line {} in {}", kind, line, file)]
pub struct BackendError {
    /// The kind of error that occurred
    pub kind: BackendErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl BackendError {
    /// Create a new BackendError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BackendErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// The HTTP status code, when the failure came with one.
    pub fn status_code(&self) -> Option<u16> {
        match &self.kind {
            BackendErrorKind::Http { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Result type for backend calls.
pub type BackendResult<T> = Result<T, BackendError>;

/// Trait for errors that may be retried with backoff.
///
/// Only transient conditions (rate limiting, resource exhaustion, internal
/// server errors) should report `true`.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl BackendError {
    /// The message carried by the kind, without the kind's prefix.
    pub fn message(&self) -> &str {
        match &self.kind {
            BackendErrorKind::Http { message, .. } => message,
            BackendErrorKind::Transport(message)
            | BackendErrorKind::ResponseParsing(message)
            | BackendErrorKind::Blocked(message) => message,
        }
    }
}

impl RetryableError for BackendError {
    fn is_retryable(&self) -> bool {
        let transient_status = self
            .status_code()
            .is_some_and(|status| status == 429 || (500..600).contains(&status));
        transient_status || is_transient_message(self.message())
    }
}

const STATUS_MARKERS: [&str; 2] = ["429", "500"];
const PHRASE_MARKERS: [&str; 3] = ["resource_exhausted", "rate limit", "internal error"];

/// Classify an error message as transient.
///
/// Matching is case-insensitive. The status markers `429` and `500` must
/// appear as whole numbers; the phrases `resource_exhausted`, `rate limit`
/// and `internal error` may appear anywhere.
///
/// ```
/// use newsdesk_error::is_transient_message;
///
/// assert!(is_transient_message("Status RESOURCE_EXHAUSTED: quota"));
/// assert!(is_transient_message("An Internal Error occurred"));
/// assert!(is_transient_message("upstream returned 500"));
/// assert!(!is_transient_message("400 invalid argument"));
/// assert!(!is_transient_message("prompt exceeds limit 5000 chars"));
/// ```
pub fn is_transient_message(message: &str) -> bool {
    let lowered = message.to_lowercase();
    let status_hit = lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|token| STATUS_MARKERS.contains(&token));
    status_hit || PHRASE_MARKERS.iter().any(|marker| lowered.contains(marker))
}
