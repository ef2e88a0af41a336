//! Errors surfaced by studio operations.

use crate::{BackendError, ConfigError};

/// Failure conditions of a studio operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StudioErrorKind {
    /// A remote call failed permanently or exhausted its retry budget.
    ///
    /// Holds the backend's message verbatim.
    #[display("Remote call failed: {_0}")]
    RemoteCallFailed(String),
    /// The response could not be read as a JSON object.
    #[display("Malformed response: {_0}")]
    MalformedResponse(String),
    /// The JSON was readable but required fields were missing or mistyped.
    #[display("Incomplete generation result: {_0}")]
    IncompleteGenerationResult(String),
    /// Every image in a required batch is absent after fallbacks.
    #[display("All images failed: {_0}")]
    AllImagesFailed(String),
    /// Startup configuration is missing or invalid.
    #[display("Configuration error: {_0}")]
    Configuration(String),
    /// Caller-supplied input was rejected before any remote call.
    #[display("Invalid input: {_0}")]
    InvalidInput(String),
}

/// Studio error with location tracking.
///
/// # Examples
///
/// ```
/// use newsdesk_error::{StudioError, StudioErrorKind};
///
/// let err = StudioError::new(StudioErrorKind::InvalidInput("headline is empty".into()));
/// assert!(matches!(err.kind, StudioErrorKind::InvalidInput(_)));
/// assert!(err.to_string().contains("headline is empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Studio Error: {} at line {} in {}", kind, line, file)]
pub struct StudioError {
    /// The specific error kind.
    pub kind: StudioErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// File where error occurred.
    pub file: &'static str,
}

impl StudioError {
    /// Creates a new error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StudioErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StudioErrorKind {
        &self.kind
    }
}

impl From<BackendError> for StudioError {
    #[track_caller]
    fn from(err: BackendError) -> Self {
        Self::new(StudioErrorKind::RemoteCallFailed(err.kind.to_string()))
    }
}

impl From<ConfigError> for StudioError {
    #[track_caller]
    fn from(err: ConfigError) -> Self {
        Self::new(StudioErrorKind::Configuration(err.message))
    }
}

/// Result type for studio operations.
pub type StudioResult<T> = Result<T, StudioError>;
