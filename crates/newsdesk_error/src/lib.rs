//! Error types for the Newsdesk content studio.
//!
//! Every error carries the source location where it was created, following the
//! `kind` + `line` + `file` pattern used throughout the workspace.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod backend;
mod config;
mod studio;

pub use backend::{BackendError, BackendErrorKind, BackendResult, RetryableError, is_transient_message};
pub use config::ConfigError;
pub use studio::{StudioError, StudioErrorKind, StudioResult};
