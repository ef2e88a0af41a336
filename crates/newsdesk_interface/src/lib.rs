//! Trait interfaces for the Newsdesk content studio.
//!
//! - [`GenerationDriver`] - the generation backend boundary
//! - [`EventSink`] - receiver of structured studio events (re-exported from core)

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod driver;

pub use driver::GenerationDriver;
pub use newsdesk_core::{ChannelSink, EventSink, FnSink, NullSink, RecordingSink, StudioEvent};
