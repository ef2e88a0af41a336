//! Structured events emitted while a generation run is in progress.
//!
//! Events complement `tracing` diagnostics: they are meant for callers that
//! want to observe retries, pacing and fallbacks without installing a
//! subscriber.

use crate::ImageRole;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Pipeline stages of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// Script and metadata generation
    TextGeneration,
    /// Anchor, post and thumbnail images
    Images,
    /// B-roll batch
    BRoll,
    /// Paragraph prompt expansion
    ParagraphPrompts,
}

/// Observable occurrences during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudioEvent {
    /// A transient failure will be retried after `delay`.
    RetryScheduled {
        /// Retry number, starting at 1
        attempt: u32,
        /// Retry budget
        max_retries: u32,
        /// Wait before the next attempt
        delay: Duration,
    },
    /// A remote call waited for the pacer.
    CallPaced {
        /// Time spent waiting
        waited: Duration,
    },
    /// An image was produced for a role.
    ImageGenerated {
        /// Role that received the image
        role: ImageRole,
    },
    /// A role ended without an image.
    ImageMissing {
        /// Role left empty
        role: ImageRole,
    },
    /// The primary prompt failed and the fallback prompt was tried.
    FallbackUsed {
        /// Role being retried with the fallback
        role: ImageRole,
    },
    /// A B-roll prompt produced nothing and was dropped.
    BRollSkipped {
        /// Index of the prompt in the input list
        index: usize,
    },
    /// A user-visible, non-fatal warning was recorded.
    Warning(String),
    /// A stage began.
    StageStarted(Stage),
    /// A stage ended.
    StageFinished(Stage),
}

/// Receiver of studio events.
pub trait EventSink: Send + Sync + std::fmt::Debug {
    /// Deliver one event. Must not block.
    fn emit(&self, event: StudioEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: StudioEvent) {}
}

/// Forwards events into an unbounded tokio channel.
///
/// Events are dropped silently once the receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: UnboundedSender<StudioEvent>,
}

impl ChannelSink {
    /// Wrap a channel sender.
    pub fn new(sender: UnboundedSender<StudioEvent>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: StudioEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("Event receiver dropped");
        }
    }
}

/// Calls a closure for each event.
pub struct FnSink<F>(pub F);

impl<F> std::fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnSink")
    }
}

impl<F> EventSink for FnSink<F>
where
    F: Fn(StudioEvent) + Send + Sync,
{
    fn emit(&self, event: StudioEvent) {
        (self.0)(event)
    }
}

/// Keeps every event in memory, mainly for tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<StudioEvent>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<StudioEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: StudioEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
