//! Newsdesk turns a news headline or article URL into a content package: an
//! anchor script, anchor and social images, platform copy, B-roll stills and
//! text-to-video prompts.
//!
//! This crate re-exports the workspace crates behind one name and provides the
//! `newsdesk` command-line binary.
//!
//! # Example
//!
//! ```no_run
//! use newsdesk::{StudioConfig, gemini_studio};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StudioConfig::load()?;
//! let studio = gemini_studio(&config)?;
//! let run = studio
//!     .generate_single(None, Some("City announces new park"), None)
//!     .await?;
//! println!("{}", run.bundle().script());
//! for warning in run.warnings() {
//!     eprintln!("warning: {warning}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod observability;

pub use observability::init_tracing;

pub use newsdesk_core::{
    AspectRatio, ContentBundle, GeneratedImage, GenerationRequest, ImageRole, ImageSet,
    NewsTopic, ParagraphPrompt, ParagraphPromptSet, ReferenceImage, SocialMediaContent, Stage,
    StoryInput, StoryMode, StudioEvent,
};
pub use newsdesk_error::{
    BackendError, BackendErrorKind, BackendResult, ConfigError, StudioError, StudioErrorKind,
    StudioResult,
};
pub use newsdesk_interface::{
    ChannelSink, EventSink, FnSink, GenerationDriver, NullSink, RecordingSink,
};
pub use newsdesk_rate_limit::{PacingConfig, PacingPolicy, RetryConfig, RetryPolicy};
pub use newsdesk_studio::{
    ImageOrchestrator, MultiStoryContentGenerator, ParagraphPromptExpander, Studio, StudioConfig,
    StudioRun, Temperatures, TextContentGenerator,
};

#[cfg(feature = "gemini")]
pub use newsdesk_models::GeminiClient;

#[cfg(feature = "gemini")]
use std::sync::Arc;

/// Build a Gemini client from configuration.
///
/// Fails with [`StudioErrorKind::Configuration`] when no API key is set.
#[cfg(feature = "gemini")]
pub fn gemini_client(config: &StudioConfig) -> StudioResult<GeminiClient> {
    let key = config.require_api_key()?;
    Ok(GeminiClient::new(key)
        .with_models(config.text_model().as_str(), config.image_model().as_str())
        .with_base_url(config.base_url().as_str()))
}

/// Build a studio over Gemini that reports no events.
#[cfg(feature = "gemini")]
pub fn gemini_studio(config: &StudioConfig) -> StudioResult<Studio> {
    gemini_studio_with_sink(config, Arc::new(NullSink))
}

/// Build a studio over Gemini that reports events to `sink`.
#[cfg(feature = "gemini")]
pub fn gemini_studio_with_sink(
    config: &StudioConfig,
    sink: Arc<dyn EventSink>,
) -> StudioResult<Studio> {
    let client = gemini_client(config)?;
    tracing::info!(
        text_model = %config.text_model(),
        image_model = %config.image_model(),
        "Using Gemini backend"
    );
    Ok(Studio::with_sink(Arc::new(client), config, sink))
}
