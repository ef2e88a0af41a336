//! Core data types for the Newsdesk content studio.
//!
//! This crate provides the value objects shared by every stage of a generation
//! run: requests, content bundles, image sets and the events emitted while a
//! run is in progress.

mod bundle;
mod events;
mod generation;
mod image_set;
mod input;
mod media;
mod paragraph;
mod request;
mod social;
mod topic;

pub use bundle::{
    ContentBundle, ContentBundleBuilder, ContentBundleBuilderError, FULL_SCRIPT_MARKER, StoryMode,
    compose_roundup_script, main_script_section,
};
pub use events::{ChannelSink, EventSink, FnSink, NullSink, RecordingSink, Stage, StudioEvent};
pub use generation::{GenerationRequest, MAX_STORIES, MIN_STORIES, StoryInput};
pub use image_set::{ImageRole, ImageSet, MultiStoryImages, SingleStoryImages};
pub use input::Input;
pub use media::{AspectRatio, GeneratedImage, ReferenceImage};
pub use paragraph::{ParagraphPrompt, ParagraphPromptSet};
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateRequestBuilderError, GenerateResponse,
    ImageRequest, Output,
};
pub use social::{PlatformPost, SocialMediaContent, YoutubeContent};
pub use topic::NewsTopic;
