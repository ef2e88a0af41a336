//! The content bundle produced by a text generation step.

use crate::{NewsTopic, SocialMediaContent};
use derive_builder::Builder;
use derive_getters::Getters;
use newsdesk_error::{StudioError, StudioErrorKind};
use serde::Serialize;

/// Marker separating the roundup intro from the full script.
pub const FULL_SCRIPT_MARKER: &str = "FULL SCRIPT:";

/// Whether a bundle covers one story or a roundup of several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoryMode {
    /// One URL or headline
    Single,
    /// Two or three headlines fused into one roundup
    Multi,
}

/// Structured text output of one generation run.
///
/// Bundles are immutable once built, except for the thumbnail prompt which the
/// user may edit before regenerating the thumbnail.
#[derive(Debug, Clone, PartialEq, Serialize, Builder, Getters)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct ContentBundle {
    /// Single story or roundup
    mode: StoryMode,
    /// Narration text; for roundups the intro and full script joined
    script: String,
    /// Roundup hook, kept separately from the composed script
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    intro_script: Option<String>,
    /// Roundup body, kept separately from the composed script
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    main_script: Option<String>,
    /// Secondary-language rendition of the main script
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    translated_script: Option<String>,
    /// Category label, always a member of the closed set
    #[builder(default)]
    topic: NewsTopic,
    /// Anchor background description (single story only)
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    background_description: Option<String>,
    /// One square-image description per story
    post_image_descriptions: Vec<String>,
    /// Platform copy
    social_media_content: SocialMediaContent,
    /// B-roll image prompts, in order
    video_image_prompts: Vec<String>,
    /// Text-to-video prompts, one per story
    story_video_prompts: Vec<String>,
    /// Text-to-video prompt for the roundup intro
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    intro_video_prompt: Option<String>,
    /// Roundup thumbnail prompt, editable after creation
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail_prompt: Option<String>,
}

impl ContentBundle {
    /// Creates a new builder for ContentBundle.
    pub fn builder() -> ContentBundleBuilder {
        ContentBundleBuilder::default()
    }

    /// Replace the thumbnail prompt. Nothing else in the bundle changes.
    pub fn set_thumbnail_prompt(&mut self, prompt: impl Into<String>) {
        self.thumbnail_prompt = Some(prompt.into());
    }

    /// Number of stories covered by this bundle.
    pub fn story_count(&self) -> usize {
        self.post_image_descriptions.len()
    }

    /// The text the paragraph prompt expander should work from.
    pub fn paragraph_source(&self) -> &str {
        match self.mode {
            StoryMode::Single => self.script.trim(),
            StoryMode::Multi => main_script_section(&self.script),
        }
    }
}

impl From<ContentBundleBuilderError> for StudioError {
    #[track_caller]
    fn from(err: ContentBundleBuilderError) -> Self {
        StudioError::new(StudioErrorKind::IncompleteGenerationResult(err.to_string()))
    }
}

/// Join a roundup intro and body into the narration script.
///
/// ```
/// use newsdesk_core::{compose_roundup_script, main_script_section};
///
/// let script = compose_roundup_script("Three big stories.", "First, markets rallied.");
/// assert!(script.starts_with("INTRO:\n"));
/// assert_eq!(main_script_section(&script), "First, markets rallied.");
/// ```
pub fn compose_roundup_script(intro: &str, main: &str) -> String {
    format!("INTRO:\n{intro}\n\n---\n\n{FULL_SCRIPT_MARKER}\n{main}")
}

/// The portion of a script after [`FULL_SCRIPT_MARKER`], or the whole script
/// when the marker is absent.
pub fn main_script_section(script: &str) -> &str {
    match script.split_once(FULL_SCRIPT_MARKER) {
        Some((_, main)) => main.trim(),
        None => script.trim(),
    }
}
