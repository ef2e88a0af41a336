//! Multi-story roundup generation.

use crate::extraction::parse_structured;
use crate::prompts;
use newsdesk_core::{
    ContentBundle, GenerateRequest, Input, MAX_STORIES, MIN_STORIES, SocialMediaContent,
    StoryInput, StoryMode, compose_roundup_script,
};
use newsdesk_error::{StudioError, StudioErrorKind, StudioResult};
use newsdesk_interface::GenerationDriver;
use newsdesk_rate_limit::RetryableCaller;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MultiStoryResponse {
    intro_script: String,
    main_script: String,
    translated_script: String,
    thumbnail_prompt: String,
    post_image_descriptions: Vec<String>,
    social_media_content: SocialMediaContent,
    video_image_prompts: Vec<String>,
    intro_video_prompt: String,
    story_video_prompts: Vec<String>,
}

/// Fuses two or three headlines into one roundup [`ContentBundle`].
///
/// Validation is strict. Every field must be present and non-empty, and the
/// per-story arrays must have one entry per headline; nothing is substituted.
#[derive(Clone)]
pub struct MultiStoryContentGenerator {
    driver: Arc<dyn GenerationDriver>,
    caller: RetryableCaller,
    temperature: f32,
    translation_language: String,
}

impl std::fmt::Debug for MultiStoryContentGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiStoryContentGenerator")
            .field("provider", &self.driver.provider_name())
            .field("temperature", &self.temperature)
            .field("translation_language", &self.translation_language)
            .finish_non_exhaustive()
    }
}

impl MultiStoryContentGenerator {
    /// Create a generator producing a translation into `translation_language`.
    pub fn new(
        driver: Arc<dyn GenerationDriver>,
        caller: RetryableCaller,
        temperature: f32,
        translation_language: impl Into<String>,
    ) -> Self {
        Self {
            driver,
            caller,
            temperature,
            translation_language: translation_language.into(),
        }
    }

    /// Generate a roundup for `stories`, in order.
    #[instrument(skip(self, stories), fields(stories = stories.len()))]
    pub async fn generate(&self, stories: &[StoryInput]) -> StudioResult<ContentBundle> {
        if !(MIN_STORIES..=MAX_STORIES).contains(&stories.len())
            || stories.iter().any(|story| story.headline.trim().is_empty())
        {
            return Err(StudioError::new(StudioErrorKind::InvalidInput(format!(
                "A roundup needs {MIN_STORIES} to {MAX_STORIES} non-empty headlines"
            ))));
        }

        let headlines: Vec<&str> = stories.iter().map(|story| story.headline.trim()).collect();
        let has_images = stories.iter().any(|story| story.image.is_some());

        let mut inputs = vec![Input::Text(prompts::multi_story_prompt(
            &headlines,
            has_images,
            &self.translation_language,
        ))];
        inputs.extend(
            stories
                .iter()
                .filter_map(|story| story.image.clone())
                .map(Input::Image),
        );

        let request = GenerateRequest::builder()
            .inputs(inputs)
            .temperature(self.temperature)
            .response_schema(Some(prompts::multi_story_schema(
                stories.len(),
                &self.translation_language,
            )))
            .build()?;

        let response = self
            .caller
            .call("multi_story_text", || self.driver.generate(&request))
            .await?;
        let text = response.text();
        debug!(chars = text.len(), "Received roundup response");

        let raw: MultiStoryResponse = parse_structured(&text)?;
        let bundle = into_bundle(raw, stories.len())?;
        info!(
            stories = bundle.story_count(),
            b_roll = bundle.video_image_prompts().len(),
            "Roundup content generated"
        );
        Ok(bundle)
    }
}

fn required(field: &str, value: &str) -> StudioResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StudioError::new(StudioErrorKind::IncompleteGenerationResult(
            format!("'{field}' is empty"),
        )));
    }
    Ok(trimmed.to_string())
}

fn per_story(field: &str, values: Vec<String>, expected: usize) -> StudioResult<Vec<String>> {
    if values.len() != expected {
        return Err(StudioError::new(StudioErrorKind::IncompleteGenerationResult(
            format!(
                "'{field}' has {} entries but {expected} stories were requested",
                values.len()
            ),
        )));
    }
    Ok(values.into_iter().map(|value| value.trim().to_string()).collect())
}

fn into_bundle(raw: MultiStoryResponse, story_count: usize) -> StudioResult<ContentBundle> {
    let intro = required("introScript", &raw.intro_script)?;
    let main = required("mainScript", &raw.main_script)?;

    let bundle = ContentBundle::builder()
        .mode(StoryMode::Multi)
        .script(compose_roundup_script(&intro, &main))
        .intro_script(Some(intro))
        .main_script(Some(main))
        .translated_script(Some(required("translatedScript", &raw.translated_script)?))
        .thumbnail_prompt(Some(required("thumbnailPrompt", &raw.thumbnail_prompt)?))
        .intro_video_prompt(Some(required("introVideoPrompt", &raw.intro_video_prompt)?))
        .post_image_descriptions(per_story(
            "postImageDescriptions",
            raw.post_image_descriptions,
            story_count,
        )?)
        .story_video_prompts(per_story(
            "storyVideoPrompts",
            raw.story_video_prompts,
            story_count,
        )?)
        .social_media_content(raw.social_media_content)
        .video_image_prompts(
            raw.video_image_prompts
                .into_iter()
                .map(|prompt| prompt.trim().to_string())
                .filter(|prompt| !prompt.is_empty())
                .collect::<Vec<_>>(),
        )
        .build()?;
    Ok(bundle)
}
