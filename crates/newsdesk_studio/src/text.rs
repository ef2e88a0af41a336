//! Single-story script and metadata generation.

use crate::extraction::parse_structured;
use crate::prompts;
use crate::Temperatures;
use newsdesk_core::{
    ContentBundle, GenerateRequest, Input, NewsTopic, ReferenceImage, SocialMediaContent,
    StoryMode,
};
use newsdesk_error::{StudioError, StudioErrorKind, StudioResult};
use newsdesk_interface::GenerationDriver;
use newsdesk_rate_limit::RetryableCaller;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Fields a single-story response must carry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SingleStoryResponse {
    script: String,
    topic: String,
    background_description: String,
    post_image_description: String,
    social_media_content: SocialMediaContent,
    video_image_prompts: Vec<String>,
    story_video_prompts: Vec<String>,
}

/// Builds a [`ContentBundle`] for one article URL or headline.
///
/// Exactly one text call is made per bundle. The response is validated as a
/// whole: a bundle is either complete or the call fails.
#[derive(Clone)]
pub struct TextContentGenerator {
    driver: Arc<dyn GenerationDriver>,
    caller: RetryableCaller,
    temperatures: Temperatures,
}

impl std::fmt::Debug for TextContentGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextContentGenerator")
            .field("provider", &self.driver.provider_name())
            .field("retry", self.caller.policy())
            .field("temperatures", &self.temperatures)
            .finish()
    }
}

impl TextContentGenerator {
    /// Create a generator over `driver`, retrying through `caller`.
    pub fn new(
        driver: Arc<dyn GenerationDriver>,
        caller: RetryableCaller,
        temperatures: Temperatures,
    ) -> Self {
        Self {
            driver,
            caller,
            temperatures,
        }
    }

    /// Generate from an article URL.
    ///
    /// Without a reference image the model may consult web search to read the
    /// page. With one, search is off and the image drives the visual
    /// descriptions.
    #[instrument(skip(self, image), fields(has_image = image.is_some()))]
    pub async fn generate_from_url(
        &self,
        url: &str,
        image: Option<&ReferenceImage>,
    ) -> StudioResult<ContentBundle> {
        let request = GenerateRequest::builder()
            .inputs(inputs(prompts::url_prompt(url, image.is_some()), image))
            .temperature(self.temperatures.url)
            .web_search(image.is_none())
            .build()?;

        self.run(request).await
    }

    /// Generate from a headline in any language.
    #[instrument(skip(self, image), fields(has_image = image.is_some()))]
    pub async fn generate_from_headline(
        &self,
        headline: &str,
        language: Option<&str>,
        image: Option<&ReferenceImage>,
    ) -> StudioResult<ContentBundle> {
        if headline.trim().is_empty() {
            return Err(StudioError::new(StudioErrorKind::InvalidInput(
                "Headline must not be empty".to_string(),
            )));
        }

        let prompt = prompts::headline_prompt(headline.trim(), language, image.is_some());
        let request = GenerateRequest::builder()
            .inputs(inputs(prompt, image))
            .temperature(self.temperatures.headline)
            .response_schema(Some(prompts::single_story_schema()))
            .build()?;

        self.run(request).await
    }

    async fn run(&self, request: GenerateRequest) -> StudioResult<ContentBundle> {
        let response = self
            .caller
            .call("single_story_text", || self.driver.generate(&request))
            .await?;

        let text = response.text();
        debug!(chars = text.len(), "Received single-story response");

        let raw: SingleStoryResponse = parse_structured(&text)?;
        let bundle = into_bundle(raw)?;
        info!(
            topic = %bundle.topic(),
            b_roll = bundle.video_image_prompts().len(),
            "Single-story content generated"
        );
        Ok(bundle)
    }
}

fn inputs(prompt: String, image: Option<&ReferenceImage>) -> Vec<Input> {
    let mut inputs = vec![Input::Text(prompt)];
    inputs.extend(image.cloned().map(Input::Image));
    inputs
}

fn required(field: &str, value: String) -> StudioResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StudioError::new(StudioErrorKind::IncompleteGenerationResult(
            format!("'{field}' is empty"),
        )));
    }
    Ok(trimmed.to_string())
}

fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

fn into_bundle(raw: SingleStoryResponse) -> StudioResult<ContentBundle> {
    let bundle = ContentBundle::builder()
        .mode(StoryMode::Single)
        .script(required("script", raw.script)?)
        .topic(NewsTopic::normalize(&raw.topic))
        .background_description(Some(required(
            "backgroundDescription",
            raw.background_description,
        )?))
        .post_image_descriptions(vec![required(
            "postImageDescription",
            raw.post_image_description,
        )?])
        .social_media_content(raw.social_media_content)
        .video_image_prompts(non_blank(raw.video_image_prompts))
        .story_video_prompts(non_blank(raw.story_video_prompts))
        .build()?;
    Ok(bundle)
}
