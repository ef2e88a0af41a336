//! Sequential, paced image generation with one fallback per role.
//!
//! Every image call goes through the shared retry wrapper and then the pacer,
//! so calls never overlap and consecutive calls are spaced by the pacing
//! policy. In the batch paths a call that still fails is treated as "no image
//! for this role"; only [`ImageOrchestrator::regenerate_thumbnail`] reports the
//! remote error to the caller.

use crate::prompts::{self, FALLBACK_BACKGROUND, FALLBACK_NOTE, MULTI_POST_FALLBACK};
use newsdesk_core::{
    AspectRatio, EventSink, GeneratedImage, ImageRequest, ImageRole, MultiStoryImages, NullSink,
    SingleStoryImages, StudioEvent,
};
use newsdesk_error::{BackendResult, StudioError, StudioErrorKind, StudioResult};
use newsdesk_interface::GenerationDriver;
use newsdesk_rate_limit::{RequestPacer, RetryableCaller};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Anchor prompt with the generic studio background.
///
/// # Examples
///
/// ```
/// use newsdesk_studio::generic_studio_prompt;
///
/// assert_eq!(
///     generic_studio_prompt("A news anchor"),
///     "A news anchor, with a background of a generic news studio."
/// );
/// ```
pub fn generic_studio_prompt(base_anchor_prompt: &str) -> String {
    prompts::anchor_landscape(base_anchor_prompt, FALLBACK_BACKGROUND)
}

/// Turns descriptions into images, one remote call at a time.
pub struct ImageOrchestrator {
    driver: Arc<dyn GenerationDriver>,
    caller: RetryableCaller,
    pacer: RequestPacer,
    sink: Arc<dyn EventSink>,
    base_anchor_prompt: String,
}

impl std::fmt::Debug for ImageOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageOrchestrator")
            .field("provider", &self.driver.provider_name())
            .field("pacer", &self.pacer)
            .field("base_anchor_prompt", &self.base_anchor_prompt)
            .finish_non_exhaustive()
    }
}

impl ImageOrchestrator {
    /// Create an orchestrator. `pacer` is shared by every image call it makes.
    pub fn new(
        driver: Arc<dyn GenerationDriver>,
        caller: RetryableCaller,
        pacer: RequestPacer,
        base_anchor_prompt: impl Into<String>,
    ) -> Self {
        Self {
            driver,
            caller,
            pacer,
            sink: Arc::new(NullSink),
            base_anchor_prompt: base_anchor_prompt.into(),
        }
    }

    /// Report image outcomes to `sink`.
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Anchor shots and the social post image for one story.
    ///
    /// Primaries are rendered in the order 16:9, 9:16, 1:1, followed by the
    /// generic-studio fallbacks for whichever anchor shots came back empty.
    /// Fails with [`AllImagesFailed`](StudioErrorKind::AllImagesFailed) only
    /// when all three roles end empty.
    #[instrument(skip_all)]
    pub async fn generate_single(
        &self,
        background_description: &str,
        post_image_description: &str,
    ) -> StudioResult<SingleStoryImages> {
        let base = self.base_anchor_prompt.as_str();
        let background = background_description.trim();
        let primary_prompt = prompts::anchor_landscape(base, background);

        let mut anchor_16x9 = self
            .render(ImageRole::Anchor16x9, &primary_prompt, AspectRatio::Landscape)
            .await;
        let mut anchor_9x16 = self
            .render(
                ImageRole::Anchor9x16,
                &prompts::anchor_portrait(base, background),
                AspectRatio::Portrait,
            )
            .await;
        let post_image = match post_image_description.trim() {
            "" => None,
            description => {
                self.render(
                    ImageRole::PostImage(0),
                    &prompts::single_post(description),
                    AspectRatio::Square,
                )
                .await
            }
        };

        let mut final_prompt = primary_prompt;
        let mut fallback_used = false;

        if anchor_16x9.is_none() {
            fallback_used = true;
            self.sink.emit(StudioEvent::FallbackUsed {
                role: ImageRole::Anchor16x9,
            });
            let fallback = generic_studio_prompt(base);
            anchor_16x9 = self
                .render(ImageRole::Anchor16x9, &fallback, AspectRatio::Landscape)
                .await;
            final_prompt = format!("{fallback}{FALLBACK_NOTE}");
        }

        if anchor_9x16.is_none() {
            fallback_used = true;
            self.sink.emit(StudioEvent::FallbackUsed {
                role: ImageRole::Anchor9x16,
            });
            anchor_9x16 = self
                .render(
                    ImageRole::Anchor9x16,
                    &prompts::anchor_portrait(base, FALLBACK_BACKGROUND),
                    AspectRatio::Portrait,
                )
                .await;
        }

        self.report_missing(ImageRole::Anchor16x9, &anchor_16x9);
        self.report_missing(ImageRole::Anchor9x16, &anchor_9x16);
        self.report_missing(ImageRole::PostImage(0), &post_image);

        if anchor_16x9.is_none() && anchor_9x16.is_none() && post_image.is_none() {
            return Err(StudioError::new(StudioErrorKind::AllImagesFailed(
                "No anchor or post image could be generated, even with fallback prompts"
                    .to_string(),
            )));
        }

        info!(fallback_used, "Single-story images generated");
        Ok(SingleStoryImages {
            anchor_16x9,
            anchor_9x16,
            post_image,
            final_prompt,
            fallback_used,
        })
    }

    /// Roundup thumbnail followed by one square image per story description.
    ///
    /// Blank descriptions are recorded as absent without a remote call. Fails
    /// with [`AllImagesFailed`](StudioErrorKind::AllImagesFailed) only when the
    /// thumbnail and every post image end empty.
    #[instrument(skip_all, fields(stories = post_image_descriptions.len()))]
    pub async fn generate_multi(
        &self,
        thumbnail_prompt: &str,
        post_image_descriptions: &[String],
    ) -> StudioResult<MultiStoryImages> {
        let mut thumbnail = match thumbnail_prompt.trim() {
            "" => None,
            prompt => {
                self.render(ImageRole::Thumbnail, prompt, AspectRatio::Landscape)
                    .await
            }
        };
        if thumbnail.is_none() {
            self.sink.emit(StudioEvent::FallbackUsed {
                role: ImageRole::Thumbnail,
            });
            let fallback = prompts::thumbnail_fallback(
                post_image_descriptions.first().map(String::as_str),
            );
            thumbnail = self
                .render(ImageRole::Thumbnail, &fallback, AspectRatio::Landscape)
                .await;
        }
        self.report_missing(ImageRole::Thumbnail, &thumbnail);

        let mut post_images = Vec::with_capacity(post_image_descriptions.len());
        for (index, description) in post_image_descriptions.iter().enumerate() {
            let role = ImageRole::PostImage(index);
            let description = description.trim();
            if description.is_empty() {
                debug!(%role, "Skipping blank description");
                self.report_missing(role, &None);
                post_images.push(None);
                continue;
            }

            let mut image = self
                .render(role, &prompts::multi_post(description), AspectRatio::Square)
                .await;
            if image.is_none() {
                self.sink.emit(StudioEvent::FallbackUsed { role });
                image = self
                    .render(role, MULTI_POST_FALLBACK, AspectRatio::Square)
                    .await;
            }
            self.report_missing(role, &image);
            post_images.push(image);
        }

        if thumbnail.is_none() && post_images.iter().all(Option::is_none) {
            return Err(StudioError::new(StudioErrorKind::AllImagesFailed(
                "Neither the thumbnail nor any post image could be generated".to_string(),
            )));
        }

        info!(
            thumbnail = thumbnail.is_some(),
            post_images = post_images.iter().flatten().count(),
            "Roundup images generated"
        );
        Ok(MultiStoryImages {
            thumbnail,
            post_images,
        })
    }

    /// One 16:9 still per prompt, in order. Failed prompts are skipped.
    #[instrument(skip_all, fields(prompts = video_image_prompts.len()))]
    pub async fn generate_b_roll(&self, video_image_prompts: &[String]) -> Vec<GeneratedImage> {
        let mut images = Vec::with_capacity(video_image_prompts.len());
        for (index, prompt) in video_image_prompts.iter().enumerate() {
            let prompt = prompt.trim();
            let image = match prompt {
                "" => None,
                prompt => {
                    self.render(
                        ImageRole::BRoll(index),
                        &prompts::b_roll(prompt),
                        AspectRatio::Landscape,
                    )
                    .await
                }
            };
            match image {
                Some(image) => images.push(image),
                None => {
                    warn!(index, "B-roll prompt produced no image, skipping");
                    self.sink.emit(StudioEvent::BRollSkipped { index });
                }
            }
        }
        info!(
            generated = images.len(),
            requested = video_image_prompts.len(),
            "B-roll batch finished"
        );
        images
    }

    /// Render a user-edited thumbnail prompt once, without fallback.
    ///
    /// Unlike the batch paths, a remote failure that survives the retry budget
    /// is returned as [`RemoteCallFailed`](StudioErrorKind::RemoteCallFailed)
    /// carrying the backend's message. `Ok(None)` means the backend answered
    /// without an image.
    #[instrument(skip_all)]
    pub async fn regenerate_thumbnail(&self, prompt: &str) -> StudioResult<Option<GeneratedImage>> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(StudioError::new(StudioErrorKind::InvalidInput(
                "Thumbnail prompt must not be empty".to_string(),
            )));
        }

        let request = ImageRequest::new(prompt, AspectRatio::Landscape);
        let image = self.attempt(ImageRole::Thumbnail, &request).await?;
        match &image {
            Some(_) => self.sink.emit(StudioEvent::ImageGenerated {
                role: ImageRole::Thumbnail,
            }),
            None => self.report_missing(ImageRole::Thumbnail, &image),
        }
        Ok(image)
    }

    async fn attempt(
        &self,
        role: ImageRole,
        request: &ImageRequest,
    ) -> BackendResult<Option<GeneratedImage>> {
        let _permit = self.pacer.acquire().await;
        let label = role.to_string();
        self.caller
            .call(&label, || self.driver.generate_image(request))
            .await
    }

    async fn render(
        &self,
        role: ImageRole,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Option<GeneratedImage> {
        let request = ImageRequest::new(prompt, aspect_ratio);
        match self.attempt(role, &request).await {
            Ok(Some(image)) => {
                debug!(%role, %aspect_ratio, bytes = image.data.len(), "Image generated");
                self.sink.emit(StudioEvent::ImageGenerated { role });
                Some(image)
            }
            Ok(None) => {
                warn!(%role, %aspect_ratio, "Backend returned no image");
                None
            }
            Err(err) => {
                warn!(%role, %aspect_ratio, error = %err, "Image generation failed");
                None
            }
        }
    }

    fn report_missing(&self, role: ImageRole, image: &Option<GeneratedImage>) {
        if image.is_none() {
            self.sink.emit(StudioEvent::ImageMissing { role });
        }
    }
}
