//! The studio: sequences text, image and B-roll generation into one run.

use crate::{
    ImageOrchestrator, MultiStoryContentGenerator, ParagraphPromptExpander, StudioConfig,
    TextContentGenerator,
};
use derive_getters::Getters;
use newsdesk_core::{
    ContentBundle, EventSink, GeneratedImage, GenerationRequest, ImageSet, NullSink,
    ParagraphPromptSet, ReferenceImage, Stage, StoryInput, StoryMode, StudioEvent,
};
use newsdesk_error::{StudioError, StudioResult};
use newsdesk_interface::GenerationDriver;
use newsdesk_rate_limit::{RequestPacer, RetryPolicy, RetryableCaller};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

const THUMBNAIL_WARNING: &str = "The YouTube thumbnail could not be generated. This is often due \
     to safety filters. You can try editing the prompt and regenerating it below.";

/// Outcome of a successful run.
///
/// A run succeeds whenever its text step succeeds. Image problems show up as
/// absent roles, entries in `warnings`, or (when a whole batch came back
/// empty) `image_error`.
#[derive(Debug, Clone, Getters)]
pub struct StudioRun {
    /// Script, metadata and prompts
    bundle: ContentBundle,
    /// Images by role
    images: ImageSet,
    /// User-visible, non-fatal problems in the order they occurred
    warnings: Vec<String>,
    /// Set when every anchor, post or thumbnail image failed
    image_error: Option<StudioError>,
}

impl StudioRun {
    /// Edit the thumbnail prompt. The rest of the bundle is unchanged.
    pub fn set_thumbnail_prompt(&mut self, prompt: impl Into<String>) {
        self.bundle.set_thumbnail_prompt(prompt);
    }

    /// Swap in a regenerated thumbnail. Other images are unchanged.
    pub fn replace_thumbnail(&mut self, image: GeneratedImage) {
        self.images.replace_thumbnail(image);
    }

    /// Split into bundle and images.
    pub fn into_parts(self) -> (ContentBundle, ImageSet) {
        (self.bundle, self.images)
    }
}

/// Entry point for every studio operation.
///
/// Runs are serialized: an operation started while another is in progress
/// waits for it to finish, so remote calls from different runs never
/// interleave.
///
/// # Examples
///
/// ```no_run
/// use newsdesk_studio::{Studio, StudioConfig};
/// # use std::sync::Arc;
/// # async fn demo(driver: Arc<dyn newsdesk_interface::GenerationDriver>) -> newsdesk_error::StudioResult<()> {
/// let studio = Studio::new(driver, &StudioConfig::default());
/// let run = studio.generate_single(None, Some("City announces new park"), None).await?;
/// println!("{}", run.bundle().script());
/// # Ok(())
/// # }
/// ```
pub struct Studio {
    text: TextContentGenerator,
    multi: MultiStoryContentGenerator,
    images: ImageOrchestrator,
    paragraphs: ParagraphPromptExpander,
    sink: Arc<dyn EventSink>,
    run_lock: Mutex<()>,
}

impl std::fmt::Debug for Studio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Studio")
            .field("text", &self.text)
            .field("multi", &self.multi)
            .field("images", &self.images)
            .field("paragraphs", &self.paragraphs)
            .finish_non_exhaustive()
    }
}

impl Studio {
    /// Create a studio that reports no events.
    pub fn new(driver: Arc<dyn GenerationDriver>, config: &StudioConfig) -> Self {
        Self::with_sink(driver, config, Arc::new(NullSink))
    }

    /// Create a studio that reports retries, pacing, fallbacks and warnings to `sink`.
    pub fn with_sink(
        driver: Arc<dyn GenerationDriver>,
        config: &StudioConfig,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let retry: RetryPolicy = (*config.retry()).into();
        let caller = RetryableCaller::new(retry).with_sink(Arc::clone(&sink));
        let pacer = RequestPacer::new((*config.pacing()).into()).with_sink(Arc::clone(&sink));
        let temperatures = *config.temperatures();

        Self {
            text: TextContentGenerator::new(Arc::clone(&driver), caller.clone(), temperatures),
            multi: MultiStoryContentGenerator::new(
                Arc::clone(&driver),
                caller.clone(),
                temperatures.multi_story,
                config.translation_language().as_str(),
            ),
            images: ImageOrchestrator::new(
                Arc::clone(&driver),
                caller.clone(),
                pacer,
                config.base_anchor_prompt().as_str(),
            )
            .with_sink(Arc::clone(&sink)),
            paragraphs: ParagraphPromptExpander::new(driver, caller, temperatures.paragraphs),
            sink,
            run_lock: Mutex::new(()),
        }
    }

    /// Generate a single-story run from a URL or headline.
    pub async fn generate_single(
        &self,
        url: Option<&str>,
        headline: Option<&str>,
        image: Option<ReferenceImage>,
    ) -> StudioResult<StudioRun> {
        let request = GenerationRequest::single(url, headline, image)?;
        self.generate(&request).await
    }

    /// Generate a roundup run from two or three headlines.
    pub async fn generate_multi(&self, stories: Vec<StoryInput>) -> StudioResult<StudioRun> {
        let request = GenerationRequest::multi(stories)?;
        self.generate(&request).await
    }

    /// Execute one full run: text, then images, then B-roll.
    ///
    /// Fails only when the text step fails; no partial bundle is returned in
    /// that case.
    #[instrument(skip_all, fields(mode = %request.mode(), stories = request.story_count()))]
    pub async fn generate(&self, request: &GenerationRequest) -> StudioResult<StudioRun> {
        let _run = self.run_lock.lock().await;

        self.sink.emit(StudioEvent::StageStarted(Stage::TextGeneration));
        let bundle = match request {
            GenerationRequest::Url { url, image } => {
                self.text
                    .generate_from_url(url.as_str(), image.as_ref())
                    .await
            }
            GenerationRequest::Headline {
                headline,
                language,
                image,
            } => {
                self.text
                    .generate_from_headline(headline, language.as_deref(), image.as_ref())
                    .await
            }
            GenerationRequest::MultiHeadline { stories } => self.multi.generate(stories).await,
        }
        .inspect_err(|err| error!(error = %err, "Text generation failed, aborting run"))?;
        self.sink.emit(StudioEvent::StageFinished(Stage::TextGeneration));

        let mut warnings = Vec::new();
        let mut image_error = None;

        self.sink.emit(StudioEvent::StageStarted(Stage::Images));
        let batch = match bundle.mode() {
            StoryMode::Single => self
                .images
                .generate_single(
                    bundle.background_description().as_deref().unwrap_or_default(),
                    bundle
                        .post_image_descriptions()
                        .first()
                        .map(String::as_str)
                        .unwrap_or_default(),
                )
                .await
                .map(ImageSet::from),
            StoryMode::Multi => self
                .images
                .generate_multi(
                    bundle.thumbnail_prompt().as_deref().unwrap_or_default(),
                    bundle.post_image_descriptions(),
                )
                .await
                .map(|images| {
                    if images.thumbnail.is_none() {
                        self.warn(&mut warnings, THUMBNAIL_WARNING.to_string());
                    }
                    ImageSet::from(images)
                }),
        };
        self.sink.emit(StudioEvent::StageFinished(Stage::Images));

        let mut images = match batch {
            Ok(images) => images,
            Err(err) => {
                error!(error = %err, "Image generation failed");
                image_error = Some(err);
                ImageSet::default()
            }
        };

        let prompts = bundle.video_image_prompts();
        if image_error.is_none() && !prompts.is_empty() {
            self.sink.emit(StudioEvent::StageStarted(Stage::BRoll));
            let b_roll = self.images.generate_b_roll(prompts).await;
            let missing = prompts.len() - b_roll.len();
            if missing > 0 {
                self.warn(
                    &mut warnings,
                    format!(
                        "Failed to generate B-Roll images: {missing} of {} could not be generated.",
                        prompts.len()
                    ),
                );
            }
            images.set_b_roll(b_roll);
            self.sink.emit(StudioEvent::StageFinished(Stage::BRoll));
        }

        info!(
            images = images.present().len(),
            warnings = warnings.len(),
            image_error = image_error.is_some(),
            "Run finished"
        );
        Ok(StudioRun {
            bundle,
            images,
            warnings,
            image_error,
        })
    }

    /// Render an edited thumbnail prompt once. Remote failures are returned.
    pub async fn regenerate_thumbnail(&self, prompt: &str) -> StudioResult<Option<GeneratedImage>> {
        let _run = self.run_lock.lock().await;
        self.images.regenerate_thumbnail(prompt).await
    }

    /// Render a B-roll batch. Failed prompts are skipped.
    pub async fn generate_b_roll(&self, prompts: &[String]) -> Vec<GeneratedImage> {
        let _run = self.run_lock.lock().await;
        self.sink.emit(StudioEvent::StageStarted(Stage::BRoll));
        let images = self.images.generate_b_roll(prompts).await;
        self.sink.emit(StudioEvent::StageFinished(Stage::BRoll));
        images
    }

    /// Expand a finished script into paragraph prompts.
    ///
    /// `mode` is the mode of the run that produced the script; roundup
    /// scripts are cut down to their main section first.
    pub async fn generate_paragraph_prompts(
        &self,
        script: &str,
        mode: StoryMode,
    ) -> StudioResult<ParagraphPromptSet> {
        let _run = self.run_lock.lock().await;
        self.sink
            .emit(StudioEvent::StageStarted(Stage::ParagraphPrompts));
        let result = self.paragraphs.expand(script, mode).await;
        self.sink
            .emit(StudioEvent::StageFinished(Stage::ParagraphPrompts));
        result
    }

    fn warn(&self, warnings: &mut Vec<String>, message: String) {
        warn!(warning = %message, "Run warning");
        self.sink.emit(StudioEvent::Warning(message.clone()));
        warnings.push(message);
    }
}
