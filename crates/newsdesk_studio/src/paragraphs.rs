//! Paragraph-aligned text-to-video prompts for a finished script.

use crate::extraction::parse_structured;
use crate::prompts;
use newsdesk_core::{GenerateRequest, Input, ParagraphPromptSet, StoryMode, main_script_section};
use newsdesk_error::{StudioError, StudioErrorKind, StudioResult};
use newsdesk_interface::GenerationDriver;
use newsdesk_rate_limit::RetryableCaller;
use std::sync::Arc;
use tracing::{info, instrument};

/// Asks the model to split a script into paragraphs and write one video
/// prompt per paragraph. Segmentation is left entirely to the model.
#[derive(Clone)]
pub struct ParagraphPromptExpander {
    driver: Arc<dyn GenerationDriver>,
    caller: RetryableCaller,
    temperature: f32,
}

impl std::fmt::Debug for ParagraphPromptExpander {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParagraphPromptExpander")
            .field("provider", &self.driver.provider_name())
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl ParagraphPromptExpander {
    /// Create an expander.
    pub fn new(driver: Arc<dyn GenerationDriver>, caller: RetryableCaller, temperature: f32) -> Self {
        Self {
            driver,
            caller,
            temperature,
        }
    }

    /// Expand `script` into paragraph prompts.
    ///
    /// For roundup scripts only the text after the `FULL SCRIPT:` marker is
    /// sent; single-story scripts are sent whole. A response without the `prompts` array, or with an element
    /// missing its paragraph or prompt, is a
    /// [`MalformedResponse`](StudioErrorKind::MalformedResponse).
    #[instrument(skip_all, fields(script_chars = script.len(), %mode))]
    pub async fn expand(&self, script: &str, mode: StoryMode) -> StudioResult<ParagraphPromptSet> {
        let source = match mode {
            StoryMode::Single => script.trim(),
            StoryMode::Multi => main_script_section(script),
        };
        if source.is_empty() {
            return Err(StudioError::new(StudioErrorKind::InvalidInput(
                "Script must not be empty".to_string(),
            )));
        }

        let request = GenerateRequest::builder()
            .inputs(vec![Input::Text(prompts::paragraph_prompt(source))])
            .temperature(self.temperature)
            .response_schema(Some(prompts::paragraph_schema()))
            .build()?;

        let response = self
            .caller
            .call("paragraph_prompts", || self.driver.generate(&request))
            .await?;

        let set: ParagraphPromptSet =
            parse_structured(&response.text()).map_err(|err| match err.kind {
                StudioErrorKind::IncompleteGenerationResult(message) => {
                    StudioError::new(StudioErrorKind::MalformedResponse(message))
                }
                _ => err,
            })?;

        if let Some(position) = set
            .iter()
            .position(|p| p.paragraph.trim().is_empty() || p.prompt.trim().is_empty())
        {
            return Err(StudioError::new(StudioErrorKind::MalformedResponse(format!(
                "Paragraph prompt {position} is missing its paragraph or prompt"
            ))));
        }

        info!(paragraphs = set.len(), "Paragraph prompts generated");
        Ok(set)
    }
}
