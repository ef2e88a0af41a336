//! Request and response types for the generation backend.

use crate::{AspectRatio, GeneratedImage, Input};
use derive_builder::Builder;
use derive_getters::Getters;
use newsdesk_error::{StudioError, StudioErrorKind};

/// Text (optionally schema-constrained JSON) generation request.
///
/// # Examples
///
/// ```
/// use newsdesk_core::{GenerateRequest, Input};
///
/// let request = GenerateRequest::builder()
///     .inputs(vec![Input::Text("Write a headline".to_string())])
///     .temperature(0.5_f32)
///     .build()
///     .unwrap();
/// assert_eq!(*request.temperature(), Some(0.5_f32));
/// assert!(!request.web_search());
/// ```
#[derive(Debug, Clone, PartialEq, Builder, Getters)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// Instruction text followed by any inline attachments
    inputs: Vec<Input>,
    /// Sampling temperature
    #[builder(default)]
    temperature: Option<f32>,
    /// JSON schema the response must follow
    #[builder(default)]
    response_schema: Option<serde_json::Value>,
    /// Let the model consult web search before answering
    #[builder(default)]
    web_search: bool,
    /// Model override; the driver's default model is used when unset
    #[builder(default)]
    model: Option<String>,
}

impl GenerateRequest {
    /// Creates a new builder for GenerateRequest.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// Number of inline image attachments.
    pub fn image_count(&self) -> usize {
        self.inputs.iter().filter(|input| input.is_image()).count()
    }

    /// Concatenated instruction text.
    pub fn prompt_text(&self) -> String {
        self.inputs
            .iter()
            .filter_map(|input| match input {
                Input::Text(text) => Some(text.as_str()),
                Input::Image(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<GenerateRequestBuilderError> for StudioError {
    #[track_caller]
    fn from(err: GenerateRequestBuilderError) -> Self {
        StudioError::new(StudioErrorKind::InvalidInput(err.to_string()))
    }
}

/// Output parts returned by the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Generated text.
    Text(String),
    /// Inline generated image.
    Image(GeneratedImage),
}

/// The unified response object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerateResponse {
    /// Output parts in the order the backend returned them
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Create a response holding a single text part.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            outputs: vec![Output::Text(text.into())],
        }
    }

    /// All text parts joined together.
    pub fn text(&self) -> String {
        self.outputs
            .iter()
            .filter_map(|output| match output {
                Output::Text(text) => Some(text.as_str()),
                Output::Image(_) => None,
            })
            .collect()
    }
}

/// Single-image generation request.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ImageRequest {
    /// Image description
    prompt: String,
    /// Requested aspect ratio
    aspect_ratio: AspectRatio,
}

impl ImageRequest {
    /// Create a request for one image.
    pub fn new(prompt: impl Into<String>, aspect_ratio: AspectRatio) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio,
        }
    }
}
