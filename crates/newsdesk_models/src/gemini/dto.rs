//! Wire types for the Gemini `generateContent` and Imagen `predict` endpoints.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Conversation turn in requests and responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// "user" or "model"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media parts.
///
/// Variant order matters for untagged decoding; anything unrecognized (search
/// grounding metadata, function calls) lands in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Plain text
    Text {
        /// Text content
        text: String,
    },
    /// Base64 inline payload
    InlineData {
        /// Encoded data
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    /// Unrecognized part
    Other(Value),
}

/// Base64 inline payload used for image attachments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type
    pub mime_type: String,
    /// Base64 data
    pub data: String,
}

/// Sampling and output-format settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// "application/json" when a schema is supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// OpenAPI-style schema for the JSON answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

/// Marker enabling Google Search grounding.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GoogleSearch {}

/// Tool declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Search grounding
    pub google_search: GoogleSearch,
}

/// `generateContent` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Builder, Getters)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct GeminiRequest {
    /// Conversation contents
    contents: Vec<Content>,
    /// Generation settings
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    /// Tools the model may use
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

impl GeminiRequest {
    /// Creates a new builder for GeminiRequest.
    pub fn builder() -> GeminiRequestBuilder {
        GeminiRequestBuilder::default()
    }
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate completions; empty when the prompt was blocked
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Present when the prompt itself was rejected
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// One candidate completion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    #[serde(default)]
    pub content: Option<Content>,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Prompt-level safety feedback.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Reason the prompt was blocked
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Imagen `predict` request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictRequest {
    /// One instance per prompt
    pub instances: Vec<PredictInstance>,
    /// Output settings
    pub parameters: PredictParameters,
}

/// Imagen prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictInstance {
    /// Image description
    pub prompt: String,
}

/// Imagen output settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    /// Images to render
    pub sample_count: u32,
    /// "16:9", "9:16" or "1:1"
    pub aspect_ratio: String,
    /// Encoding of the rendered image
    pub output_options: OutputOptions,
}

/// Imagen encoding options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    /// Output MIME type
    pub mime_type: String,
}

/// Imagen `predict` response.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PredictResponse {
    /// Rendered images; empty when every sample was filtered
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

/// One rendered image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Base64 image bytes
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    /// MIME type of the image
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Safety filter explanation, when the image was withheld
    #[serde(default)]
    pub rai_filtered_reason: Option<String>,
}
