//! REST client for Gemini text generation and Imagen image generation.

use super::conversions;
use super::dto::{GenerateContentResponse, PredictResponse};
use async_trait::async_trait;
use newsdesk_core::{GenerateRequest, GenerateResponse, GeneratedImage, ImageRequest};
use newsdesk_error::{BackendError, BackendErrorKind, BackendResult};
use newsdesk_interface::GenerationDriver;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

/// Public Gemini REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used for script and metadata generation.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
/// Model used for image generation.
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini driver.
///
/// # Examples
///
/// ```
/// use newsdesk_models::GeminiClient;
///
/// let client = GeminiClient::new("test-key")
///     .with_models("gemini-2.5-pro", "imagen-3.0-generate-002")
///     .with_base_url("http://localhost:8080/v1beta");
/// assert_eq!(client.text_model(), "gemini-2.5-pro");
/// ```
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    text_model: String,
    image_model: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client with the default models and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the text and image models.
    pub fn with_models(
        mut self,
        text_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        self.text_model = text_model.into();
        self.image_model = image_model.into();
        self
    }

    /// Override the API endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The default text model.
    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    /// The image model.
    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    async fn post<B, R>(&self, url: &str, body: &B) -> BackendResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                BackendError::new(BackendErrorKind::Transport(format!("Request failed: {e}")))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = %status, error = %error_text, "Gemini API error");
            return Err(BackendError::new(BackendErrorKind::Http {
                status_code: status.as_u16(),
                message: error_text,
            }));
        }

        response.json::<R>().await.map_err(|e| {
            error!(error = ?e, "Failed to parse response");
            BackendError::new(BackendErrorKind::ResponseParsing(format!(
                "Failed to parse JSON: {e}"
            )))
        })
    }
}

#[async_trait]
impl GenerationDriver for GeminiClient {
    #[instrument(
        skip(self, request),
        fields(
            model = tracing::field::Empty,
            images = request.image_count(),
            web_search = *request.web_search()
        )
    )]
    async fn generate(&self, request: &GenerateRequest) -> BackendResult<GenerateResponse> {
        let model = request.model().as_deref().unwrap_or(&self.text_model);
        tracing::Span::current().record("model", model);

        let body = conversions::to_gemini_request(request)?;
        let url = self.endpoint(model, "generateContent");
        debug!(url = %url, "Sending generateContent request");

        let response: GenerateContentResponse = self.post(&url, &body).await?;
        debug!(candidates = response.candidates.len(), "Received response");
        conversions::from_gemini_response(response)
    }

    #[instrument(
        skip(self, request),
        fields(model = %self.image_model, aspect_ratio = %request.aspect_ratio())
    )]
    async fn generate_image(
        &self,
        request: &ImageRequest,
    ) -> BackendResult<Option<GeneratedImage>> {
        let body = conversions::to_predict_request(request);
        let url = self.endpoint(&self.image_model, "predict");
        debug!(url = %url, "Sending predict request");

        let response: PredictResponse = self.post(&url, &body).await?;
        conversions::from_predict_response(response, request)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
