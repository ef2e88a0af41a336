//! The generation backend boundary.

use async_trait::async_trait;
use newsdesk_core::{GenerateRequest, GenerateResponse, GeneratedImage, ImageRequest};
use newsdesk_error::BackendResult;
use std::sync::Arc;

/// A generative backend able to answer text requests and render images.
///
/// Implementations perform exactly one remote round-trip per call. Retries,
/// pacing and fallbacks belong to the caller.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use newsdesk_core::{GenerateRequest, GenerateResponse, GeneratedImage, ImageRequest};
/// use newsdesk_error::BackendResult;
/// use newsdesk_interface::GenerationDriver;
///
/// struct Echo;
///
/// #[async_trait]
/// impl GenerationDriver for Echo {
///     async fn generate(&self, request: &GenerateRequest) -> BackendResult<GenerateResponse> {
///         Ok(GenerateResponse::from_text(request.prompt_text()))
///     }
///
///     async fn generate_image(&self, _request: &ImageRequest) -> BackendResult<Option<GeneratedImage>> {
///         Ok(None)
///     }
///
///     fn provider_name(&self) -> &'static str {
///         "echo"
///     }
/// }
/// ```
#[async_trait]
pub trait GenerationDriver: Send + Sync {
    /// Generate text, optionally constrained to a JSON schema.
    async fn generate(&self, request: &GenerateRequest) -> BackendResult<GenerateResponse>;

    /// Render one image.
    ///
    /// `Ok(None)` means the backend answered without an image, which usually
    /// indicates safety filtering.
    async fn generate_image(&self, request: &ImageRequest)
    -> BackendResult<Option<GeneratedImage>>;

    /// Short provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<T> GenerationDriver for Arc<T>
where
    T: GenerationDriver + ?Sized,
{
    async fn generate(&self, request: &GenerateRequest) -> BackendResult<GenerateResponse> {
        (**self).generate(request).await
    }

    async fn generate_image(
        &self,
        request: &ImageRequest,
    ) -> BackendResult<Option<GeneratedImage>> {
        (**self).generate_image(request).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
