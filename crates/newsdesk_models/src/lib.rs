//! Generation backend drivers for Newsdesk.
//!
//! Each driver implements [`newsdesk_interface::GenerationDriver`] for one
//! provider. Drivers are thin: one HTTP round-trip per call, with retries and
//! pacing left to the studio.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{
    DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GeminiClient, GeminiRequest,
    GeminiRequestBuilder, GenerateContentResponse, PredictRequest, PredictResponse,
};
