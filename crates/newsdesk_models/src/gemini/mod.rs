//! Google Gemini (text) and Imagen (images) over the REST API.

mod client;
mod conversions;
mod dto;

pub use client::{DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GeminiClient};
pub use dto::{
    GeminiRequest, GeminiRequestBuilder, GenerateContentResponse, PredictRequest, PredictResponse,
};
