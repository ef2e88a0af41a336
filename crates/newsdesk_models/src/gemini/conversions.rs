//! Conversions between Newsdesk requests and Gemini wire types.

use super::dto::{
    Content, GeminiRequest, GenerateContentResponse, GenerationConfig, GoogleSearch, InlineData,
    OutputOptions, Part, PredictInstance, PredictParameters, PredictRequest, PredictResponse, Tool,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use newsdesk_core::{GenerateRequest, GenerateResponse, GeneratedImage, ImageRequest, Input, Output};
use newsdesk_error::{BackendError, BackendErrorKind, BackendResult};
use tracing::{debug, warn};

const JSON_MIME: &str = "application/json";
const IMAGE_MIME: &str = "image/jpeg";

/// Build a `generateContent` body.
pub fn to_gemini_request(req: &GenerateRequest) -> BackendResult<GeminiRequest> {
    let parts = req
        .inputs()
        .iter()
        .map(|input| match input {
            Input::Text(text) => Part::Text { text: text.clone() },
            Input::Image(image) => Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime.clone(),
                    data: STANDARD.encode(&image.data),
                },
            },
        })
        .collect();

    let generation_config = GenerationConfig {
        temperature: *req.temperature(),
        response_mime_type: req.response_schema().as_ref().map(|_| JSON_MIME.to_string()),
        response_schema: req.response_schema().clone(),
    };

    let mut builder = GeminiRequest::builder();
    builder
        .contents(vec![Content {
            role: Some("user".to_string()),
            parts,
        }])
        .generation_config(Some(generation_config));

    if *req.web_search() {
        builder.tools(Some(vec![Tool {
            google_search: GoogleSearch {},
        }]));
    }

    builder.build().map_err(|e| {
        BackendError::new(BackendErrorKind::ResponseParsing(format!(
            "Failed to build request: {e}"
        )))
    })
}

/// Flatten the first candidate into a response.
pub fn from_gemini_response(response: GenerateContentResponse) -> BackendResult<GenerateResponse> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(BackendError::new(BackendErrorKind::Blocked(reason)));
    };

    let parts = candidate.content.map(|content| content.parts).unwrap_or_default();
    let mut outputs = Vec::with_capacity(parts.len());
    for part in parts {
        match part {
            Part::Text { text } => outputs.push(Output::Text(text)),
            Part::InlineData { inline_data } => {
                let data = decode(&inline_data.data)?;
                outputs.push(Output::Image(GeneratedImage {
                    mime: inline_data.mime_type,
                    data,
                    aspect_ratio: newsdesk_core::AspectRatio::Square,
                }));
            }
            Part::Other(value) => debug!(part = %value, "Ignoring unrecognized part"),
        }
    }

    if outputs.is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "empty candidate".to_string());
        return Err(BackendError::new(BackendErrorKind::Blocked(reason)));
    }

    Ok(GenerateResponse { outputs })
}

/// Build an Imagen `predict` body for one JPEG.
pub fn to_predict_request(req: &ImageRequest) -> PredictRequest {
    PredictRequest {
        instances: vec![PredictInstance {
            prompt: req.prompt().clone(),
        }],
        parameters: PredictParameters {
            sample_count: 1,
            aspect_ratio: req.aspect_ratio().to_string(),
            output_options: OutputOptions {
                mime_type: IMAGE_MIME.to_string(),
            },
        },
    }
}

/// Extract the first rendered image, if any.
pub fn from_predict_response(
    response: PredictResponse,
    req: &ImageRequest,
) -> BackendResult<Option<GeneratedImage>> {
    let Some(prediction) = response.predictions.into_iter().next() else {
        warn!(aspect_ratio = %req.aspect_ratio(), "Imagen returned no predictions");
        return Ok(None);
    };

    let Some(encoded) = prediction.bytes_base64_encoded.filter(|b| !b.is_empty()) else {
        warn!(
            aspect_ratio = %req.aspect_ratio(),
            reason = prediction.rai_filtered_reason.as_deref().unwrap_or("unknown"),
            "Imagen withheld the image"
        );
        return Ok(None);
    };

    Ok(Some(GeneratedImage {
        mime: prediction.mime_type.unwrap_or_else(|| IMAGE_MIME.to_string()),
        data: decode(&encoded)?,
        aspect_ratio: *req.aspect_ratio(),
    }))
}

fn decode(data: &str) -> BackendResult<Vec<u8>> {
    STANDARD.decode(data).map_err(|e| {
        BackendError::new(BackendErrorKind::ResponseParsing(format!(
            "Invalid base64 image data: {e}"
        )))
    })
}
