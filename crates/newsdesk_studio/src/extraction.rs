//! JSON extraction and typed validation of model responses.
//!
//! Responses are read in two steps. The text is first narrowed to a single
//! JSON object (code fences stripped, then first `{` to last `}`); failure
//! there is a [`MalformedResponse`](StudioErrorKind::MalformedResponse). The
//! object is then deserialized into the expected type; missing or mistyped
//! fields are an
//! [`IncompleteGenerationResult`](StudioErrorKind::IncompleteGenerationResult).

use newsdesk_error::{StudioError, StudioErrorKind, StudioResult};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;

static CODE_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```(\w*)?\s*\n?(.*?)\n?\s*```$").expect("code fence pattern is valid")
});

const PREVIEW_CHARS: usize = 200;

/// Narrow a model response to the outermost JSON object.
///
/// # Examples
///
/// ```
/// use newsdesk_studio::extract_json;
///
/// let raw = "```json\n{\"script\": \"Hello\"}\n```";
/// assert_eq!(extract_json(raw).unwrap(), "{\"script\": \"Hello\"}");
///
/// let chatty = "Sure! Here you go: {\"a\": {\"b\": 1}} Hope that helps.";
/// assert_eq!(extract_json(chatty).unwrap(), "{\"a\": {\"b\": 1}}");
/// ```
pub fn extract_json(response: &str) -> StudioResult<&str> {
    let trimmed = response.trim();
    let unfenced = CODE_FENCE_RE
        .captures(trimmed)
        .and_then(|caps| caps.get(2))
        .map(|body| body.as_str().trim())
        .filter(|body| !body.is_empty())
        .unwrap_or(trimmed);

    match (unfenced.find('{'), unfenced.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&unfenced[start..=end]),
        _ => Err(StudioError::new(StudioErrorKind::MalformedResponse(format!(
            "Could not find a valid JSON object in the response: {}",
            preview(response)
        )))),
    }
}

/// Extract and deserialize a JSON object from a model response.
pub fn parse_structured<T: DeserializeOwned>(response: &str) -> StudioResult<T> {
    let json = extract_json(response)?;

    let value: serde_json::Value = serde_json::from_str(json).map_err(|e| {
        StudioError::new(StudioErrorKind::MalformedResponse(format!(
            "Response is not valid JSON ({e}): {}",
            preview(json)
        )))
    })?;

    serde_json::from_value(value).map_err(|e| {
        StudioError::new(StudioErrorKind::IncompleteGenerationResult(format!(
            "Response does not match the expected structure: {e}"
        )))
    })
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
