//! Image payloads exchanged with the generation backend.

use serde::{Deserialize, Serialize};

/// Aspect ratios the image backend can render.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum AspectRatio {
    /// Widescreen, used for anchor shots, thumbnails and B-roll.
    #[serde(rename = "16:9")]
    #[strum(serialize = "16:9")]
    Landscape,
    /// Vertical, used for short-form anchor shots.
    #[serde(rename = "9:16")]
    #[strum(serialize = "9:16")]
    Portrait,
    /// Square, used for social posts.
    #[serde(rename = "1:1")]
    #[strum(serialize = "1:1")]
    Square,
}

/// A user-supplied image sent alongside a text request as visual context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    /// MIME type, e.g. "image/jpeg"
    pub mime: String,
    /// Raw encoded bytes
    pub data: Vec<u8>,
}

impl ReferenceImage {
    /// Create a reference image with an explicit MIME type.
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }

    /// Create a JPEG reference image.
    pub fn jpeg(data: Vec<u8>) -> Self {
        Self::new("image/jpeg", data)
    }
}

/// An image rendered by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// MIME type of the encoded bitmap
    pub mime: String,
    /// Encoded bitmap bytes
    pub data: Vec<u8>,
    /// Aspect ratio that was requested
    pub aspect_ratio: AspectRatio,
}

impl GeneratedImage {
    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/png" => "png",
            "image/webp" => "webp",
            _ => "jpg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn aspect_ratio_uses_backend_notation() {
        assert_eq!(AspectRatio::Landscape.to_string(), "16:9");
        assert_eq!(AspectRatio::from_str("9:16").ok(), Some(AspectRatio::Portrait));
        assert_eq!(
            serde_json::to_string(&AspectRatio::Square).ok().as_deref(),
            Some("\"1:1\"")
        );
    }
}
