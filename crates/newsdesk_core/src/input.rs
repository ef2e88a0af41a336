//! Input parts of a text generation request.

use crate::ReferenceImage;

/// A single part of a multimodal request.
///
/// # Examples
///
/// ```
/// use newsdesk_core::{Input, ReferenceImage};
///
/// let parts = vec![
///     Input::Text("Summarise this photo".to_string()),
///     Input::Image(ReferenceImage::jpeg(vec![0xFF, 0xD8])),
/// ];
/// assert!(parts[1].is_image());
/// ```
#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum Input {
    /// Instruction text.
    Text(String),
    /// Inline image attachment.
    Image(ReferenceImage),
}

impl Input {
    /// True for inline image attachments.
    pub fn is_image(&self) -> bool {
        matches!(self, Input::Image(_))
    }
}
