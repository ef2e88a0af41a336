//! Paragraph-aligned text-to-video prompts.

use serde::{Deserialize, Serialize};

/// One paragraph of a script with its video prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphPrompt {
    /// Paragraph text as segmented by the model
    pub paragraph: String,
    /// Cinematic text-to-video prompt for the paragraph
    pub prompt: String,
}

/// Ordered paragraph prompts. Segmentation is decided by the model.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParagraphPromptSet {
    prompts: Vec<ParagraphPrompt>,
}

impl ParagraphPromptSet {
    /// Wrap an ordered list of prompts.
    pub fn new(prompts: Vec<ParagraphPrompt>) -> Self {
        Self { prompts }
    }

    /// Number of paragraphs.
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// True when the model returned no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Iterate in script order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParagraphPrompt> {
        self.prompts.iter()
    }

    /// Consume into the underlying list.
    pub fn into_inner(self) -> Vec<ParagraphPrompt> {
        self.prompts
    }
}

impl IntoIterator for ParagraphPromptSet {
    type Item = ParagraphPrompt;
    type IntoIter = std::vec::IntoIter<ParagraphPrompt>;

    fn into_iter(self) -> Self::IntoIter {
        self.prompts.into_iter()
    }
}
