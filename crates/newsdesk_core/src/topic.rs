//! The closed set of news categories.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// Category label assigned to a single-story bundle.
///
/// # Examples
///
/// ```
/// use newsdesk_core::NewsTopic;
///
/// assert_eq!(NewsTopic::normalize("Technology"), NewsTopic::Technology);
/// assert_eq!(NewsTopic::normalize("crypto"), NewsTopic::Default);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NewsTopic {
    /// Elections, government, policy
    Politics,
    /// Sport results and events
    Sports,
    /// Technology and computing
    Technology,
    /// Weather and climate events
    Weather,
    /// Markets and the economy
    Finance,
    /// Film, music, celebrity
    Entertainment,
    /// Medicine and public health
    Health,
    /// Research and discovery
    Science,
    /// Fallback when no other label applies
    #[default]
    Default,
}

impl NewsTopic {
    /// Parse a model-supplied label, lower-casing it first.
    ///
    /// Returns `None` for labels outside the closed set.
    pub fn parse_label(raw: &str) -> Option<Self> {
        Self::from_str(&raw.trim().to_lowercase()).ok()
    }

    /// Parse a model-supplied label, substituting [`NewsTopic::Default`] for
    /// anything unrecognized.
    pub fn normalize(raw: &str) -> Self {
        Self::parse_label(raw).unwrap_or_else(|| {
            tracing::warn!(topic = raw, "Unknown topic returned by model, using default");
            Self::Default
        })
    }

    /// Comma-separated labels a model may choose from (excludes `default`).
    pub fn prompt_list() -> String {
        Self::iter()
            .filter(|topic| *topic != Self::Default)
            .map(|topic| topic.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_case_insensitive() {
        assert_eq!(NewsTopic::parse_label("FINANCE"), Some(NewsTopic::Finance));
        assert_eq!(NewsTopic::parse_label(" sports "), Some(NewsTopic::Sports));
        assert_eq!(NewsTopic::parse_label("gardening"), None);
    }

    #[test]
    fn unknown_labels_fall_back_to_default() {
        for raw in ["", "World News", "technology!"] {
            assert_eq!(NewsTopic::normalize(raw), NewsTopic::Default);
        }
    }

    #[test]
    fn prompt_list_omits_default() {
        let list = NewsTopic::prompt_list();
        assert!(list.starts_with("politics, sports"));
        assert!(!list.contains("default"));
        assert_eq!(list.split(", ").count(), 8);
    }
}
