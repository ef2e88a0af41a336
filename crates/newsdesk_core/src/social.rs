//! Social media copy produced alongside the script.

use serde::{Deserialize, Serialize};

/// Platform-specific copy for one story or roundup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMediaContent {
    /// YouTube upload metadata
    pub youtube: YoutubeContent,
    /// Facebook post
    pub facebook: PlatformPost,
    /// Instagram caption
    pub instagram: PlatformPost,
}

/// YouTube title, description and discovery metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YoutubeContent {
    /// Video title
    pub title: String,
    /// Video description
    pub description: String,
    /// Search keywords
    pub keywords: Vec<String>,
    /// Hashtags, including the leading `#`
    pub hashtags: Vec<String>,
}

/// A single post body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformPost {
    /// Post text
    pub post: String,
}
