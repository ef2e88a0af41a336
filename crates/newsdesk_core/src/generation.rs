//! Validated requests for a generation run.

use crate::{ReferenceImage, StoryMode};
use newsdesk_error::{StudioError, StudioErrorKind, StudioResult};

/// Most stories a roundup may cover.
pub const MAX_STORIES: usize = 3;
/// Fewest stories a roundup may cover.
pub const MIN_STORIES: usize = 2;

/// One headline slot of a roundup.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryInput {
    /// Headline text
    pub headline: String,
    /// Optional reference image for this story
    pub image: Option<ReferenceImage>,
}

impl StoryInput {
    /// A headline without a reference image.
    pub fn new(headline: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            image: None,
        }
    }

    /// Attach a reference image.
    pub fn with_image(mut self, image: ReferenceImage) -> Self {
        self.image = Some(image);
        self
    }
}

/// What a run should produce content for.
///
/// Construct through [`GenerationRequest::single`] or
/// [`GenerationRequest::multi`], which reject input the pipeline cannot use.
///
/// # Examples
///
/// ```
/// use newsdesk_core::{GenerationRequest, StoryInput};
///
/// let single = GenerationRequest::single(None, Some("City announces new park"), None).unwrap();
/// assert_eq!(single.story_count(), 1);
///
/// let multi = GenerationRequest::multi(vec![
///     StoryInput::new("Stock market rallies"),
///     StoryInput::new("New vaccine approved"),
///     StoryInput::new("   "),
/// ])
/// .unwrap();
/// assert_eq!(multi.story_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    /// Article URL; the model may fetch the page.
    Url {
        /// Validated absolute URL
        url: url::Url,
        /// Optional reference image
        image: Option<ReferenceImage>,
    },
    /// Free-form headline in any language.
    Headline {
        /// Headline text
        headline: String,
        /// Language hint, free-form
        language: Option<String>,
        /// Optional reference image
        image: Option<ReferenceImage>,
    },
    /// Two or three headlines fused into one roundup.
    MultiHeadline {
        /// Non-empty stories in input order
        stories: Vec<StoryInput>,
    },
}

impl GenerationRequest {
    /// Build a single-story request. A headline wins over a URL when both are given.
    #[track_caller]
    pub fn single(
        url: Option<&str>,
        headline: Option<&str>,
        image: Option<ReferenceImage>,
    ) -> StudioResult<Self> {
        let headline = headline.map(str::trim).filter(|h| !h.is_empty());
        let url = url.map(str::trim).filter(|u| !u.is_empty());

        match (headline, url) {
            (Some(headline), _) => Ok(Self::Headline {
                headline: headline.to_string(),
                language: None,
                image,
            }),
            (None, Some(raw)) => {
                let url = url::Url::parse(raw).map_err(|e| {
                    StudioError::new(StudioErrorKind::InvalidInput(format!(
                        "'{raw}' is not a valid URL: {e}"
                    )))
                })?;
                Ok(Self::Url { url, image })
            }
            (None, None) => Err(StudioError::new(StudioErrorKind::InvalidInput(
                "Please enter a news article URL or a headline".to_string(),
            ))),
        }
    }

    /// Build a roundup request.
    ///
    /// Blank headlines are dropped; at least two stories must remain and the
    /// first two slots must both be filled.
    #[track_caller]
    pub fn multi(stories: Vec<StoryInput>) -> StudioResult<Self> {
        if stories.len() > MAX_STORIES {
            return Err(StudioError::new(StudioErrorKind::InvalidInput(format!(
                "A roundup covers at most {MAX_STORIES} stories, got {}",
                stories.len()
            ))));
        }
        let leading_blank = stories
            .iter()
            .take(MIN_STORIES)
            .any(|story| story.headline.trim().is_empty());
        if stories.len() < MIN_STORIES || leading_blank {
            return Err(StudioError::new(StudioErrorKind::InvalidInput(
                "Please provide at least two headlines".to_string(),
            )));
        }

        let stories = stories
            .into_iter()
            .filter(|story| !story.headline.trim().is_empty())
            .map(|story| StoryInput {
                headline: story.headline.trim().to_string(),
                image: story.image,
            })
            .collect();
        Ok(Self::MultiHeadline { stories })
    }

    /// Set the language hint of a headline request. Other variants are unchanged.
    pub fn with_language(mut self, hint: impl Into<String>) -> Self {
        if let Self::Headline { language, .. } = &mut self {
            *language = Some(hint.into());
        }
        self
    }

    /// Number of stories the run covers.
    pub fn story_count(&self) -> usize {
        match self {
            Self::Url { .. } | Self::Headline { .. } => 1,
            Self::MultiHeadline { stories } => stories.len(),
        }
    }

    /// Single story or roundup.
    pub fn mode(&self) -> StoryMode {
        match self {
            Self::Url { .. } | Self::Headline { .. } => StoryMode::Single,
            Self::MultiHeadline { .. } => StoryMode::Multi,
        }
    }
}
