//! Images produced during a generation run, keyed by role.

use crate::GeneratedImage;
use derive_getters::Getters;

/// The purpose of an image within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ImageRole {
    /// Widescreen anchor shot
    #[display("anchor16x9")]
    Anchor16x9,
    /// Vertical anchor shot
    #[display("anchor9x16")]
    Anchor9x16,
    /// Square social post image for the story at this index
    #[display("postImage[{_0}]")]
    PostImage(usize),
    /// Roundup thumbnail
    #[display("thumbnail")]
    Thumbnail,
    /// B-roll still at this prompt index
    #[display("bRoll[{_0}]")]
    BRoll(usize),
}

/// Result of the single-story image batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleStoryImages {
    /// Widescreen anchor, absent if primary and fallback both failed
    pub anchor_16x9: Option<GeneratedImage>,
    /// Vertical anchor, absent if primary and fallback both failed
    pub anchor_9x16: Option<GeneratedImage>,
    /// Square post image
    pub post_image: Option<GeneratedImage>,
    /// Prompt that produced the reported widescreen anchor
    pub final_prompt: String,
    /// Whether any anchor needed the generic-studio fallback
    pub fallback_used: bool,
}

/// Result of the roundup image batch.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiStoryImages {
    /// Roundup thumbnail
    pub thumbnail: Option<GeneratedImage>,
    /// One slot per story description, in order
    pub post_images: Vec<Option<GeneratedImage>>,
}

/// Every image of a run. Absence of a role is a valid outcome.
#[derive(Debug, Clone, PartialEq, Default, Getters)]
pub struct ImageSet {
    /// Widescreen anchor shot
    anchor_16x9: Option<GeneratedImage>,
    /// Vertical anchor shot
    anchor_9x16: Option<GeneratedImage>,
    /// Roundup thumbnail
    thumbnail: Option<GeneratedImage>,
    /// Square post images, one slot per story
    post_images: Vec<Option<GeneratedImage>>,
    /// B-roll stills that were generated, in prompt order
    b_roll: Vec<GeneratedImage>,
    /// Prompt reported for the headline image
    final_prompt: Option<String>,
    /// Whether a fallback prompt was needed for an anchor shot
    fallback_used: bool,
}

impl ImageSet {
    /// Look up the image for a role.
    pub fn get(&self, role: ImageRole) -> Option<&GeneratedImage> {
        match role {
            ImageRole::Anchor16x9 => self.anchor_16x9.as_ref(),
            ImageRole::Anchor9x16 => self.anchor_9x16.as_ref(),
            ImageRole::Thumbnail => self.thumbnail.as_ref(),
            ImageRole::PostImage(index) => self.post_images.get(index).and_then(Option::as_ref),
            ImageRole::BRoll(index) => self.b_roll.get(index),
        }
    }

    /// Every present image with its role.
    pub fn present(&self) -> Vec<(ImageRole, &GeneratedImage)> {
        let mut images = Vec::new();
        if let Some(image) = &self.anchor_16x9 {
            images.push((ImageRole::Anchor16x9, image));
        }
        if let Some(image) = &self.anchor_9x16 {
            images.push((ImageRole::Anchor9x16, image));
        }
        if let Some(image) = &self.thumbnail {
            images.push((ImageRole::Thumbnail, image));
        }
        for (index, slot) in self.post_images.iter().enumerate() {
            if let Some(image) = slot {
                images.push((ImageRole::PostImage(index), image));
            }
        }
        for (index, image) in self.b_roll.iter().enumerate() {
            images.push((ImageRole::BRoll(index), image));
        }
        images
    }

    /// True when no role holds an image.
    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }

    /// Attach the B-roll batch.
    pub fn set_b_roll(&mut self, images: Vec<GeneratedImage>) {
        self.b_roll = images;
    }

    /// Swap in a regenerated thumbnail, leaving every other role untouched.
    pub fn replace_thumbnail(&mut self, image: GeneratedImage) {
        self.thumbnail = Some(image);
    }
}

impl From<SingleStoryImages> for ImageSet {
    fn from(images: SingleStoryImages) -> Self {
        Self {
            anchor_16x9: images.anchor_16x9,
            anchor_9x16: images.anchor_9x16,
            post_images: vec![images.post_image],
            final_prompt: Some(images.final_prompt),
            fallback_used: images.fallback_used,
            ..Self::default()
        }
    }
}

impl From<MultiStoryImages> for ImageSet {
    fn from(images: MultiStoryImages) -> Self {
        Self {
            thumbnail: images.thumbnail,
            post_images: images.post_images,
            ..Self::default()
        }
    }
}
