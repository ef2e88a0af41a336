//! Generation pipeline for the Newsdesk content studio.
//!
//! A [`Studio`] turns a [`GenerationRequest`](newsdesk_core::GenerationRequest)
//! into a [`StudioRun`]: one structured text call that yields a
//! [`ContentBundle`](newsdesk_core::ContentBundle), followed by strictly
//! sequential, paced image calls with one fallback per role, and an optional
//! B-roll batch. Paragraph prompts are expanded on demand from the finished
//! script.
//!
//! Every remote call goes through a shared retry wrapper; image failures are
//! downgraded to absent images and user-visible warnings, while text failures
//! abort the run.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod assembler;
mod config;
mod extraction;
mod images;
mod multi;
mod paragraphs;
mod prompts;
mod text;

pub use assembler::{Studio, StudioRun};
pub use config::{StudioConfig, Temperatures};
pub use extraction::{extract_json, parse_structured};
pub use images::{ImageOrchestrator, generic_studio_prompt};
pub use multi::MultiStoryContentGenerator;
pub use paragraphs::ParagraphPromptExpander;
pub use prompts::DEFAULT_BASE_ANCHOR_PROMPT;
pub use text::TextContentGenerator;
