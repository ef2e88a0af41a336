//! Test utilities for studio tests.
//!
//! [`MockDriver`] replays scripted text responses in order and renders images
//! according to a per-prompt rule, recording every request with the (virtual)
//! time it was made.

#![allow(dead_code)]

use async_trait::async_trait;
use newsdesk_core::{AspectRatio, GenerateRequest, GenerateResponse, GeneratedImage, ImageRequest};
use newsdesk_error::{BackendError, BackendErrorKind, BackendResult};
use newsdesk_interface::GenerationDriver;
use newsdesk_studio::{Studio, StudioConfig};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

type ImageRule = Box<dyn Fn(&ImageRequest) -> BackendResult<Option<GeneratedImage>> + Send + Sync>;

/// Scripted generation backend.
pub struct MockDriver {
    texts: Mutex<VecDeque<BackendResult<String>>>,
    image_rule: ImageRule,
    text_calls: Mutex<Vec<(Instant, GenerateRequest)>>,
    image_calls: Mutex<Vec<(Instant, ImageRequest)>>,
}

impl std::fmt::Debug for MockDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MockDriver")
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self {
            texts: Mutex::new(VecDeque::new()),
            image_rule: Box::new(|request| Ok(Some(image_for(request)))),
            text_calls: Mutex::new(Vec::new()),
            image_calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockDriver {
    /// A driver that renders every image and has no text queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful text response.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.lock_texts().push_back(Ok(text.into()));
        self
    }

    /// Queue a failed text call.
    pub fn with_text_error(self, error: BackendError) -> Self {
        self.lock_texts().push_back(Err(error));
        self
    }

    /// Decide each image call with `rule`.
    pub fn with_image_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&ImageRequest) -> BackendResult<Option<GeneratedImage>> + Send + Sync + 'static,
    {
        self.image_rule = Box::new(rule);
        self
    }

    /// Return no image for prompts containing any of `needles`.
    pub fn refusing(self, needles: &'static [&'static str]) -> Self {
        self.with_image_rule(move |request| {
            if needles.iter().any(|needle| request.prompt().contains(needle)) {
                Ok(None)
            } else {
                Ok(Some(image_for(request)))
            }
        })
    }

    /// Every text request made so far.
    pub fn text_requests(&self) -> Vec<GenerateRequest> {
        self.text_calls
            .lock()
            .expect("lock")
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    /// Every image request made so far.
    pub fn image_requests(&self) -> Vec<ImageRequest> {
        self.image_calls
            .lock()
            .expect("lock")
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    /// Virtual time of each image call.
    pub fn image_call_times(&self) -> Vec<Instant> {
        self.image_calls
            .lock()
            .expect("lock")
            .iter()
            .map(|(at, _)| *at)
            .collect()
    }

    fn lock_texts(&self) -> std::sync::MutexGuard<'_, VecDeque<BackendResult<String>>> {
        self.texts.lock().expect("lock")
    }
}

#[async_trait]
impl GenerationDriver for MockDriver {
    async fn generate(&self, request: &GenerateRequest) -> BackendResult<GenerateResponse> {
        self.text_calls
            .lock()
            .expect("lock")
            .push((Instant::now(), request.clone()));
        let next = self.lock_texts().pop_front();
        match next {
            Some(Ok(text)) => Ok(GenerateResponse::from_text(text)),
            Some(Err(error)) => Err(error),
            None => Err(BackendError::new(BackendErrorKind::Transport(
                "no scripted response left".to_string(),
            ))),
        }
    }

    async fn generate_image(&self, request: &ImageRequest) -> BackendResult<Option<GeneratedImage>> {
        self.image_calls
            .lock()
            .expect("lock")
            .push((Instant::now(), request.clone()));
        (self.image_rule)(request)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A fake JPEG whose bytes are the prompt, so tests can tell images apart.
pub fn image_for(request: &ImageRequest) -> GeneratedImage {
    GeneratedImage {
        mime: "image/jpeg".to_string(),
        data: request.prompt().as_bytes().to_vec(),
        aspect_ratio: *request.aspect_ratio(),
    }
}

/// Prompt that produced `image`.
pub fn prompt_of(image: &GeneratedImage) -> String {
    String::from_utf8_lossy(&image.data).into_owned()
}

/// A rate-limit error the retry wrapper treats as transient.
pub fn quota_error() -> BackendError {
    BackendError::new(BackendErrorKind::Http {
        status_code: 429,
        message: "RESOURCE_EXHAUSTED: Quota exceeded for imagen".to_string(),
    })
}

/// Default configuration with a key; retry and pacing use production values.
pub fn config() -> StudioConfig {
    StudioConfig::default().with_api_key("test-key")
}

/// Studio over a shared mock.
pub fn studio(driver: &Arc<MockDriver>) -> Studio {
    Studio::new(driver.clone(), &config())
}

fn social() -> serde_json::Value {
    json!({
        "youtube": {
            "title": "New Park Coming",
            "description": "The city has approved a new park.",
            "keywords": ["park", "city"],
            "hashtags": ["#CityNews"]
        },
        "facebook": {"post": "A new park is on the way!"},
        "instagram": {"post": "Green space incoming. #CityNews"}
    })
}

/// A valid single-story response.
pub fn single_story_json() -> String {
    json!({
        "script": "The city announced a new park on the east side. Construction begins next spring. Officials expect it to open within two years.",
        "topic": "Politics",
        "backgroundDescription": "a sunny city park with young trees",
        "postImageDescription": "Aerial view of a new park with the text 'NEW PARK!'",
        "socialMediaContent": social(),
        "videoImagePrompts": [
            "Drone shot over an empty lot at sunrise",
            "Architectural model of a park",
            "Children's playground equipment being unloaded"
        ],
        "storyVideoPrompts": ["Slow aerial push-in over the future park site"]
    })
    .to_string()
}

/// A valid roundup response for `stories` headlines.
pub fn multi_story_json(stories: usize) -> String {
    let descriptions: Vec<String> = (1..=stories).map(|i| format!("Story {i} at a glance")).collect();
    let video: Vec<String> = (1..=stories).map(|i| format!("Cinematic shot for story {i}")).collect();
    json!({
        "introScript": "Markets and medicine lead today's news.",
        "mainScript": "Stocks rallied to a record close.\n\n---\n\nRegulators approved a new vaccine.",
        "translatedScript": "اسٹاک ریکارڈ سطح پر بند ہوئے۔",
        "thumbnailPrompt": "Split screen of a stock chart and a vaccine vial with 'HUGE NEWS!'",
        "postImageDescriptions": descriptions,
        "socialMediaContent": social(),
        "videoImagePrompts": ["Trading floor at opening bell", "Laboratory with vials"],
        "introVideoPrompt": "Fast-paced montage of tickers and lab equipment",
        "storyVideoPrompts": video
    })
    .to_string()
}
