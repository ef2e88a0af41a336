//! Studio configuration.
//!
//! Values are layered from built-in defaults, an optional TOML file and
//! `NEWSDESK_`-prefixed environment variables (`__` separates nested keys, so
//! `NEWSDESK_RETRY__MAX_RETRIES=5` sets `retry.max_retries`).

use crate::prompts::DEFAULT_BASE_ANCHOR_PROMPT;
use derive_getters::Getters;
use newsdesk_error::ConfigError;
use newsdesk_rate_limit::{PacingConfig, RetryConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Environment variables consulted for the API key when the configuration
/// does not carry one, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

const ENV_PREFIX: &str = "NEWSDESK";
const DEFAULT_FILE: &str = "newsdesk.toml";

/// Sampling temperatures per generation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Temperatures {
    /// URL-based single story
    pub url: f32,
    /// Headline-based single story
    pub headline: f32,
    /// Multi-story roundup
    pub multi_story: f32,
    /// Paragraph prompt expansion
    pub paragraphs: f32,
}

impl Default for Temperatures {
    fn default() -> Self {
        Self {
            url: 0.3,
            headline: 0.5,
            multi_story: 0.6,
            paragraphs: 0.7,
        }
    }
}

/// Configuration of a [`Studio`](crate::Studio).
#[derive(Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct StudioConfig {
    /// Backend credential
    api_key: Option<String>,
    /// Model for text and JSON generation
    text_model: String,
    /// Model for image generation
    image_model: String,
    /// Backend endpoint
    base_url: String,
    /// Retry budget and backoff
    retry: RetryConfig,
    /// Spacing between image calls
    pacing: PacingConfig,
    /// Language of the roundup's translated script
    translation_language: String,
    /// News anchor description used in anchor shots
    base_anchor_prompt: String,
    /// Sampling temperatures
    temperatures: Temperatures,
}

impl std::fmt::Debug for StudioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudioConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .field("pacing", &self.pacing)
            .field("translation_language", &self.translation_language)
            .field("temperatures", &self.temperatures)
            .finish_non_exhaustive()
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "imagen-3.0-generate-002".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            retry: RetryConfig::default(),
            pacing: PacingConfig::default(),
            translation_language: "Urdu".to_string(),
            base_anchor_prompt: DEFAULT_BASE_ANCHOR_PROMPT.to_string(),
            temperatures: Temperatures::default(),
        }
    }
}

impl StudioConfig {
    /// Load from `newsdesk.toml` in the working directory (if present) and the
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load from an explicit file (required when given) and the environment.
    #[instrument(skip(path), fields(path = ?path.map(Path::display)))]
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to read configuration: {e}")))?;

        let mut loaded: Self = settings
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Invalid configuration: {e}")))?;

        if loaded.api_key.as_deref().is_none_or(str::is_empty) {
            loaded.api_key = API_KEY_VARS
                .iter()
                .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()));
        }

        debug!(config = ?loaded, "Loaded studio configuration");
        Ok(loaded)
    }

    /// The API key, or a configuration error when none was supplied.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "No API key configured. Set {ENV_PREFIX}_API_KEY, {} or {}",
                    API_KEY_VARS[0], API_KEY_VARS[1]
                ))
            })
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override retry settings.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Override pacing settings.
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Override the translation language of roundups.
    pub fn with_translation_language(mut self, language: impl Into<String>) -> Self {
        self.translation_language = language.into();
        self
    }
}
