//! Generative model configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Model provider and call settings
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which provider answers model calls
    #[serde(default)]
    pub provider: AiProvider,

    /// OpenAI API key
    pub openai_api_key: Option<Secret<String>>,

    /// Chat-completions base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Attempts per model call, including the first
    #[serde(default = "default_attempts")]
    pub max_attempts: u32,
}

/// Model provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    OpenAI,
    /// Scripted offline provider
    Mock,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Validate model configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider == AiProvider::OpenAI && !self.has_openai() {
            return Err(ValidationError::MissingRequired("AI__OPENAI_API_KEY"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature(self.temperature));
        }
        if !(1..=300).contains(&self.timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_attempts == 0 {
            return Err(ValidationError::InvalidAttempts);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            openai_api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout(),
            max_attempts: default_attempts(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout() -> u64 {
    30
}

fn default_attempts() -> u32 {
    3
}
