//! Completion-provider configuration.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Completion-provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Anthropic API key.
    pub anthropic_api_key: Option<String>,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// True when an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.anthropic_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate the section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::invalid_value(
                "ai.timeout_secs",
                "must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_timeout() -> u64 {
    30
}
