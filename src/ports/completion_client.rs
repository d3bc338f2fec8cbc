//! Text-completion collaborator port.
//!
//! Used by the extraction fallback layer and the website analyzer's
//! summarization step. Treated as fallible and slow: every call site carries
//! a timeout and a degrade-to-default path.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::conversation::{ConversationTurn, TurnRole};

/// Port for the text-completion service.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate a completion for the given request.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, CompletionError>;
}

/// Request for a completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Conversation turns (history + current instruction).
    pub turns: Vec<ConversationTurn>,
    /// System prompt guiding the model.
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Sampling temperature; extraction calls run cold.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self {
            turns: Vec::new(),
            system_prompt: None,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Adds a turn.
    pub fn with_turn(mut self, role: TurnRole, text: impl Into<String>) -> Self {
        self.turns.push(ConversationTurn::new(role, text));
        self
    }

    /// Adds all turns from a transcript.
    pub fn with_transcript(mut self, turns: &[ConversationTurn]) -> Self {
        self.turns.extend_from_slice(turns);
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the token limit.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl Default for CompletionRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Response from a completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text.
    pub content: String,
    /// Model that produced it.
    pub model: String,
}

/// Completion service errors.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl CompletionError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CompletionError::RateLimited { .. }
                | CompletionError::Unavailable { .. }
                | CompletionError::Network(_)
                | CompletionError::Timeout { .. }
        )
    }
}
