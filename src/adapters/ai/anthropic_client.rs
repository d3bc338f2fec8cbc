//! Anthropic Messages API implementation of the completion client port.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicClientConfig::new(api_key)
//!     .with_model("claude-sonnet-4-20250514")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let client = AnthropicClient::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::conversation::TurnRole;
use crate::ports::{CompletionClient, CompletionError, CompletionRequest, CompletionResponse};

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic client.
#[derive(Debug, Clone)]
pub struct AnthropicClientConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl AnthropicClientConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic Messages API client.
pub struct AnthropicClient {
    config: AnthropicClientConfig,
    client: Client,
}

impl AnthropicClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: AnthropicClientConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::InvalidRequest(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Builds the messages endpoint URL.
    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url)
    }

    /// Converts our request to Anthropic's format.
    fn to_api_request(&self, request: &CompletionRequest) -> ApiRequest {
        let mut messages = Vec::new();

        // System turns are carried in the dedicated system field.
        for turn in &request.turns {
            let role = match turn.role {
                TurnRole::System => continue,
                TurnRole::User => "user",
                TurnRole::Assistant => "assistant",
            };
            messages.push(ApiMessage {
                role: role.to_string(),
                content: turn.text.clone(),
            });
        }

        let system = request.system_prompt.clone().or_else(|| {
            let from_turns: Vec<String> = request
                .turns
                .iter()
                .filter(|t| t.role == TurnRole::System)
                .map(|t| t.text.clone())
                .collect();
            if from_turns.is_empty() {
                None
            } else {
                Some(from_turns.join("\n"))
            }
        });

        ApiRequest {
            model: self.config.model.clone(),
            messages,
            system,
            max_tokens: request.max_tokens.unwrap_or(1024),
            temperature: request.temperature,
        }
    }

    /// Sends a request and maps transport errors.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, CompletionError> {
        let api_request = self.to_api_request(request);
        if api_request.messages.is_empty() {
            return Err(CompletionError::InvalidRequest(
                "request has no user or assistant turns".to_string(),
            ));
        }

        self.client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    CompletionError::network(format!("Connection failed: {}", e))
                } else {
                    CompletionError::network(e.to_string())
                }
            })
    }

    /// Maps non-success statuses onto completion errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, CompletionError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(CompletionError::AuthenticationFailed),
            429 => Err(CompletionError::rate_limited(60)),
            400 => Err(CompletionError::InvalidRequest(error_body)),
            500..=599 => Err(CompletionError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(CompletionError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, CompletionError> {
        let response = self.send_request(&request).await?;
        let response = self.handle_response_status(response).await?;

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::parse(e.to_string()))?;

        let content = body
            .content
            .iter()
            .filter(|block| block.block_type == "text")
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("");

        if content.is_empty() {
            return Err(CompletionError::parse("response has no text content"));
        }

        Ok(CompletionResponse {
            content,
            model: body.model,
        })
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    model: String,
    content: Vec<ApiContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ApiContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ConversationTurn;

    fn test_client() -> AnthropicClient {
        AnthropicClient::new(AnthropicClientConfig::new("test-key")).unwrap()
    }

    #[test]
    fn config_builder_overrides_defaults() {
        let config = AnthropicClientConfig::new("key")
            .with_model("claude-3-haiku-20240307")
            .with_base_url("http://localhost:8080")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.model, "claude-3-haiku-20240307");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn messages_url_appends_endpoint() {
        let client = test_client();
        assert_eq!(client.messages_url(), "https://api.anthropic.com/v1/messages");
    }

    #[test]
    fn api_request_moves_system_turns_to_system_field() {
        let client = test_client();
        let request = CompletionRequest::new()
            .with_transcript(&[
                ConversationTurn::system("Extract fields as JSON"),
                ConversationTurn::user("We are a construction company"),
            ]);

        let api = client.to_api_request(&request);
        assert_eq!(api.messages.len(), 1);
        assert_eq!(api.messages[0].role, "user");
        assert_eq!(api.system.as_deref(), Some("Extract fields as JSON"));
    }

    #[test]
    fn explicit_system_prompt_wins_over_system_turns() {
        let client = test_client();
        let request = CompletionRequest::new()
            .with_system_prompt("Primary prompt")
            .with_transcript(&[
                ConversationTurn::system("Ignored"),
                ConversationTurn::user("Hello"),
            ]);

        let api = client.to_api_request(&request);
        assert_eq!(api.system.as_deref(), Some("Primary prompt"));
    }

    #[test]
    fn api_request_defaults_max_tokens() {
        let client = test_client();
        let request = CompletionRequest::new().with_turn(TurnRole::User, "hi");
        let api = client.to_api_request(&request);
        assert_eq!(api.max_tokens, 1024);
    }

    #[test]
    fn api_response_parses_text_blocks() {
        let json = r#"{
            "model": "claude-sonnet-4-20250514",
            "content": [
                {"type": "text", "text": "part one "},
                {"type": "text", "text": "part two"}
            ]
        }"#;
        let parsed: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.content.len(), 2);
        assert_eq!(parsed.content[0].text, "part one ");
    }
}
