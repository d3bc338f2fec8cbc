//! Mock completion client for testing.
//!
//! Configurable to return queued responses, simulate latency, or inject
//! errors, with call tracking for verification.
//!
//! # Example
//!
//! ```ignore
//! let client = MockCompletionClient::new()
//!     .with_response(r#"{"industry": "construction"}"#)
//!     .with_delay(Duration::from_millis(50));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{CompletionClient, CompletionError, CompletionRequest, CompletionResponse};

/// A queued mock reply.
#[derive(Debug, Clone)]
enum QueuedReply {
    Success(String),
    Error(MockCompletionError),
}

/// Mock error shapes for testing error handling.
#[derive(Debug, Clone)]
pub enum MockCompletionError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockCompletionError> for CompletionError {
    fn from(err: MockCompletionError) -> Self {
        match err {
            MockCompletionError::RateLimited { retry_after_secs } => {
                CompletionError::rate_limited(retry_after_secs)
            }
            MockCompletionError::Unavailable { message } => CompletionError::unavailable(message),
            MockCompletionError::AuthenticationFailed => CompletionError::AuthenticationFailed,
            MockCompletionError::Network { message } => CompletionError::network(message),
            MockCompletionError::Timeout { timeout_secs } => {
                CompletionError::Timeout { timeout_secs }
            }
        }
    }
}

/// Mock completion client.
#[derive(Debug, Clone)]
pub struct MockCompletionClient {
    /// Queued replies, consumed in order.
    replies: Arc<Mutex<VecDeque<QueuedReply>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Recorded requests for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCompletionClient {
    /// Creates a mock with no queued replies.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(QueuedReply::Success(content.into()));
        self
    }

    /// Queues an error reply.
    pub fn with_error(self, error: MockCompletionError) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(QueuedReply::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All recorded requests.
    pub fn recorded_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn next_reply(&self) -> QueuedReply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| QueuedReply::Success("Mock response".to_string()))
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, CompletionError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            QueuedReply::Success(content) => Ok(CompletionResponse {
                content,
                model: "mock-model".to_string(),
            }),
            QueuedReply::Error(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::TurnRole;

    fn test_request() -> CompletionRequest {
        CompletionRequest::new().with_turn(TurnRole::User, "Hello")
    }

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let client = MockCompletionClient::new()
            .with_response("First")
            .with_response("Second");

        assert_eq!(client.complete(test_request()).await.unwrap().content, "First");
        assert_eq!(client.complete(test_request()).await.unwrap().content, "Second");
    }

    #[tokio::test]
    async fn returns_default_after_queue_exhausted() {
        let client = MockCompletionClient::new().with_response("Only one");

        client.complete(test_request()).await.unwrap();
        let second = client.complete(test_request()).await.unwrap();
        assert_eq!(second.content, "Mock response");
    }

    #[tokio::test]
    async fn returns_queued_error() {
        let client = MockCompletionClient::new().with_error(MockCompletionError::Timeout {
            timeout_secs: 20,
        });

        let err = client.complete(test_request()).await.unwrap_err();
        assert!(matches!(err, CompletionError::Timeout { timeout_secs: 20 }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn tracks_calls() {
        let client = MockCompletionClient::new();
        assert_eq!(client.call_count(), 0);

        client.complete(test_request()).await.unwrap();
        client.complete(test_request()).await.unwrap();

        assert_eq!(client.call_count(), 2);
        assert_eq!(client.recorded_calls()[0].turns[0].text, "Hello");
    }

    #[tokio::test]
    async fn respects_configured_delay() {
        let client = MockCompletionClient::new()
            .with_response("slow")
            .with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        client.complete(test_request()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
