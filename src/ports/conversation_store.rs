//! Conversation store port.
//!
//! Turn sequences are ordered and append-only; a session owns its transcript
//! exclusively.

use async_trait::async_trait;

use crate::domain::conversation::ConversationTurn;
use crate::domain::foundation::SessionId;

/// Shared error type for the persistence ports.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying storage failed.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Stored row could not be decoded.
    #[error("storage decode error: {0}")]
    Decode(String),
}

/// Port for reading and appending conversation turns by session.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Loads the full ordered transcript for a session.
    ///
    /// An unknown session yields an empty transcript.
    async fn load(&self, session_id: SessionId) -> Result<Vec<ConversationTurn>, StoreError>;

    /// Appends one turn to a session's transcript.
    async fn append(
        &self,
        session_id: SessionId,
        turn: ConversationTurn,
    ) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn ConversationStore) {}
    }

    #[test]
    fn store_error_displays_readably() {
        assert_eq!(
            StoreError::Backend("connection refused".into()).to_string(),
            "storage backend error: connection refused"
        );
    }
}
