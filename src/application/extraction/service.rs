//! Extraction service: the turn-by-turn operation the intake layer calls.
//!
//! Turns of one session are strictly serialized: extraction is defined over
//! the full transcript, so two concurrent turns for the same session would
//! race the append and produce an inconsistent extraction.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::conversation::ConversationTurn;
use crate::domain::extraction::{CompletenessAssessor, CompletenessResult, FieldExtraction};
use crate::domain::foundation::SessionId;
use crate::ports::{ConversationStore, StoreError};

use super::FieldExtractor;

/// Extraction plus completeness for the transcript after one more turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnAssessment {
    pub extraction: FieldExtraction,
    pub completeness: CompletenessResult,
}

/// Errors from processing a turn.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Per-session extraction over a conversation store.
#[derive(Clone)]
pub struct ExtractionService {
    store: Arc<dyn ConversationStore>,
    extractor: FieldExtractor,
    session_locks: Arc<Mutex<HashMap<SessionId, Arc<Mutex<()>>>>>,
}

impl ExtractionService {
    /// Creates a service over the given store and extractor.
    pub fn new(store: Arc<dyn ConversationStore>, extractor: FieldExtractor) -> Self {
        Self {
            store,
            extractor,
            session_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Appends a user turn, re-derives the extraction over the full
    /// transcript, and assesses completeness.
    pub async fn process_turn(
        &self,
        session_id: SessionId,
        user_text: impl Into<String>,
    ) -> Result<TurnAssessment, ExtractionError> {
        let lock = self.lock_for(session_id).await;
        let _guard = lock.lock().await;

        self.store
            .append(session_id, ConversationTurn::user(user_text))
            .await?;
        let turns = self.store.load(session_id).await?;

        let extraction = self.extractor.extract(&turns).await;
        let completeness = CompletenessAssessor::assess(&extraction);

        tracing::debug!(
            %session_id,
            completeness = %completeness.completeness_score,
            complete = completeness.is_complete,
            "Processed intake turn"
        );

        Ok(TurnAssessment {
            extraction,
            completeness,
        })
    }

    /// Re-derives extraction and completeness without appending a turn.
    pub async fn assess_session(
        &self,
        session_id: SessionId,
    ) -> Result<TurnAssessment, ExtractionError> {
        let lock = self.lock_for(session_id).await;
        let _guard = lock.lock().await;

        let turns = self.store.load(session_id).await?;
        let extraction = self.extractor.extract(&turns).await;
        let completeness = CompletenessAssessor::assess(&extraction);

        Ok(TurnAssessment {
            extraction,
            completeness,
        })
    }

    async fn lock_for(&self, session_id: SessionId) -> Arc<Mutex<()>> {
        self.session_locks
            .lock()
            .await
            .entry(session_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
