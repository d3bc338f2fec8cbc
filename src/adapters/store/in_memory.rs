//! In-memory implementations of the persistence ports.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::ConversationTurn;
use crate::domain::foundation::{ProspectId, SessionId};
use crate::domain::vetting::{Prospect, ValidationSnapshot};
use crate::ports::{ConversationStore, ProspectStore, SnapshotStore, StoreError};

/// Conversation store backed by a `RwLock<HashMap>`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    transcripts: Arc<RwLock<HashMap<SessionId, Vec<ConversationTurn>>>>,
}

impl InMemoryConversationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a full transcript for a session.
    pub async fn seed(&self, session_id: SessionId, turns: Vec<ConversationTurn>) {
        self.transcripts.write().await.insert(session_id, turns);
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn load(&self, session_id: SessionId) -> Result<Vec<ConversationTurn>, StoreError> {
        Ok(self
            .transcripts
            .read()
            .await
            .get(&session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn append(
        &self,
        session_id: SessionId,
        turn: ConversationTurn,
    ) -> Result<(), StoreError> {
        self.transcripts
            .write()
            .await
            .entry(session_id)
            .or_default()
            .push(turn);
        Ok(())
    }
}

/// Prospect registry backed by a `RwLock<HashMap>`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProspectStore {
    prospects: Arc<RwLock<HashMap<ProspectId, Prospect>>>,
}

impl InMemoryProspectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProspectStore for InMemoryProspectStore {
    async fn get(&self, id: ProspectId) -> Result<Option<Prospect>, StoreError> {
        Ok(self.prospects.read().await.get(&id).cloned())
    }

    async fn upsert(&self, prospect: Prospect) -> Result<(), StoreError> {
        self.prospects.write().await.insert(prospect.id, prospect);
        Ok(())
    }
}

/// Append-only snapshot store backed by a `RwLock<Vec>` per prospect.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    rows: Arc<RwLock<HashMap<ProspectId, Vec<ValidationSnapshot>>>>,
}

impl InMemorySnapshotStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total snapshot rows across all prospects.
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn append(&self, snapshot: ValidationSnapshot) -> Result<(), StoreError> {
        self.rows
            .write()
            .await
            .entry(snapshot.prospect_id)
            .or_default()
            .push(snapshot);
        Ok(())
    }

    async fn latest_for(
        &self,
        prospect_id: ProspectId,
    ) -> Result<Option<ValidationSnapshot>, StoreError> {
        Ok(self
            .rows
            .read()
            .await
            .get(&prospect_id)
            .and_then(|rows| rows.iter().max_by_key(|s| s.created_at).cloned()))
    }

    async fn history_for(
        &self,
        prospect_id: ProspectId,
    ) -> Result<Vec<ValidationSnapshot>, StoreError> {
        let mut rows = self
            .rows
            .read()
            .await
            .get(&prospect_id)
            .cloned()
            .unwrap_or_default();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}
