//! Validation snapshot store port.
//!
//! Snapshots are append-only: a new vetting run writes a new row, existing
//! rows are never updated, and "most recent" is a read-time query.

use async_trait::async_trait;

use crate::domain::foundation::ProspectId;
use crate::domain::vetting::ValidationSnapshot;

use super::StoreError;

/// Port for persisting vetting snapshots.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Appends a snapshot row.
    async fn append(&self, snapshot: ValidationSnapshot) -> Result<(), StoreError>;

    /// Returns the most recent snapshot for a prospect.
    async fn latest_for(
        &self,
        prospect_id: ProspectId,
    ) -> Result<Option<ValidationSnapshot>, StoreError>;

    /// Returns all snapshots for a prospect, newest first.
    async fn history_for(
        &self,
        prospect_id: ProspectId,
    ) -> Result<Vec<ValidationSnapshot>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SnapshotStore) {}
    }
}
