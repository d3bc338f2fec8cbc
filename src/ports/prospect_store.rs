//! Prospect registry port.

use async_trait::async_trait;

use crate::domain::foundation::ProspectId;
use crate::domain::vetting::Prospect;

use super::StoreError;

/// Port for reading and writing prospect records.
#[async_trait]
pub trait ProspectStore: Send + Sync {
    /// Reads a prospect by id.
    async fn get(&self, id: ProspectId) -> Result<Option<Prospect>, StoreError>;

    /// Creates or replaces a prospect record.
    async fn upsert(&self, prospect: Prospect) -> Result<(), StoreError>;
}
