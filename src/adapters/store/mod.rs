//! In-memory persistence adapters for tests and single-process deployments.

mod in_memory;

pub use in_memory::{InMemoryConversationStore, InMemoryProspectStore, InMemorySnapshotStore};
