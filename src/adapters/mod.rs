//! Adapters: concrete implementations of the ports.

pub mod ai;
pub mod cache;
pub mod identity;
pub mod store;
pub mod web;

pub use ai::{AnthropicClient, AnthropicClientConfig, MockCompletionClient, MockCompletionError};
pub use cache::{FileDomainCache, InMemoryDomainCache};
pub use identity::{HttpIdentityDirectory, HttpIdentityDirectoryConfig, MockIdentityDirectory};
pub use store::{InMemoryConversationStore, InMemoryProspectStore, InMemorySnapshotStore};
pub use web::{HttpSiteFetcher, HttpSiteFetcherConfig, MockSiteFetcher};
