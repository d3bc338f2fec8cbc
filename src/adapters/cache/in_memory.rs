//! In-memory domain cache for testing and single-server deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{CacheError, DomainCache, DomainCacheEntry};

/// Domain cache backed by a `RwLock<HashMap>`.
///
/// Upserts are last-write-wins under the write lock, which is all the
/// atomicity the cache contract asks for.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDomainCache {
    entries: Arc<RwLock<HashMap<String, DomainCacheEntry>>>,
}

impl InMemoryDomainCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently cached.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl DomainCache for InMemoryDomainCache {
    async fn get(&self, domain: &str) -> Result<Option<DomainCacheEntry>, CacheError> {
        Ok(self.entries.read().await.get(domain).cloned())
    }

    async fn upsert(&self, entry: DomainCacheEntry) -> Result<(), CacheError> {
        self.entries
            .write()
            .await
            .insert(entry.domain.clone(), entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Percentage, Timestamp};
    use crate::domain::vetting::WebsiteIntel;

    fn entry(domain: &str, legitimacy: u8) -> DomainCacheEntry {
        DomainCacheEntry::new(
            domain,
            WebsiteIntel::default(),
            Percentage::new(legitimacy),
            Timestamp::now(),
        )
    }

    #[tokio::test]
    async fn get_returns_none_for_missing_domain() {
        let cache = InMemoryDomainCache::new();
        assert!(cache.get("acme.example").await.unwrap().is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn upsert_then_get_roundtrips() {
        let cache = InMemoryDomainCache::new();
        cache.upsert(entry("acme.example", 70)).await.unwrap();

        let got = cache.get("acme.example").await.unwrap().unwrap();
        assert_eq!(got.legitimacy, Percentage::new(70));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn upsert_is_last_write_wins() {
        let cache = InMemoryDomainCache::new();
        cache.upsert(entry("acme.example", 40)).await.unwrap();
        cache.upsert(entry("acme.example", 85)).await.unwrap();

        let got = cache.get("acme.example").await.unwrap().unwrap();
        assert_eq!(got.legitimacy, Percentage::new(85));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn concurrent_upserts_do_not_corrupt_state() {
        let cache = InMemoryDomainCache::new();
        let mut handles = Vec::new();
        for i in 0..16u8 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                cache.upsert(entry("acme.example", i)).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // One of the sixteen writes won; the entry is intact either way.
        let got = cache.get("acme.example").await.unwrap().unwrap();
        assert!(got.legitimacy.value() < 16);
        assert_eq!(cache.len().await, 1);
    }
}
