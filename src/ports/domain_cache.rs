//! Domain-analysis cache port.
//!
//! Freshness is a read-time computation over the entry's timestamp; writes
//! are idempotent upserts where the last successful write wins. A transient
//! double-fetch race for the same domain is acceptable and must not corrupt
//! state, so implementations need an atomic upsert, not a lock.

use async_trait::async_trait;
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Percentage, Timestamp};
use crate::domain::vetting::WebsiteIntel;

/// One cached website analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainCacheEntry {
    /// Normalized domain (no scheme, no `www.`, no trailing slash).
    pub domain: String,
    /// Structured intelligence summary from the last successful analysis.
    pub intel: WebsiteIntel,
    /// Legitimacy score computed at analysis time.
    pub legitimacy: Percentage,
    /// When the analysis ran.
    pub analyzed_at: Timestamp,
}

impl DomainCacheEntry {
    /// Creates a cache entry stamped at the given time.
    pub fn new(
        domain: impl Into<String>,
        intel: WebsiteIntel,
        legitimacy: Percentage,
        analyzed_at: Timestamp,
    ) -> Self {
        Self {
            domain: domain.into(),
            intel,
            legitimacy,
            analyzed_at,
        }
    }

    /// True while the entry is younger than the TTL.
    ///
    /// The boundary is strict: an entry exactly `ttl_days` old is stale.
    pub fn is_fresh(&self, ttl_days: i64, now: &Timestamp) -> bool {
        self.analyzed_at.age_at(now) < Duration::days(ttl_days)
    }
}

/// Port for the per-domain analysis cache.
#[async_trait]
pub trait DomainCache: Send + Sync {
    /// Reads the entry for a domain, fresh or stale.
    async fn get(&self, domain: &str) -> Result<Option<DomainCacheEntry>, CacheError>;

    /// Writes an entry, unconditionally replacing any existing one.
    async fn upsert(&self, entry: DomainCacheEntry) -> Result<(), CacheError>;
}

/// Cache backend errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Underlying storage failed.
    #[error("cache backend error: {0}")]
    Backend(String),

    /// Stored entry could not be decoded.
    #[error("cache decode error: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_at(analyzed_at: Timestamp) -> DomainCacheEntry {
        DomainCacheEntry::new(
            "acme.example",
            WebsiteIntel::default(),
            Percentage::new(40),
            analyzed_at,
        )
    }

    #[test]
    fn entry_is_fresh_within_ttl() {
        let now = Timestamp::from_unix_secs(2_000_000_000);
        let entry = entry_at(now.minus_days(29));
        assert!(entry.is_fresh(30, &now));
    }

    #[test]
    fn entry_exactly_at_ttl_is_stale() {
        let now = Timestamp::from_unix_secs(2_000_000_000);
        let entry = entry_at(now.minus_days(30));
        assert!(!entry.is_fresh(30, &now));
    }

    #[test]
    fn entry_past_ttl_is_stale() {
        let now = Timestamp::from_unix_secs(2_000_000_000);
        let entry = entry_at(now.minus_days(31));
        assert!(!entry.is_fresh(30, &now));
    }

    #[test]
    fn one_second_old_entry_is_fresh() {
        let now = Timestamp::from_unix_secs(2_000_000_000);
        let entry = entry_at(now.minus_secs(1));
        assert!(entry.is_fresh(30, &now));
    }

    #[test]
    fn domain_cache_is_object_safe() {
        fn _accepts_dyn(_cache: &dyn DomainCache) {}
    }
}
