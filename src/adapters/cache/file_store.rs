//! File-based domain cache.
//!
//! Stores one YAML file per domain under a base directory, for single-node
//! deployments without a database. Freshness stays a read-time computation;
//! this adapter only persists entries.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{CacheError, DomainCache, DomainCacheEntry};

/// Domain cache persisted as YAML files.
#[derive(Debug, Clone)]
pub struct FileDomainCache {
    base_path: PathBuf,
}

impl FileDomainCache {
    /// Creates a cache rooted at a base directory.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// File path for a domain's entry.
    ///
    /// Domains are normalized before reaching the cache, so the only
    /// character needing replacement for a safe filename is the separator.
    fn entry_path(&self, domain: &str) -> PathBuf {
        let safe: String = domain
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.base_path.join(format!("{}.yaml", safe))
    }

    async fn ensure_base_dir(&self) -> Result<(), CacheError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }
}

#[async_trait]
impl DomainCache for FileDomainCache {
    async fn get(&self, domain: &str) -> Result<Option<DomainCacheEntry>, CacheError> {
        let path = self.entry_path(domain);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::Backend(e.to_string())),
        };

        let entry: DomainCacheEntry =
            serde_yaml::from_str(&raw).map_err(|e| CacheError::Decode(e.to_string()))?;
        Ok(Some(entry))
    }

    async fn upsert(&self, entry: DomainCacheEntry) -> Result<(), CacheError> {
        self.ensure_base_dir().await?;

        let yaml =
            serde_yaml::to_string(&entry).map_err(|e| CacheError::Backend(e.to_string()))?;

        // Write-then-rename keeps a concurrent reader from seeing a torn file.
        let path = self.entry_path(&entry.domain);
        let tmp = path.with_extension("yaml.tmp");
        fs::write(&tmp, yaml)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;

        tracing::debug!(domain = %entry.domain, "Persisted domain cache entry");
        Ok(())
    }
}
