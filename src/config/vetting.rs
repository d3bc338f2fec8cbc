//! Vetting pipeline configuration.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Timeouts and freshness windows for the vetting pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct VettingConfig {
    /// Domain cache time-to-live in days.
    #[serde(default = "default_cache_ttl_days")]
    pub domain_cache_ttl_days: i64,

    /// Snapshot freshness window in hours.
    #[serde(default = "default_freshness_hours")]
    pub snapshot_freshness_hours: i64,

    /// Per-validator timeout in seconds.
    #[serde(default = "default_validator_timeout")]
    pub validator_timeout_secs: u64,

    /// Site fetch timeout in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub site_fetch_timeout_secs: u64,

    /// Extraction fallback (LLM) timeout in seconds.
    #[serde(default = "default_fallback_timeout")]
    pub extraction_fallback_timeout_secs: u64,
}

impl VettingConfig {
    /// Validator timeout as a Duration.
    pub fn validator_timeout(&self) -> Duration {
        Duration::from_secs(self.validator_timeout_secs)
    }

    /// Site fetch timeout as a Duration.
    pub fn site_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.site_fetch_timeout_secs)
    }

    /// Extraction fallback timeout as a Duration.
    pub fn extraction_fallback_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_fallback_timeout_secs)
    }

    /// Validate the section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.domain_cache_ttl_days <= 0 {
            return Err(ValidationError::invalid_value(
                "vetting.domain_cache_ttl_days",
                "must be positive",
            ));
        }
        if self.snapshot_freshness_hours <= 0 {
            return Err(ValidationError::invalid_value(
                "vetting.snapshot_freshness_hours",
                "must be positive",
            ));
        }
        if self.validator_timeout_secs == 0 {
            return Err(ValidationError::invalid_value(
                "vetting.validator_timeout_secs",
                "must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for VettingConfig {
    fn default() -> Self {
        Self {
            domain_cache_ttl_days: default_cache_ttl_days(),
            snapshot_freshness_hours: default_freshness_hours(),
            validator_timeout_secs: default_validator_timeout(),
            site_fetch_timeout_secs: default_fetch_timeout(),
            extraction_fallback_timeout_secs: default_fallback_timeout(),
        }
    }
}

fn default_cache_ttl_days() -> i64 {
    30
}

fn default_freshness_hours() -> i64 {
    24
}

fn default_validator_timeout() -> u64 {
    20
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_fallback_timeout() -> u64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pipeline_contract() {
        let config = VettingConfig::default();
        assert_eq!(config.domain_cache_ttl_days, 30);
        assert_eq!(config.snapshot_freshness_hours, 24);
        assert_eq!(config.validator_timeout(), Duration::from_secs(20));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_nonpositive_windows() {
        let config = VettingConfig {
            domain_cache_ttl_days: 0,
            ..VettingConfig::default()
        };
        assert!(config.validate().is_err());

        let config = VettingConfig {
            snapshot_freshness_hours: -1,
            ..VettingConfig::default()
        };
        assert!(config.validate().is_err());

        let config = VettingConfig {
            validator_timeout_secs: 0,
            ..VettingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
