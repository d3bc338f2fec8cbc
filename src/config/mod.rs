//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `LEAD_RADAR_` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use lead_radar::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
pub mod telemetry;
mod vetting;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use vetting::VettingConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Completion-provider configuration.
    #[serde(default)]
    pub ai: AiConfig,

    /// Vetting pipeline configuration (timeouts, freshness windows).
    #[serde(default)]
    pub vetting: VettingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file if present (for development), then reads
    /// environment variables with the `LEAD_RADAR` prefix, with `__`
    /// separating nested keys (e.g. `LEAD_RADAR_AI__MODEL`).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("LEAD_RADAR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(ConfigError::Load)?;

        config.try_deserialize().map_err(ConfigError::Load)
    }

    /// Validate all configuration sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.vetting.validate()?;
        Ok(())
    }
}
