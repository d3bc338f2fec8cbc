//! Configuration error types.

use thiserror::Error;

/// Errors that occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors that occur while validating configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required configuration: {0}")]
    MissingRequired(&'static str),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

impl ValidationError {
    /// Creates an invalid-value error.
    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
