//! Configuration error types
//!
//! Error codes:
//! - LRC_CONFIG_IO
//! - LRC_CONFIG_PARSE
//! - LRC_CONFIG_INVALID
//! - LRC_CONFIG_SCHEME

use thiserror::Error;

use crate::scheme::SchemeError;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("invalid config JSON: {0}")]
    Parse(String),

    /// A setting is out of range
    #[error("invalid {section} config: {reason}")]
    Invalid {
        section: &'static str,
        reason: String,
    },

    /// A configured scheme could not be registered
    #[error("invalid scheme: {0}")]
    Scheme(#[from] SchemeError),
}

impl ConfigError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "LRC_CONFIG_IO",
            ConfigError::Parse(_) => "LRC_CONFIG_PARSE",
            ConfigError::Invalid { .. } => "LRC_CONFIG_INVALID",
            ConfigError::Scheme(_) => "LRC_CONFIG_SCHEME",
        }
    }

    pub(super) fn invalid(section: &'static str) -> impl FnOnce(String) -> Self {
        move |reason| ConfigError::Invalid { section, reason }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}
