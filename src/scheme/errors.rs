//! Scheme registry error types
//!
//! Error codes:
//! - LRC_SCHEME_EMPTY_SHARD
//! - LRC_SCHEME_REPEATED_POSITION
//! - LRC_SCHEME_MISSING_PARTITION
//! - LRC_SCHEME_ALREADY_REGISTERED
//! - LRC_SCHEME_UNKNOWN

use thiserror::Error;

use super::SchemeId;

/// Result type for scheme operations
pub type SchemeResult<T> = Result<T, SchemeError>;

/// Scheme registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemeError {
    #[error("shard {index} of the partition has no positions")]
    EmptyShard { index: usize },

    #[error("position {position} appears in more than one shard")]
    RepeatedPosition { position: usize },

    #[error("LRC scheme {0} has no shard partition")]
    MissingPartition(SchemeId),

    #[error("scheme {0} is already registered")]
    AlreadyRegistered(SchemeId),

    #[error("scheme {0} is not registered")]
    UnknownScheme(SchemeId),
}

impl SchemeError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemeError::EmptyShard { .. } => "LRC_SCHEME_EMPTY_SHARD",
            SchemeError::RepeatedPosition { .. } => "LRC_SCHEME_REPEATED_POSITION",
            SchemeError::MissingPartition(_) => "LRC_SCHEME_MISSING_PARTITION",
            SchemeError::AlreadyRegistered(_) => "LRC_SCHEME_ALREADY_REGISTERED",
            SchemeError::UnknownScheme(_) => "LRC_SCHEME_UNKNOWN",
        }
    }
}
