//! RPC error types
//!
//! Error codes:
//! - LRC_RPC_TRANSPORT
//! - LRC_RPC_TIMEOUT
//! - LRC_RPC_REMOTE
//! - LRC_RPC_UNKNOWN_HANDLE
//! - LRC_RPC_ENCODE
//! - LRC_RPC_DECODE
//! - LRC_RPC_EXHAUSTED

use std::time::Duration;

use thiserror::Error;

/// Result type for RPC operations
pub type RpcResult<T> = Result<T, RpcError>;

/// RPC errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    /// Connection-level failure; the connection is dropped and rebuilt
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("request to {handle} timed out after {timeout:?}")]
    Timeout { handle: String, timeout: Duration },

    /// The application answered with an error
    #[error("{handle} failed remotely: {message}")]
    Remote { handle: String, message: String },

    #[error("application has no handle {0}")]
    UnknownHandle(String),

    #[error("failed to encode request: {0}")]
    Encode(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("{handle} failed after {attempts} attempts: {last}")]
    Exhausted {
        handle: String,
        attempts: u32,
        last: Box<RpcError>,
    },
}

impl RpcError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RpcError::Transport(_) => "LRC_RPC_TRANSPORT",
            RpcError::Timeout { .. } => "LRC_RPC_TIMEOUT",
            RpcError::Remote { .. } => "LRC_RPC_REMOTE",
            RpcError::UnknownHandle(_) => "LRC_RPC_UNKNOWN_HANDLE",
            RpcError::Encode(_) => "LRC_RPC_ENCODE",
            RpcError::Decode(_) => "LRC_RPC_DECODE",
            RpcError::Exhausted { .. } => "LRC_RPC_EXHAUSTED",
        }
    }

    /// Whether another attempt on a fresh connection may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, RpcError::Transport(_) | RpcError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(RpcError::Transport("reset".into()).is_retryable());
        assert!(RpcError::Timeout {
            handle: "get_group_info".into(),
            timeout: Duration::from_secs(1)
        }
        .is_retryable());
        assert!(!RpcError::Remote {
            handle: "get_group_info".into(),
            message: "no such group".into()
        }
        .is_retryable());
        assert!(!RpcError::Decode("eof".into()).is_retryable());
    }

    #[test]
    fn test_exhausted_reports_last_error() {
        let err = RpcError::Exhausted {
            handle: "get_couples_list".into(),
            attempts: 3,
            last: Box::new(RpcError::Transport("connection refused".into())),
        };
        assert_eq!(err.code(), "LRC_RPC_EXHAUSTED");
        assert!(err.to_string().contains("connection refused"));
        assert!(!err.is_retryable());
    }
}
