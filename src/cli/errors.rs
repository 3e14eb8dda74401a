//! CLI-specific error types
//!
//! Library errors keep their own code when they reach the CLI; only
//! failures that originate here use an LRC_CLI_* code.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::recovery::RecoveryError;
use crate::scheme::SchemeError;
use crate::topology::TopologyError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// I/O error (stdout)
    IoError,
    /// Output could not be serialized
    OutputError,
    /// Error raised by a library subsystem, code carried verbatim
    Library(&'static str),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::IoError => "LRC_CLI_IO_ERROR",
            Self::OutputError => "LRC_CLI_OUTPUT_ERROR",
            Self::Library(code) => *code,
        }
    }
}

/// CLI error
#[derive(Debug, Error)]
#[error("{}: {message}", .code.code())]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn output_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::OutputError, msg)
    }

    fn library(code: &'static str, message: String) -> Self {
        Self::new(CliErrorCode::Library(code), message)
    }

    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::output_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::library(e.code(), e.to_string())
    }
}

impl From<TopologyError> for CliError {
    fn from(e: TopologyError) -> Self {
        Self::library(e.code(), e.to_string())
    }
}

impl From<SchemeError> for CliError {
    fn from(e: SchemeError) -> Self {
        Self::library(e.code(), e.to_string())
    }
}

impl From<RecoveryError> for CliError {
    fn from(e: RecoveryError) -> Self {
        Self::library(e.code(), e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
