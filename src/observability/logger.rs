//! Structured JSON logger
//!
//! - One log line = one event
//! - Keys in sorted order
//! - Explicit severity levels
//! - Synchronous, no buffering
//! - ERROR and FATAL on stderr; the rest on stdout unless routed to stderr

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{Map, Value};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Errors and fatal events go to stderr
    fn uses_stderr(&self) -> bool {
        *self >= Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set once a process reserves stdout for its own output
static STDERR_ONLY: AtomicBool = AtomicBool::new(false);

/// Structured logger writing one JSON object per line
pub struct Logger;

impl Logger {
    /// Send every severity to stderr from now on
    pub fn route_all_to_stderr() {
        STDERR_ONLY.store(true, Ordering::SeqCst);
    }

    pub fn routes_all_to_stderr() -> bool {
        STDERR_ONLY.load(Ordering::SeqCst)
    }

    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if Self::captured(severity, event, fields) {
            return;
        }

        if severity.uses_stderr() || Self::routes_all_to_stderr() {
            Self::log_to_writer(severity, event, fields, &mut io::stderr());
        } else {
            Self::log_to_writer(severity, event, fields, &mut io::stdout());
        }
    }

    #[cfg(test)]
    fn captured(severity: Severity, event: &str, fields: &[(&str, &str)]) -> bool {
        capture::record(severity, event, fields)
    }

    #[cfg(not(test))]
    fn captured(_: Severity, _: &str, _: &[(&str, &str)]) -> bool {
        false
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let mut line = render(severity, event, fields);
        line.push('\n');

        // Logging never fails the caller
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }
}

/// Render one log line without the trailing newline
///
/// `event` and `severity` are reserved keys; a field using either name is
/// dropped.
fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    // serde_json's default Map is ordered by key
    let mut object = Map::new();
    for (key, value) in fields {
        object.insert((*key).to_string(), Value::String((*value).to_string()));
    }
    object.insert("event".to_string(), Value::String(event.to_string()));
    object.insert(
        "severity".to_string(),
        Value::String(severity.as_str().to_string()),
    );
    Value::Object(object).to_string()
}

/// Capture logs to a buffer for testing
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::log_to_writer(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}
