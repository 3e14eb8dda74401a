//! JSON output for the CLI
//!
//! One JSON object per invocation on stdout, UTF-8:
//! - `{"status": "ok", "data": ...}`
//! - `{"status": "error", "code": ..., "message": ...}`

use std::io::{self, Write};

use serde_json::{json, Value};

use super::errors::CliResult;

/// Success envelope
pub fn ok_envelope(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

/// Error envelope
pub fn error_envelope(code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

/// Write one envelope as a single line
pub fn write_envelope<W: Write>(out: &mut W, envelope: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, envelope)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_envelope(&mut io::stdout(), &ok_envelope(data))
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_envelope(&mut io::stdout(), &error_envelope(code, message))
}
