//! CLI module for lrc-restore
//!
//! Provides command-line access to:
//! - resolve: shard resolution for one group
//! - plan: restore job construction and task building, without execution
//! - schemes: the scheme registry

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{plan, resolve, run_command, schemes};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{error_envelope, ok_envelope, write_envelope, write_error, write_response};

use crate::observability::Logger;

/// Parse arguments, run the command and report failures on stdout
///
/// Stdout carries the envelope only; log lines go to stderr.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    Logger::route_all_to_stderr();
    match run_command(cli.command) {
        Ok(()) => Ok(()),
        Err(e) => {
            // Best effort: the error is returned either way
            let _ = write_error(e.code_str(), e.message());
            Err(e)
        }
    }
}
