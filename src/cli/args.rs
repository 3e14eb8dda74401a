//! CLI argument definitions using clap
//!
//! Commands:
//! - lrc-restore resolve --topology <path> --group <id>
//! - lrc-restore plan --topology <path> --group <id> [--job-id <hex>]
//! - lrc-restore schemes
//!
//! Every command also takes `--config <path>`; a missing file means
//! built-in defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Restore planning for LRC-coded storage groups
#[derive(Parser, Debug)]
#[command(name = "lrc-restore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the LRC shard a group is repaired with
    Resolve {
        /// Path to configuration file
        #[arg(long, default_value = "./lrc-restore.json")]
        config: PathBuf,

        /// Path to a topology snapshot
        #[arg(long)]
        topology: PathBuf,

        /// Group to restore
        #[arg(long)]
        group: u64,
    },

    /// Build a restore job and print it with its tasks
    Plan {
        /// Path to configuration file
        #[arg(long, default_value = "./lrc-restore.json")]
        config: PathBuf,

        /// Path to a topology snapshot
        #[arg(long)]
        topology: PathBuf,

        /// Group to restore
        #[arg(long)]
        group: u64,

        /// Job id to use instead of a fresh one
        #[arg(long)]
        job_id: Option<String>,
    },

    /// List registered schemes
    Schemes {
        /// Path to configuration file
        #[arg(long, default_value = "./lrc-restore.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan() {
        let cli = Cli::try_parse_from([
            "lrc-restore",
            "plan",
            "--topology",
            "topo.json",
            "--group",
            "14",
            "--job-id",
            "abc",
        ])
        .unwrap();
        match cli.command {
            Command::Plan {
                group,
                job_id,
                config,
                ..
            } => {
                assert_eq!(group, 14);
                assert_eq!(job_id.as_deref(), Some("abc"));
                assert_eq!(config, PathBuf::from("./lrc-restore.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_requires_group() {
        assert!(Cli::try_parse_from(["lrc-restore", "resolve", "--topology", "t.json"]).is_err());
    }
}
