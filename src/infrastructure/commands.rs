//! Remote recovery command builders
//!
//! Pure functions: the same couple, groups and options always produce the
//! same command line. Nothing here talks to a host.
//!
//! Arguments are joined with single spaces and never quoted. Hosts, paths
//! and binary names come from the topology snapshot and the controller
//! config, both operator-controlled; neither may carry untrusted input.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scheme::SchemeId;
use crate::topology::{Couple, Group};

use super::config::InfrastructureConfig;

/// Maximum length of a trace token
pub const TRACE_ID_LEN: usize = 16;

/// Correlation token passed to remote tools
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceId(String);

impl TraceId {
    /// First `TRACE_ID_LEN` characters of a job id
    pub fn from_job_id(job_id: &str) -> Self {
        TraceId(job_id.chars().take(TRACE_ID_LEN).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Options of the dc-level recovery command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DcRecoveryOptions {
    pub json_stats: bool,
    pub trace_id: Option<TraceId>,
}

/// Options of the LRC block recovery command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LrcRecoveryOptions {
    pub json_stats: bool,
    pub trace_id: Option<TraceId>,
    pub part_size: u64,
    pub scheme: SchemeId,
}

/// dc-level recovery of `groups` inside `couple`
pub fn recover_lrc_group_cmd(
    couple: &Couple,
    groups: &[&Group],
    options: &DcRecoveryOptions,
    config: &InfrastructureConfig,
) -> String {
    let couple_tag = couple.id.as_path_component();

    let mut args = vec![config.dnet_recovery_bin.clone(), "dc".to_string()];
    push_remotes(&mut args, groups, config.remote_family);
    args.push("--groups".to_string());
    args.push(group_list(groups));
    args.push("--batch-size".to_string());
    args.push(config.batch_size.to_string());
    push_common(
        &mut args,
        config,
        format!("{}/dc-{}.log", config.log_dir, couple_tag),
        format!("{}/dnet_recovery_dc_{}", config.tmp_dir, couple_tag),
    );
    push_tracing(&mut args, options.trace_id.as_ref(), options.json_stats);

    args.join(" ")
}

/// LRC block recovery over the whole couple
pub fn lrc_recovery_cmd(
    couple: &Couple,
    groups: &[&Group],
    options: &LrcRecoveryOptions,
    config: &InfrastructureConfig,
) -> String {
    let couple_tag = couple.id.as_path_component();

    let mut args = vec![config.lrc_recovery_bin.clone()];
    push_remotes(&mut args, groups, config.remote_family);
    args.push("--groups".to_string());
    args.push(group_list(groups));
    args.push("--part-size".to_string());
    args.push(options.part_size.to_string());
    args.push("--scheme".to_string());
    args.push(options.scheme.to_string());
    push_common(
        &mut args,
        config,
        format!("{}/lrc-{}.log", config.log_dir, couple_tag),
        format!("{}/lrc_recovery_{}", config.tmp_dir, couple_tag),
    );
    push_tracing(&mut args, options.trace_id.as_ref(), options.json_stats);

    args.join(" ")
}

/// Primary backends of `groups`, deduplicated in order
fn push_remotes(args: &mut Vec<String>, groups: &[&Group], family: u8) {
    let mut remotes: Vec<String> = Vec::with_capacity(groups.len());
    for backend in groups.iter().filter_map(|g| g.primary_backend()) {
        let remote = format!("{}:{}:{}", backend.host, backend.port, family);
        if !remotes.contains(&remote) {
            remotes.push(remote);
        }
    }
    for remote in remotes {
        args.push("--remote".to_string());
        args.push(remote);
    }
}

fn group_list(groups: &[&Group]) -> String {
    groups
        .iter()
        .map(|g| g.id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn push_common(args: &mut Vec<String>, config: &InfrastructureConfig, log: String, tmp: String) {
    args.push("--attempts".to_string());
    args.push(config.attempts.to_string());
    args.push("--log".to_string());
    args.push(log);
    args.push("--log-level".to_string());
    args.push(config.log_level.clone());
    args.push("--tmp".to_string());
    args.push(tmp);
}

fn push_tracing(args: &mut Vec<String>, trace_id: Option<&TraceId>, json_stats: bool) {
    if let Some(trace_id) = trace_id {
        args.push("--trace-id".to_string());
        args.push(trace_id.to_string());
    }
    if json_stats {
        args.push("--json-stats".to_string());
    }
}
