//! CLI command implementations
//!
//! Commands are read-only: they load a config and a topology snapshot,
//! compute, and return the JSON payload. Nothing is scheduled or executed.

use std::path::Path;

use serde_json::{json, Value};

use crate::config::ControllerConfig;
use crate::observability::{log_event_with_fields, Event};
use crate::recovery::{Job, RecoveryContext, RestoreLrcGroupJob, RestoreLrcGroupParams};
use crate::topology::{GroupId, TopologySnapshot};

use super::args::Command;
use super::errors::CliResult;
use super::io::write_response;

/// Run a parsed command and write its result to stdout
pub fn run_command(command: Command) -> CliResult<()> {
    let data = match command {
        Command::Resolve {
            config,
            topology,
            group,
        } => resolve(&config, &topology, group)?,
        Command::Plan {
            config,
            topology,
            group,
            job_id,
        } => plan(&config, &topology, group, job_id.as_deref())?,
        Command::Schemes { config } => schemes(&config)?,
    };
    write_response(data)
}

/// Resolve `group` to its LRC shard
pub fn resolve(config_path: &Path, topology_path: &Path, group: u64) -> CliResult<Value> {
    let config = ControllerConfig::load_or_default(config_path)?;
    let registry = config.build_registry()?;
    let topology = load_topology(topology_path)?;

    let expected = &config.recovery.expected_scheme;
    let ctx = RecoveryContext {
        topology: &topology,
        schemes: &registry,
        recovery: &config.recovery,
        infrastructure: &config.infrastructure,
    };
    let shard = ctx.resolver().resolve(GroupId(group))?;

    Ok(json!({
        "group": group,
        "couple": shard.couple.id,
        "scheme": expected,
        "position": shard.position,
        "part_size": shard.couple.part_size,
        "shard": shard.group_ids(),
    }))
}

/// Build a restore job for `group` and describe it with its tasks
pub fn plan(
    config_path: &Path,
    topology_path: &Path,
    group: u64,
    job_id: Option<&str>,
) -> CliResult<Value> {
    let config = ControllerConfig::load_or_default(config_path)?;
    let registry = config.build_registry()?;
    let topology = load_topology(topology_path)?;

    let ctx = RecoveryContext {
        topology: &topology,
        schemes: &registry,
        recovery: &config.recovery,
        infrastructure: &config.infrastructure,
    };
    let params = RestoreLrcGroupParams::new(GroupId(group));
    let mut job = match job_id {
        Some(id) => RestoreLrcGroupJob::with_id(ctx, id, params)?,
        None => RestoreLrcGroupJob::new(ctx, params)?,
    };
    job.create_tasks()?;

    Ok(serde_json::to_value(job.describe())?)
}

/// List the registered schemes
pub fn schemes(config_path: &Path) -> CliResult<Value> {
    let config = ControllerConfig::load_or_default(config_path)?;
    let registry = config.build_registry()?;
    let descriptors: Vec<_> = registry.iter().collect();
    Ok(serde_json::to_value(descriptors)?)
}

fn load_topology(path: &Path) -> CliResult<TopologySnapshot> {
    let topology = TopologySnapshot::load(path)?;
    let groups = topology.group_count().to_string();
    let couples = topology.couple_count().to_string();
    log_event_with_fields(
        Event::TopologyLoaded,
        &[
            ("path", path.display().to_string().as_str()),
            ("groups", groups.as_str()),
            ("couples", couples.as_str()),
        ],
    );
    Ok(topology)
}
