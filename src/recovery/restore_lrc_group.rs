//! Restore job for one group of an LRC couple
//!
//! # Task sequence (strict order)
//!
//! 1. dc-level recovery of the group's shard
//! 2. LRC block recovery over the whole couple
//!
//! Both tasks run on the primary backend of the requested group and carry
//! the same trace id. The second task is only meaningful after the first
//! succeeded; the engine enforces that by stopping at the first failure.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::infrastructure::{
    lrc_recovery_cmd, recover_lrc_group_cmd, DcRecoveryOptions, InfrastructureConfig,
    LrcRecoveryOptions, TraceId,
};
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::scheme::SchemeRegistry;
use crate::topology::{CoupleId, Group, GroupId, TopologySnapshot};

use super::config::RecoveryConfig;
use super::errors::{RecoveryError, RecoveryResult};
use super::job::{new_job_id, Job, JobType};
use super::resolver::{LrcShardResolver, ResolvedShard};
use super::resources::ResourceFootprint;
use super::task::{Task, TaskRecord};

/// Parameter keys accepted by the restore job
pub const PARAMS: &[&str] = &["group", "resources"];

/// Construction input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoreLrcGroupParams {
    pub group: GroupId,

    /// Reserved, ignored
    #[serde(default)]
    pub resources: Option<serde_json::Value>,
}

impl RestoreLrcGroupParams {
    pub fn new(group: GroupId) -> Self {
        Self {
            group,
            resources: None,
        }
    }
}

/// Everything a job reads, borrowed for the job's lifetime
#[derive(Debug, Clone, Copy)]
pub struct RecoveryContext<'a> {
    pub topology: &'a TopologySnapshot,
    pub schemes: &'a SchemeRegistry,
    pub recovery: &'a RecoveryConfig,
    pub infrastructure: &'a InfrastructureConfig,
}

impl<'a> RecoveryContext<'a> {
    pub fn resolver(&self) -> LrcShardResolver<'a> {
        LrcShardResolver::new(self.topology, self.schemes, &self.recovery.expected_scheme)
    }
}

/// Groups and couples a job touches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Involvement {
    /// Requested group and its shard siblings, ascending
    pub groups: Vec<GroupId>,
    pub couples: Vec<CoupleId>,
}

impl Involvement {
    fn of(group: GroupId, shard: &ResolvedShard<'_>) -> Self {
        let mut groups: BTreeSet<GroupId> = shard.group_ids().into_iter().collect();
        groups.insert(group);
        Self {
            groups: groups.into_iter().collect(),
            couples: vec![shard.couple.id.clone()],
        }
    }
}

/// Serializable summary of a job
#[derive(Debug, Clone, Serialize)]
pub struct JobDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub group: GroupId,
    pub created_at: DateTime<Utc>,
    pub trace_id: TraceId,
    pub resources: ResourceFootprint,
    pub involved_groups: Vec<GroupId>,
    pub involved_couples: Vec<CoupleId>,
    pub tasks: Vec<Task>,
}

/// Restores one group of an LRC couple
#[derive(Debug)]
pub struct RestoreLrcGroupJob<'a> {
    id: String,
    group: GroupId,
    created_at: DateTime<Utc>,
    ctx: RecoveryContext<'a>,
    resources: ResourceFootprint,
    involvement: Involvement,
    tasks: Vec<Task>,
}

impl<'a> RestoreLrcGroupJob<'a> {
    /// Create a job with a fresh id
    ///
    /// Fails if the group cannot be resolved to an LRC shard; no job exists
    /// afterwards.
    pub fn new(ctx: RecoveryContext<'a>, params: RestoreLrcGroupParams) -> RecoveryResult<Self> {
        Self::with_id(ctx, new_job_id(), params)
    }

    /// Create a job with a caller-chosen id
    pub fn with_id(
        ctx: RecoveryContext<'a>,
        id: impl Into<String>,
        params: RestoreLrcGroupParams,
    ) -> RecoveryResult<Self> {
        let id = id.into();
        let group = params.group;
        let group_str = group.to_string();

        if id.is_empty() {
            return Err(RecoveryError::EmptyJobId);
        }
        let trace_id = TraceId::from_job_id(&id);
        let base = [
            ("job_id", id.as_str()),
            ("group", group_str.as_str()),
            ("trace_id", trace_id.as_str()),
        ];

        let shard = match ctx.resolver().resolve(group) {
            Ok(shard) => shard,
            Err(e) => {
                let reason = e.to_string();
                log_event_with_fields(
                    Event::JobRejected,
                    &[&base[..], &[("code", e.code()), ("reason", reason.as_str())]].concat(),
                );
                return Err(e);
            }
        };

        log_event_with_fields(
            Event::JobCreated,
            &[&base[..], &[("couple", shard.couple.id.as_str())]].concat(),
        );
        let involvement = Involvement::of(group, &shard);

        let job = Self {
            group,
            created_at: Utc::now(),
            ctx,
            resources: Self::declare_resources(),
            involvement,
            tasks: Vec::new(),
            id,
        };
        Ok(job)
    }

    /// Admission footprint of a restore job.
    ///
    /// Deliberately empty on every axis: restore jobs have never claimed
    /// host or filesystem resources, and the scheduler relies on that.
    fn declare_resources() -> ResourceFootprint {
        ResourceFootprint::empty()
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Trace token passed to both remote commands
    pub fn trace_id(&self) -> TraceId {
        TraceId::from_job_id(&self.id)
    }

    /// Involvement computed from the resolved shard.
    ///
    /// Always available, whether or not it is reported through
    /// `involved_groups` / `involved_couples`.
    pub fn involvement(&self) -> &Involvement {
        &self.involvement
    }

    pub fn describe(&self) -> JobDescriptor {
        JobDescriptor {
            id: self.id.clone(),
            job_type: self.job_type(),
            group: self.group,
            created_at: self.created_at,
            trace_id: self.trace_id(),
            resources: self.resources.clone(),
            involved_groups: self.involved_groups(),
            involved_couples: self.involved_couples(),
            tasks: self.tasks.clone(),
        }
    }

    fn build_tasks(&self, shard: &ResolvedShard<'a>) -> RecoveryResult<Vec<Task>> {
        let topology = self.ctx.topology;
        let infrastructure = self.ctx.infrastructure;

        let group = topology
            .group(self.group)
            .ok_or(RecoveryError::UnknownGroup(self.group))?;
        let node_backend = group
            .primary_backend()
            .ok_or(RecoveryError::NoNodeBackend(self.group))?;
        let trace_id = self.trace_id();
        let couple = shard.couple;

        let dc_cmd = recover_lrc_group_cmd(
            couple,
            &shard.groups,
            &DcRecoveryOptions {
                json_stats: true,
                trace_id: Some(trace_id.clone()),
            },
            infrastructure,
        );

        let couple_groups: Vec<&Group> = topology.couple_groups(couple).collect();
        let lrc_cmd = lrc_recovery_cmd(
            couple,
            &couple_groups,
            &LrcRecoveryOptions {
                json_stats: true,
                trace_id: Some(trace_id),
                part_size: self.part_size(shard)?,
                scheme: couple.scheme.clone(),
            },
            infrastructure,
        );

        Ok(vec![
            Task::dc_recovery(TaskRecord::new(&self.id, self.group, node_backend, dc_cmd)),
            Task::lrc_block_recovery(TaskRecord::new(&self.id, self.group, node_backend, lrc_cmd)),
        ])
    }

    /// Couple part size, or the scheme default for couples that carry none
    fn part_size(&self, shard: &ResolvedShard<'a>) -> RecoveryResult<u64> {
        let couple = shard.couple;
        if couple.part_size > 0 {
            return Ok(couple.part_size);
        }
        self.ctx
            .schemes
            .get(&couple.scheme)
            .ok()
            .and_then(|descriptor| descriptor.default_part_size)
            .filter(|&size| size > 0)
            .ok_or_else(|| RecoveryError::MissingPartSize {
                couple: couple.id.clone(),
                scheme: couple.scheme.clone(),
            })
    }
}

impl Job for RestoreLrcGroupJob<'_> {
    fn id(&self) -> &str {
        &self.id
    }

    fn job_type(&self) -> JobType {
        JobType::RestoreLrcGroup
    }

    fn params(&self) -> &'static [&'static str] {
        PARAMS
    }

    fn resources(&self) -> &ResourceFootprint {
        &self.resources
    }

    fn involved_groups(&self) -> Vec<GroupId> {
        if self.ctx.recovery.report_involvement {
            self.involvement.groups.clone()
        } else {
            Vec::new()
        }
    }

    fn involved_couples(&self) -> Vec<CoupleId> {
        if self.ctx.recovery.report_involvement {
            self.involvement.couples.clone()
        } else {
            Vec::new()
        }
    }

    fn create_tasks(&mut self) -> RecoveryResult<&[Task]> {
        if !self.tasks.is_empty() {
            return Err(RecoveryError::TasksAlreadyCreated(self.id.clone()));
        }

        let job_id = self.id.clone();
        let group_str = self.group.to_string();
        let trace_id = self.trace_id();
        let base = [
            ("job_id", job_id.as_str()),
            ("group", group_str.as_str()),
            ("trace_id", trace_id.as_str()),
        ];
        let scope = ObservationScope::with_fields("CREATE_TASKS", &base);

        let ctx = self.ctx;
        let shard = match ctx.resolver().resolve(self.group) {
            Ok(shard) => shard,
            Err(e) => {
                log_event_with_fields(
                    Event::ResolutionFailed,
                    &[&base[..], &[("code", e.code())]].concat(),
                );
                scope.fail(&e.to_string());
                return Err(e);
            }
        };

        let shard_list = join_ids(&shard.group_ids());
        log_event_with_fields(
            Event::ShardResolved,
            &[
                &base[..],
                &[
                    ("couple", shard.couple.id.as_str()),
                    ("shard", shard_list.as_str()),
                ],
            ]
            .concat(),
        );

        self.involvement = Involvement::of(self.group, &shard);
        let involved = join_ids(&self.involvement.groups);
        let reported = if ctx.recovery.report_involvement {
            "true"
        } else {
            "false"
        };
        log_event_with_fields(
            Event::InvolvementComputed,
            &[&base[..], &[("groups", involved.as_str()), ("reported", reported)]].concat(),
        );

        let tasks = match self.build_tasks(&shard) {
            Ok(tasks) => tasks,
            Err(e) => {
                scope.fail(&e.to_string());
                return Err(e);
            }
        };
        self.tasks = tasks;

        let count = self.tasks.len().to_string();
        log_event_with_fields(
            Event::TasksBuilt,
            &[&base[..], &[("tasks", count.as_str())]].concat(),
        );
        scope.complete_with_fields(&[("tasks", count.as_str())]);

        Ok(&self.tasks)
    }

    fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

fn join_ids(ids: &[GroupId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
