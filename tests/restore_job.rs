//! Restore Job Tests
//!
//! Properties:
//! - A valid LRC group always yields exactly two tasks, dc recovery first,
//!   both on the requested group's primary backend
//! - Both tasks carry the first 16 characters of the job id as trace token
//! - The resource footprint is empty whatever the couple size
//! - Involvement sets stay empty unless reporting is switched on
//! - A group that cannot be resolved never becomes a job

use lrc_restore::infrastructure::{InfrastructureConfig, TRACE_ID_LEN};
use lrc_restore::recovery::{
    Job, JobType, RecoveryConfig, RecoveryContext, RecoveryError, RestoreLrcGroupJob,
    RestoreLrcGroupParams, Task, TaskStatus,
};
use lrc_restore::scheme::{SchemeDescriptor, SchemeId, SchemeRegistry, ShardPartition};
use lrc_restore::topology::{GroupId, NodeBackend, TopologySnapshot};
use proptest::prelude::*;

// =============================================================================
// Test Utilities
// =============================================================================

struct Cluster {
    topology: TopologySnapshot,
    schemes: SchemeRegistry,
    recovery: RecoveryConfig,
    infrastructure: InfrastructureConfig,
}

impl Cluster {
    /// LRC 8-2-2 couple 1..=12, plus a replicated pair 20, 21
    fn new() -> Self {
        Self::with_part_size(4096)
    }

    fn with_part_size(part_size: u64) -> Self {
        let lrc: Vec<GroupId> = (1..=12).map(GroupId).collect();
        let mut builder = TopologySnapshot::builder();
        for id in &lrc {
            builder = builder.add_group(
                *id,
                vec![
                    NodeBackend::new(format!("storage{}.dc1", id.0), 1025, 1),
                    NodeBackend::new(format!("storage{}.dc2", id.0), 1025, 2),
                ],
            );
        }
        let topology = builder
            .add_group(GroupId(20), vec![NodeBackend::new("rep1", 1025, 1)])
            .add_group(GroupId(21), vec![NodeBackend::new("rep2", 1025, 1)])
            .add_couple(lrc, SchemeId::lrc_8_2_2_v1(), part_size)
            .add_couple(vec![GroupId(20), GroupId(21)], SchemeId::replication(), 0)
            .build()
            .unwrap();

        Self {
            topology,
            schemes: SchemeRegistry::with_builtins(),
            recovery: RecoveryConfig::default(),
            infrastructure: InfrastructureConfig::default(),
        }
    }

    fn ctx(&self) -> RecoveryContext<'_> {
        RecoveryContext {
            topology: &self.topology,
            schemes: &self.schemes,
            recovery: &self.recovery,
            infrastructure: &self.infrastructure,
        }
    }

    fn job(&self, group: u64) -> Result<RestoreLrcGroupJob<'_>, RecoveryError> {
        RestoreLrcGroupJob::new(self.ctx(), RestoreLrcGroupParams::new(GroupId(group)))
    }
}

fn trace_flag(task: &Task) -> Option<String> {
    let mut parts = task.cmd().split(' ');
    while let Some(part) = parts.next() {
        if part == "--trace-id" {
            return parts.next().map(str::to_string);
        }
    }
    None
}

// =============================================================================
// Task sequence
// =============================================================================

#[test]
fn test_every_member_yields_two_ordered_tasks() {
    let cluster = Cluster::new();
    for group in 1..=12 {
        let mut job = cluster.job(group).unwrap();
        let tasks = job.create_tasks().unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].type_name(), "recover_group_dc_task");
        assert_eq!(tasks[1].type_name(), "lrc_recovery_task");

        let host = format!("storage{}.dc1", group);
        assert_eq!(tasks[0].host(), host);
        assert_eq!(tasks[1].host(), host);
        assert_eq!(tasks[0].status(), TaskStatus::Queued);
    }
}

#[test]
fn test_job_metadata() {
    let cluster = Cluster::new();
    let job = cluster.job(3).unwrap();
    assert_eq!(job.job_type(), JobType::RestoreLrcGroup);
    assert_eq!(job.params(), &["group", "resources"]);
    assert_eq!(job.id().len(), 32);
    assert!(job.tasks().is_empty());
}

#[test]
fn test_replicated_group_is_never_a_job() {
    let cluster = Cluster::new();
    let err = cluster.job(20).unwrap_err();
    assert!(matches!(err, RecoveryError::SchemeMismatch { .. }));
}

#[test]
fn test_unknown_group_is_never_a_job() {
    let cluster = Cluster::new();
    assert_eq!(
        cluster.job(999).unwrap_err(),
        RecoveryError::UnknownGroup(GroupId(999))
    );
}

#[test]
fn test_group_without_backend_fails_at_task_creation() {
    let lrc: Vec<GroupId> = (1..=12).map(GroupId).collect();
    let mut builder = TopologySnapshot::builder();
    for id in &lrc {
        let backends = if id.0 == 5 {
            vec![]
        } else {
            vec![NodeBackend::new(format!("s{}", id.0), 1025, 1)]
        };
        builder = builder.add_group(*id, backends);
    }
    let mut cluster = Cluster::new();
    cluster.topology = builder
        .add_couple(lrc, SchemeId::lrc_8_2_2_v1(), 4096)
        .build()
        .unwrap();

    let mut job = cluster.job(5).unwrap();
    assert_eq!(
        job.create_tasks().unwrap_err(),
        RecoveryError::NoNodeBackend(GroupId(5))
    );
    assert!(job.tasks().is_empty());
}

#[test]
fn test_part_size_falls_back_to_scheme_default() {
    let mut cluster = Cluster::with_part_size(0);
    let scheme = SchemeId::new("lrc-8-2-2-v1-big");
    cluster
        .schemes
        .register(
            SchemeDescriptor::lrc(
                scheme.clone(),
                ShardPartition::new(vec![vec![0, 1, 2, 3, 8, 10], vec![4, 5, 6, 7, 9, 11]])
                    .unwrap(),
            )
            .with_default_part_size(1 << 22),
        )
        .unwrap();

    let lrc: Vec<GroupId> = (1..=12).map(GroupId).collect();
    let mut builder = TopologySnapshot::builder();
    for id in &lrc {
        builder = builder.add_group(*id, vec![NodeBackend::new("h", 1025, 1)]);
    }
    cluster.topology = builder.add_couple(lrc, scheme.clone(), 0).build().unwrap();
    cluster.recovery.expected_scheme = scheme;

    let mut job = cluster.job(1).unwrap();
    let tasks = job.create_tasks().unwrap();
    assert!(tasks[1].cmd().contains("--part-size 4194304"));
    // Every group shares one host, so a single remote is passed
    assert_eq!(tasks[1].cmd().matches("--remote").count(), 1);
}

// =============================================================================
// Admission
// =============================================================================

#[test]
fn test_involvement_hidden_by_default() {
    let cluster = Cluster::new();
    let mut job = cluster.job(9).unwrap();
    job.create_tasks().unwrap();

    assert!(job.involved_groups().is_empty());
    assert!(job.involved_couples().is_empty());
    // Still computed: local parity 9 sits with data parts 4..8
    assert_eq!(
        job.involvement().groups,
        [5, 6, 7, 8, 10, 12].map(GroupId).to_vec()
    );
}

#[test]
fn test_involvement_reported_when_enabled() {
    let mut cluster = Cluster::new();
    cluster.recovery.report_involvement = true;
    let job = cluster.job(1).unwrap();

    assert_eq!(job.involved_groups(), [1, 2, 3, 4, 9, 11].map(GroupId).to_vec());
    assert_eq!(job.involved_couples().len(), 1);
    assert_eq!(
        job.involved_couples()[0].as_str(),
        "1:2:3:4:5:6:7:8:9:10:11:12"
    );
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn trace_token_is_job_id_prefix(job_id in "[0-9a-f]{16,40}", group in 1u64..=12) {
        let cluster = Cluster::new();
        let mut job = RestoreLrcGroupJob::with_id(
            cluster.ctx(),
            job_id.clone(),
            RestoreLrcGroupParams::new(GroupId(group)),
        )
        .unwrap();
        let tasks = job.create_tasks().unwrap();

        let expected = job_id[..TRACE_ID_LEN].to_string();
        prop_assert_eq!(trace_flag(&tasks[0]), Some(expected.clone()));
        prop_assert_eq!(trace_flag(&tasks[1]), Some(expected));
    }

    #[test]
    fn footprint_is_empty_for_any_couple(size in 12u64..40, group in 1u64..=12) {
        let lrc: Vec<GroupId> = (1..=size).map(GroupId).collect();
        let mut builder = TopologySnapshot::builder();
        for id in &lrc {
            builder = builder.add_group(*id, vec![NodeBackend::new(format!("n{}", id.0), 1025, 1)]);
        }
        let mut cluster = Cluster::new();
        cluster.topology = builder
            .add_couple(lrc, SchemeId::lrc_8_2_2_v1(), 4096)
            .build()
            .unwrap();

        let mut job = cluster.job(group).unwrap();
        job.create_tasks().unwrap();
        let resources = job.resources();
        prop_assert!(resources.host_in.is_empty());
        prop_assert!(resources.host_out.is_empty());
        prop_assert!(resources.fs.is_empty());
    }
}
