//! Recovery jobs for LRC couples
//!
//! A restore job takes one damaged group, resolves the LRC shard it is
//! repaired with and builds the remote task sequence that repairs it.
//!
//! # Lifecycle
//!
//! 1. The scheduler constructs the job from a group id; construction fails
//!    if the group cannot be resolved to a shard
//! 2. The scheduler reads the job's footprint and involvement sets and
//!    admits it
//! 3. The engine calls `create_tasks` once and runs the tasks in order
//!
//! # Invariants
//!
//! - Resolution failures happen before any task exists
//! - Both tasks target the requested group's primary backend
//! - Both tasks carry the same trace id (first 16 characters of the job id)

mod config;
mod errors;
mod job;
mod resolver;
mod resources;
mod restore_lrc_group;
mod task;

pub use config::RecoveryConfig;
pub use errors::{RecoveryError, RecoveryResult, ResolutionFailure};
pub use job::{new_job_id, Job, JobType};
pub use resolver::{LrcShardResolver, ResolvedShard};
pub use resources::{FsResource, ResourceFootprint};
pub use restore_lrc_group::{
    Involvement, JobDescriptor, RecoveryContext, RestoreLrcGroupJob, RestoreLrcGroupParams, PARAMS,
};
pub use task::{DcRecoveryTask, LrcBlockRecoveryTask, Task, TaskParams, TaskRecord, TaskStatus};
