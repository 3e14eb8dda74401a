//! Job contract consumed by the execution engine
//!
//! The engine asks a job for its footprint and involvement sets before
//! admitting it, then calls `create_tasks` once and runs the returned tasks
//! in order, stopping at the first failure.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::topology::{CoupleId, GroupId};

use super::errors::RecoveryResult;
use super::resources::ResourceFootprint;
use super::task::Task;

/// Job type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "restore_lrc_group_job")]
    RestoreLrcGroup,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::RestoreLrcGroup => "restore_lrc_group_job",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schedulable unit of work producing an ordered task list
pub trait Job {
    fn id(&self) -> &str;

    fn job_type(&self) -> JobType;

    /// Parameter keys accepted at construction
    fn params(&self) -> &'static [&'static str];

    /// Footprint used for admission
    fn resources(&self) -> &ResourceFootprint;

    /// Groups the scheduler must not hand to a concurrent job
    fn involved_groups(&self) -> Vec<GroupId>;

    /// Couples the scheduler must not hand to a concurrent job
    fn involved_couples(&self) -> Vec<CoupleId>;

    /// Build the task list. Called once per job by the engine.
    fn create_tasks(&mut self) -> RecoveryResult<&[Task]>;

    fn tasks(&self) -> &[Task];
}

/// Fresh job id: 32 lowercase hex characters
pub fn new_job_id() -> String {
    Uuid::new_v4().simple().to_string()
}
