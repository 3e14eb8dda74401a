//! Tasks produced by recovery jobs
//!
//! A task is a finished remote command bound to a host. Jobs only build
//! tasks; the execution engine runs them and owns their status.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::topology::{GroupId, NodeBackend};

/// Execution status, updated by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Queued,
    Executing,
    Completed,
    Failed,
    Skipped,
}

/// Parameters echoed back with the task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskParams {
    pub node_backend: NodeBackend,
    pub group: String,
}

/// Fields shared by every remote command task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    id: Uuid,
    parent_job_id: String,
    group: String,
    host: String,
    cmd: String,
    json_stats: bool,
    params: TaskParams,
    #[serde(default)]
    status: TaskStatus,
}

impl TaskRecord {
    /// Task running `cmd` on the host of `node_backend`
    pub fn new(parent_job_id: &str, group: GroupId, node_backend: &NodeBackend, cmd: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent_job_id: parent_job_id.to_string(),
            group: group.to_string(),
            host: node_backend.host.clone(),
            cmd,
            json_stats: true,
            params: TaskParams {
                node_backend: node_backend.clone(),
                group: group.to_string(),
            },
            status: TaskStatus::Queued,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn parent_job_id(&self) -> &str {
        &self.parent_job_id
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    pub fn json_stats(&self) -> bool {
        self.json_stats
    }

    pub fn params(&self) -> &TaskParams {
        &self.params
    }
}

/// dc-level recovery of the shard groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcRecoveryTask {
    #[serde(flatten)]
    pub record: TaskRecord,
}

/// LRC block recovery of the whole couple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LrcBlockRecoveryTask {
    #[serde(flatten)]
    pub record: TaskRecord,
}

/// A task of a recovery job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Task {
    #[serde(rename = "recover_group_dc_task")]
    DcRecovery(DcRecoveryTask),
    #[serde(rename = "lrc_recovery_task")]
    LrcBlockRecovery(LrcBlockRecoveryTask),
}

impl Task {
    pub fn dc_recovery(record: TaskRecord) -> Self {
        Task::DcRecovery(DcRecoveryTask { record })
    }

    pub fn lrc_block_recovery(record: TaskRecord) -> Self {
        Task::LrcBlockRecovery(LrcBlockRecoveryTask { record })
    }

    /// Serialized type tag
    pub fn type_name(&self) -> &'static str {
        match self {
            Task::DcRecovery(_) => "recover_group_dc_task",
            Task::LrcBlockRecovery(_) => "lrc_recovery_task",
        }
    }

    pub fn record(&self) -> &TaskRecord {
        match self {
            Task::DcRecovery(task) => &task.record,
            Task::LrcBlockRecovery(task) => &task.record,
        }
    }

    pub fn host(&self) -> &str {
        self.record().host()
    }

    pub fn cmd(&self) -> &str {
        self.record().cmd()
    }

    pub fn status(&self) -> TaskStatus {
        self.record().status
    }

    /// Engine-side status update; the only mutation a task allows
    pub fn set_status(&mut self, status: TaskStatus) {
        match self {
            Task::DcRecovery(task) => task.record.status = status,
            Task::LrcBlockRecovery(task) => task.record.status = status,
        }
    }
}
