//! Observable controller events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,
    /// Topology snapshot loaded
    TopologyLoaded,

    // Jobs
    /// Restore job constructed
    JobCreated,
    /// Job construction refused
    JobRejected,
    /// Group resolved to its LRC shard
    ShardResolved,
    /// Shard resolution failed
    ResolutionFailed,
    /// Involvement set computed
    InvolvementComputed,
    /// Task sequence built
    TasksBuilt,

    // RPC
    /// Connection dropped, reconnecting
    RpcReconnect,
    /// A single request attempt failed
    RpcAttemptFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::TopologyLoaded => "TOPOLOGY_LOADED",

            Event::JobCreated => "JOB_CREATED",
            Event::JobRejected => "JOB_REJECTED",
            Event::ShardResolved => "SHARD_RESOLVED",
            Event::ResolutionFailed => "SHARD_RESOLUTION_FAILED",
            Event::InvolvementComputed => "INVOLVEMENT_COMPUTED",
            Event::TasksBuilt => "TASKS_BUILT",

            Event::RpcReconnect => "RPC_RECONNECT",
            Event::RpcAttemptFailed => "RPC_ATTEMPT_FAILED",
        }
    }

    /// Whether the event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::JobRejected | Event::ResolutionFailed | Event::RpcAttemptFailed
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
