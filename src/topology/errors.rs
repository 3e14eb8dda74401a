//! Topology error types
//!
//! Raised while building a snapshot. A snapshot that built successfully
//! satisfies the structural invariants of groups and couples.

use thiserror::Error;

use super::types::{CoupleId, GroupId};

/// Result type for topology operations
pub type TopologyResult<T> = Result<T, TopologyError>;

/// Topology errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("group {0} is defined more than once")]
    DuplicateGroup(GroupId),

    #[error("couple has no groups")]
    EmptyCouple,

    #[error("couple {couple} lists group {group} more than once")]
    DuplicateCoupleMember { couple: CoupleId, group: GroupId },

    #[error("couple {couple} references unknown group {group}")]
    UnknownCoupleMember { couple: CoupleId, group: GroupId },

    #[error("group {group} belongs to both couple {first} and couple {second}")]
    GroupInMultipleCouples {
        group: GroupId,
        first: CoupleId,
        second: CoupleId,
    },

    #[error("failed to read topology: {0}")]
    Io(String),

    #[error("invalid topology document: {0}")]
    Parse(String),
}

impl TopologyError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            TopologyError::DuplicateGroup(_) => "LRC_TOPOLOGY_DUPLICATE_GROUP",
            TopologyError::EmptyCouple => "LRC_TOPOLOGY_EMPTY_COUPLE",
            TopologyError::DuplicateCoupleMember { .. } => "LRC_TOPOLOGY_DUPLICATE_COUPLE_MEMBER",
            TopologyError::UnknownCoupleMember { .. } => "LRC_TOPOLOGY_UNKNOWN_COUPLE_MEMBER",
            TopologyError::GroupInMultipleCouples { .. } => "LRC_TOPOLOGY_GROUP_IN_MULTIPLE_COUPLES",
            TopologyError::Io(_) => "LRC_TOPOLOGY_IO",
            TopologyError::Parse(_) => "LRC_TOPOLOGY_PARSE",
        }
    }
}

impl From<std::io::Error> for TopologyError {
    fn from(e: std::io::Error) -> Self {
        TopologyError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for TopologyError {
    fn from(e: serde_json::Error) -> Self {
        TopologyError::Parse(e.to_string())
    }
}
