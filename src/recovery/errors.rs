//! Recovery job error types
//!
//! Every error here is raised before a task exists: a job either builds its
//! full task sequence or nothing at all.

use thiserror::Error;

use crate::scheme::{SchemeError, SchemeId};
use crate::topology::{CoupleId, GroupId};

/// Result type for recovery job operations
pub type RecoveryResult<T> = Result<T, RecoveryError>;

/// Why a group could not be mapped to a shard
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionFailure {
    #[error("group is not listed among the couple's groups")]
    NotInCouple,

    #[error("no shard of scheme {scheme} contains position {position}")]
    NoShard { scheme: SchemeId, position: usize },

    #[error("shard position {0} is outside the couple")]
    PositionOutOfRange(usize),
}

/// Recovery job errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoveryError {
    #[error("group {0} is not in the topology")]
    UnknownGroup(GroupId),

    #[error("group {0} does not belong to a couple")]
    Uncoupled(GroupId),

    #[error("couple {couple} of group {group} uses scheme {scheme}, expected {expected}")]
    SchemeMismatch {
        group: GroupId,
        couple: CoupleId,
        scheme: SchemeId,
        expected: SchemeId,
    },

    #[error("cannot resolve shard of group {group} in couple {couple}: {reason}")]
    Resolution {
        group: GroupId,
        couple: CoupleId,
        reason: ResolutionFailure,
    },

    #[error("group {0} has no node backend to run recovery on")]
    NoNodeBackend(GroupId),

    #[error("couple {couple} has no part size and scheme {scheme} sets no default")]
    MissingPartSize { couple: CoupleId, scheme: SchemeId },

    #[error("job id must not be empty")]
    EmptyJobId,

    #[error("tasks of job {0} were already created")]
    TasksAlreadyCreated(String),

    #[error(transparent)]
    Scheme(#[from] SchemeError),
}

impl RecoveryError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RecoveryError::UnknownGroup(_) => "LRC_RECOVERY_UNKNOWN_GROUP",
            RecoveryError::Uncoupled(_) => "LRC_RECOVERY_UNCOUPLED_GROUP",
            RecoveryError::SchemeMismatch { .. } => "LRC_RECOVERY_SCHEME_MISMATCH",
            RecoveryError::Resolution { .. } => "LRC_RECOVERY_RESOLUTION_FAILED",
            RecoveryError::NoNodeBackend(_) => "LRC_RECOVERY_NO_NODE_BACKEND",
            RecoveryError::MissingPartSize { .. } => "LRC_RECOVERY_MISSING_PART_SIZE",
            RecoveryError::EmptyJobId => "LRC_RECOVERY_EMPTY_JOB_ID",
            RecoveryError::TasksAlreadyCreated(_) => "LRC_RECOVERY_TASKS_ALREADY_CREATED",
            RecoveryError::Scheme(e) => e.code(),
        }
    }

    /// Whether the error points at inconsistent topology data
    pub fn is_topology_corruption(&self) -> bool {
        matches!(self, RecoveryError::Resolution { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_error_is_informative() {
        let err = RecoveryError::Resolution {
            group: GroupId(14),
            couple: CoupleId::from_groups(&[GroupId(13), GroupId(14)]),
            reason: ResolutionFailure::NoShard {
                scheme: SchemeId::lrc_8_2_2_v1(),
                position: 1,
            },
        };
        let message = err.to_string();
        assert!(message.contains("group 14"));
        assert!(message.contains("13:14"));
        assert!(message.contains("position 1"));
        assert!(err.is_topology_corruption());
        assert_eq!(err.code(), "LRC_RECOVERY_RESOLUTION_FAILED");
    }

    #[test]
    fn test_scheme_error_keeps_its_code() {
        let err: RecoveryError = SchemeError::UnknownScheme(SchemeId::new("x")).into();
        assert_eq!(err.code(), "LRC_SCHEME_UNKNOWN");
        assert!(!err.is_topology_corruption());
    }
}
