//! LRC shard resolution
//!
//! Maps a damaged group to every group of the shard it is repaired with.
//!
//! # Steps
//!
//! 1. Find the group's couple; its scheme must be the expected LRC scheme
//! 2. Compute the group's position inside the couple
//! 3. Find the partition entry containing that position
//! 4. Map the entry's positions back to groups, in entry order
//!
//! The partition is trusted to be disjoint and exhaustive; nothing here
//! re-checks it.

use crate::scheme::{SchemeId, SchemeRegistry};
use crate::topology::{Couple, Group, GroupId, TopologySnapshot};

use super::errors::{RecoveryError, RecoveryResult, ResolutionFailure};

/// A resolved shard
#[derive(Debug, Clone)]
pub struct ResolvedShard<'a> {
    /// Couple the shard belongs to
    pub couple: &'a Couple,
    /// Position of the requested group in the couple
    pub position: usize,
    /// Shard groups in partition order, requested group included
    pub groups: Vec<&'a Group>,
}

impl ResolvedShard<'_> {
    pub fn group_ids(&self) -> Vec<GroupId> {
        self.groups.iter().map(|g| g.id).collect()
    }
}

/// Resolves groups to their LRC shard against one topology snapshot
#[derive(Debug, Clone, Copy)]
pub struct LrcShardResolver<'a> {
    topology: &'a TopologySnapshot,
    schemes: &'a SchemeRegistry,
    expected: &'a SchemeId,
}

impl<'a> LrcShardResolver<'a> {
    pub fn new(
        topology: &'a TopologySnapshot,
        schemes: &'a SchemeRegistry,
        expected: &'a SchemeId,
    ) -> Self {
        Self {
            topology,
            schemes,
            expected,
        }
    }

    /// Resolve `group` to its shard
    pub fn resolve(&self, group: GroupId) -> RecoveryResult<ResolvedShard<'a>> {
        if self.topology.group(group).is_none() {
            return Err(RecoveryError::UnknownGroup(group));
        }
        let couple = self
            .topology
            .couple_of(group)
            .ok_or(RecoveryError::Uncoupled(group))?;

        let mismatch = || RecoveryError::SchemeMismatch {
            group,
            couple: couple.id.clone(),
            scheme: couple.scheme.clone(),
            expected: self.expected.clone(),
        };
        if couple.scheme != *self.expected {
            return Err(mismatch());
        }
        let descriptor = self.schemes.get(self.expected)?;
        if !descriptor.is_lrc() {
            return Err(mismatch());
        }
        let partition = descriptor.shard_partition()?;

        let resolution_error = |reason| RecoveryError::Resolution {
            group,
            couple: couple.id.clone(),
            reason,
        };

        let position = couple
            .position_of(group)
            .ok_or_else(|| resolution_error(ResolutionFailure::NotInCouple))?;

        let shard = partition.shard_of(position).ok_or_else(|| {
            resolution_error(ResolutionFailure::NoShard {
                scheme: descriptor.id.clone(),
                position,
            })
        })?;

        let groups = shard
            .iter()
            .map(|&index| {
                couple
                    .groups
                    .get(index)
                    .and_then(|id| self.topology.group(*id))
                    .ok_or_else(|| resolution_error(ResolutionFailure::PositionOutOfRange(index)))
            })
            .collect::<RecoveryResult<Vec<_>>>()?;

        Ok(ResolvedShard {
            couple,
            position,
            groups,
        })
    }
}
