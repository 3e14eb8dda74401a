//! Shard partition of couple-relative positions
//!
//! A partition splits the positions of a couple's ordered group list into
//! disjoint index sets, one per independently repairable shard.

use std::collections::HashSet;
use std::convert::TryFrom;

use serde::{Deserialize, Serialize};

use super::errors::{SchemeError, SchemeResult};

/// Immutable partition of couple positions into shards
///
/// Validated once on construction: every shard is non-empty and no position
/// appears in two shards. Exhaustiveness is a property of the scheme and is
/// not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<usize>>", into = "Vec<Vec<usize>>")]
pub struct ShardPartition {
    shards: Vec<Vec<usize>>,
}

impl ShardPartition {
    /// Build a partition from its index sets
    pub fn new(shards: Vec<Vec<usize>>) -> SchemeResult<Self> {
        let mut seen = HashSet::new();
        for (index, shard) in shards.iter().enumerate() {
            if shard.is_empty() {
                return Err(SchemeError::EmptyShard { index });
            }
            for &position in shard {
                if !seen.insert(position) {
                    return Err(SchemeError::RepeatedPosition { position });
                }
            }
        }
        Ok(Self { shards })
    }

    /// Build a partition known to be valid at compile time
    pub(super) fn from_trusted(shards: Vec<Vec<usize>>) -> Self {
        debug_assert!(Self::new(shards.clone()).is_ok());
        Self { shards }
    }

    /// Returns the index set containing `position`, if any
    pub fn shard_of(&self, position: usize) -> Option<&[usize]> {
        self.shards
            .iter()
            .find(|shard| shard.contains(&position))
            .map(Vec::as_slice)
    }

    /// All index sets in declaration order
    pub fn shards(&self) -> &[Vec<usize>] {
        &self.shards
    }
}

impl TryFrom<Vec<Vec<usize>>> for ShardPartition {
    type Error = SchemeError;

    fn try_from(shards: Vec<Vec<usize>>) -> SchemeResult<Self> {
        Self::new(shards)
    }
}

impl From<ShardPartition> for Vec<Vec<usize>> {
    fn from(partition: ShardPartition) -> Self {
        partition.shards
    }
}
