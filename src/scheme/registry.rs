//! Scheme registry
//!
//! Maps a scheme identifier to its immutable descriptor. Shard partitions
//! are looked up here at resolution time instead of being attached to a
//! scheme type.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{SchemeError, SchemeResult};
use super::partition::ShardPartition;

/// Identifier of the built-in LRC 8-2-2 layout
pub const LRC_8_2_2_V1: &str = "lrc-8-2-2-v1";

/// Identifier of plain replication
pub const REPLICATION: &str = "none";

/// Scheme identifier as stored on a couple
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemeId(String);

impl SchemeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The LRC 8-2-2 v1 layout
    pub fn lrc_8_2_2_v1() -> Self {
        Self::new(LRC_8_2_2_V1)
    }

    /// Plain replication, no erasure coding
    pub fn replication() -> Self {
        Self::new(REPLICATION)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SchemeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Redundancy family of a scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeKind {
    /// Locally recoverable erasure code
    Lrc,
    /// Full copies on every group
    Replication,
}

/// Everything the controller knows about one scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeDescriptor {
    pub id: SchemeId,
    pub kind: SchemeKind,

    /// Part size used when a couple does not carry its own
    #[serde(default, alias = "part_size")]
    pub default_part_size: Option<u64>,

    /// Shard partition, required for LRC schemes
    #[serde(default, rename = "shards")]
    pub partition: Option<ShardPartition>,
}

impl SchemeDescriptor {
    /// Describe an LRC scheme
    pub fn lrc(id: SchemeId, partition: ShardPartition) -> Self {
        Self {
            id,
            kind: SchemeKind::Lrc,
            default_part_size: None,
            partition: Some(partition),
        }
    }

    /// Describe a replication scheme
    pub fn replication(id: SchemeId) -> Self {
        Self {
            id,
            kind: SchemeKind::Replication,
            default_part_size: None,
            partition: None,
        }
    }

    pub fn with_default_part_size(mut self, part_size: u64) -> Self {
        self.default_part_size = Some(part_size);
        self
    }

    pub fn is_lrc(&self) -> bool {
        self.kind == SchemeKind::Lrc
    }

    /// Returns the shard partition of an LRC scheme
    pub fn shard_partition(&self) -> SchemeResult<&ShardPartition> {
        self.partition
            .as_ref()
            .ok_or_else(|| SchemeError::MissingPartition(self.id.clone()))
    }

    fn validate(&self) -> SchemeResult<()> {
        if self.is_lrc() {
            self.shard_partition()?;
        }
        Ok(())
    }
}

/// Registry of known schemes
#[derive(Debug, Clone, Default)]
pub struct SchemeRegistry {
    schemes: BTreeMap<SchemeId, SchemeDescriptor>,
}

impl SchemeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in schemes
    ///
    /// The LRC 8-2-2 layout spans 12 positions: data parts 0..8, local
    /// parities 8 and 9, global parities 10 and 11. Each local group repairs
    /// independently together with one global parity.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .schemes
            .insert(SchemeId::replication(), SchemeDescriptor::replication(SchemeId::replication()));

        let partition =
            ShardPartition::from_trusted(vec![vec![0, 1, 2, 3, 8, 10], vec![4, 5, 6, 7, 9, 11]]);
        registry.schemes.insert(
            SchemeId::lrc_8_2_2_v1(),
            SchemeDescriptor::lrc(SchemeId::lrc_8_2_2_v1(), partition),
        );
        registry
    }

    /// Register a new scheme
    pub fn register(&mut self, descriptor: SchemeDescriptor) -> SchemeResult<()> {
        descriptor.validate()?;
        if self.schemes.contains_key(&descriptor.id) {
            return Err(SchemeError::AlreadyRegistered(descriptor.id));
        }
        self.schemes.insert(descriptor.id.clone(), descriptor);
        Ok(())
    }

    /// Look up a scheme by id
    pub fn get(&self, id: &SchemeId) -> SchemeResult<&SchemeDescriptor> {
        self.schemes
            .get(id)
            .ok_or_else(|| SchemeError::UnknownScheme(id.clone()))
    }

    /// Whether `id` is registered as an LRC scheme
    pub fn is_lrc(&self, id: &SchemeId) -> bool {
        self.schemes.get(id).map(SchemeDescriptor::is_lrc).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemeDescriptor> {
        self.schemes.values()
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}
