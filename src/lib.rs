//! lrc-restore - restore planning for LRC-coded storage groups
//!
//! Given a damaged group, resolve the LRC shard it is repaired with and
//! build the two-step remote task sequence that restores it:
//! dc-level recovery of the shard, then LRC block recovery of the couple.

pub mod cli;
pub mod config;
pub mod infrastructure;
pub mod observability;
pub mod recovery;
pub mod rpc;
pub mod scheme;
pub mod topology;
