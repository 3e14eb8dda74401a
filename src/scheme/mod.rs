//! Erasure and replication schemes
//!
//! A couple stores only its scheme identifier. The registry resolves that
//! identifier to a descriptor carrying the scheme's kind and, for LRC
//! layouts, the partition of couple positions into repairable shards.

mod errors;
mod partition;
mod registry;

pub use errors::{SchemeError, SchemeResult};
pub use partition::ShardPartition;
pub use registry::{
    SchemeDescriptor, SchemeId, SchemeKind, SchemeRegistry, LRC_8_2_2_V1, REPLICATION,
};
