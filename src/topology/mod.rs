//! Storage topology
//!
//! Groups, couples and node backends as seen by the controller. The
//! topology is handed to jobs as an explicit, immutable snapshot rather
//! than read from a process-wide registry.

mod errors;
mod snapshot;
mod types;

pub use errors::{TopologyError, TopologyResult};
pub use snapshot::{TopologyBuilder, TopologySnapshot};
pub use types::{Couple, CoupleId, Group, GroupId, NodeBackend};
