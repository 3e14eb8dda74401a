//! Resource footprint declared by jobs
//!
//! The scheduler admits a job only when its footprint does not intersect
//! the footprint of a running job on any axis.

use serde::{Deserialize, Serialize};

/// A filesystem on a host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FsResource {
    pub host: String,
    pub fs_id: String,
}

/// Three-axis resource footprint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFootprint {
    /// Hosts whose inbound bandwidth the job consumes
    pub host_in: Vec<String>,
    /// Hosts whose outbound bandwidth the job consumes
    pub host_out: Vec<String>,
    /// Filesystems the job writes to
    pub fs: Vec<FsResource>,
}

impl ResourceFootprint {
    /// Footprint claiming nothing on any axis
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.host_in.is_empty() && self.host_out.is_empty() && self.fs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_footprint() {
        assert!(ResourceFootprint::empty().is_empty());

        let busy = ResourceFootprint {
            fs: vec![FsResource {
                host: "h1".into(),
                fs_id: "7".into(),
            }],
            ..ResourceFootprint::default()
        };
        assert!(!busy.is_empty());
    }

    #[test]
    fn test_serialized_axes() {
        let value = serde_json::to_value(ResourceFootprint::empty()).unwrap();
        assert_eq!(value, serde_json::json!({"host_in": [], "host_out": [], "fs": []}));
    }
}
