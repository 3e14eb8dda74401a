//! Groups, couples and node backends

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scheme::{SchemeId, SchemeRegistry};

/// Storage group identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub u64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for GroupId {
    fn from(id: u64) -> Self {
        GroupId(id)
    }
}

/// Couple identifier: member group ids joined by `:`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoupleId(String);

impl CoupleId {
    pub fn from_groups(groups: &[GroupId]) -> Self {
        let parts: Vec<String> = groups.iter().map(|g| g.to_string()).collect();
        CoupleId(parts.join(":"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Form usable inside file names
    pub fn as_path_component(&self) -> String {
        self.0.replace(':', "-")
    }
}

impl fmt::Display for CoupleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Endpoint serving a group's data
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeBackend {
    pub host: String,
    pub port: u16,
    pub backend_id: u32,
}

impl NodeBackend {
    pub fn new(host: impl Into<String>, port: u16, backend_id: u32) -> Self {
        Self {
            host: host.into(),
            port,
            backend_id,
        }
    }
}

impl fmt::Display for NodeBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.host, self.port, self.backend_id)
    }
}

/// A storage group and the backends serving it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,

    #[serde(default)]
    pub node_backends: Vec<NodeBackend>,
}

impl Group {
    pub fn new(id: GroupId, node_backends: Vec<NodeBackend>) -> Self {
        Self { id, node_backends }
    }

    /// First backend in the group's ordered list
    pub fn primary_backend(&self) -> Option<&NodeBackend> {
        self.node_backends.first()
    }
}

/// Ordered redundancy set of groups under one scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Couple {
    pub id: CoupleId,
    pub groups: Vec<GroupId>,
    pub scheme: SchemeId,
    pub part_size: u64,
}

impl Couple {
    pub fn new(groups: Vec<GroupId>, scheme: SchemeId, part_size: u64) -> Self {
        Self {
            id: CoupleId::from_groups(&groups),
            groups,
            scheme,
            part_size,
        }
    }

    /// Couple-relative position of `group`
    pub fn position_of(&self, group: GroupId) -> Option<usize> {
        self.groups.iter().position(|g| *g == group)
    }

    /// LRC scheme implemented by this couple, if any
    pub fn lrc_scheme<'r>(&self, registry: &'r SchemeRegistry) -> Option<&'r SchemeId> {
        registry
            .get(&self.scheme)
            .ok()
            .filter(|descriptor| descriptor.is_lrc())
            .map(|descriptor| &descriptor.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_couple_id_joins_groups() {
        let id = CoupleId::from_groups(&[GroupId(10), GroupId(11), GroupId(12)]);
        assert_eq!(id.as_str(), "10:11:12");
        assert_eq!(id.as_path_component(), "10-11-12");
    }

    #[test]
    fn test_position_of() {
        let couple = Couple::new(
            vec![GroupId(5), GroupId(3), GroupId(9)],
            SchemeId::lrc_8_2_2_v1(),
            1024,
        );
        assert_eq!(couple.position_of(GroupId(9)), Some(2));
        assert_eq!(couple.position_of(GroupId(4)), None);
    }

    #[test]
    fn test_lrc_scheme_flag() {
        let registry = SchemeRegistry::with_builtins();
        let lrc = Couple::new(vec![GroupId(1)], SchemeId::lrc_8_2_2_v1(), 1);
        let plain = Couple::new(vec![GroupId(2)], SchemeId::replication(), 1);
        let unknown = Couple::new(vec![GroupId(3)], SchemeId::new("lrc-x"), 1);

        assert_eq!(lrc.lrc_scheme(&registry), Some(&SchemeId::lrc_8_2_2_v1()));
        assert_eq!(plain.lrc_scheme(&registry), None);
        assert_eq!(unknown.lrc_scheme(&registry), None);
    }

    #[test]
    fn test_primary_backend_is_first() {
        let group = Group::new(
            GroupId(1),
            vec![NodeBackend::new("a", 1025, 1), NodeBackend::new("b", 1025, 2)],
        );
        assert_eq!(group.primary_backend().unwrap().host, "a");
        assert!(Group::new(GroupId(2), vec![]).primary_backend().is_none());
    }
}
