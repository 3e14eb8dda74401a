//! Immutable topology snapshot
//!
//! Jobs and resolvers borrow a snapshot for their whole lifetime, so a
//! topology sync never changes what an in-flight job sees.
//!
//! # Structural invariants (checked by `TopologyBuilder::build`)
//!
//! - Group ids are unique
//! - Every couple lists at least one group, each at most once
//! - Every couple member is a known group
//! - A group belongs to at most one couple

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::scheme::SchemeId;

use super::errors::{TopologyError, TopologyResult};
use super::types::{Couple, CoupleId, Group, GroupId, NodeBackend};

/// Read-only indexed view of groups and couples
#[derive(Debug, Clone, Default)]
pub struct TopologySnapshot {
    groups: BTreeMap<GroupId, Group>,
    couples: BTreeMap<CoupleId, Couple>,
    membership: HashMap<GroupId, CoupleId>,
}

impl TopologySnapshot {
    /// Start building a snapshot
    pub fn builder() -> TopologyBuilder {
        TopologyBuilder::default()
    }

    /// Parse a snapshot from its JSON document form
    pub fn from_json(json: &str) -> TopologyResult<Self> {
        let document: TopologyDocument = serde_json::from_str(json)?;
        document.into_builder().build()
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> TopologyResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn couple(&self, id: &CoupleId) -> Option<&Couple> {
        self.couples.get(id)
    }

    /// Couple the group currently belongs to
    pub fn couple_of(&self, group: GroupId) -> Option<&Couple> {
        self.membership
            .get(&group)
            .and_then(|couple_id| self.couples.get(couple_id))
    }

    /// Resolve a couple's ordered member list to groups
    pub fn couple_groups<'s>(&'s self, couple: &'s Couple) -> impl Iterator<Item = &'s Group> + 's {
        couple.groups.iter().filter_map(move |id| self.groups.get(id))
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn couples(&self) -> impl Iterator<Item = &Couple> {
        self.couples.values()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn couple_count(&self) -> usize {
        self.couples.len()
    }
}

/// Incremental snapshot construction
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    groups: Vec<Group>,
    couples: Vec<Couple>,
}

impl TopologyBuilder {
    pub fn add_group(mut self, id: GroupId, node_backends: Vec<NodeBackend>) -> Self {
        self.groups.push(Group::new(id, node_backends));
        self
    }

    pub fn add_couple(mut self, groups: Vec<GroupId>, scheme: SchemeId, part_size: u64) -> Self {
        self.couples.push(Couple::new(groups, scheme, part_size));
        self
    }

    /// Validate and index
    pub fn build(self) -> TopologyResult<TopologySnapshot> {
        let mut groups = BTreeMap::new();
        for group in self.groups {
            if groups.contains_key(&group.id) {
                return Err(TopologyError::DuplicateGroup(group.id));
            }
            groups.insert(group.id, group);
        }

        let mut couples = BTreeMap::new();
        let mut membership: HashMap<GroupId, CoupleId> = HashMap::new();
        for couple in self.couples {
            if couple.groups.is_empty() {
                return Err(TopologyError::EmptyCouple);
            }
            for (position, group) in couple.groups.iter().enumerate() {
                if couple.groups[..position].contains(group) {
                    return Err(TopologyError::DuplicateCoupleMember {
                        couple: couple.id.clone(),
                        group: *group,
                    });
                }
                if !groups.contains_key(group) {
                    return Err(TopologyError::UnknownCoupleMember {
                        couple: couple.id.clone(),
                        group: *group,
                    });
                }
                if let Some(first) = membership.get(group) {
                    return Err(TopologyError::GroupInMultipleCouples {
                        group: *group,
                        first: first.clone(),
                        second: couple.id.clone(),
                    });
                }
                membership.insert(*group, couple.id.clone());
            }
            couples.insert(couple.id.clone(), couple);
        }

        Ok(TopologySnapshot {
            groups,
            couples,
            membership,
        })
    }
}

/// On-disk form of a snapshot
#[derive(Debug, Deserialize)]
struct TopologyDocument {
    #[serde(default)]
    groups: Vec<Group>,
    #[serde(default)]
    couples: Vec<CoupleRecord>,
}

#[derive(Debug, Deserialize)]
struct CoupleRecord {
    groups: Vec<GroupId>,
    scheme: SchemeId,
    #[serde(default)]
    part_size: u64,
}

impl TopologyDocument {
    fn into_builder(self) -> TopologyBuilder {
        let couples = self
            .couples
            .into_iter()
            .map(|record| Couple::new(record.groups, record.scheme, record.part_size))
            .collect();
        TopologyBuilder {
            groups: self.groups,
            couples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(host: &str) -> Vec<NodeBackend> {
        vec![NodeBackend::new(host, 1025, 1)]
    }

    #[test]
    fn test_build_indexes_membership() {
        let snapshot = TopologySnapshot::builder()
            .add_group(GroupId(1), backend("h1"))
            .add_group(GroupId(2), backend("h2"))
            .add_group(GroupId(3), backend("h3"))
            .add_couple(vec![GroupId(1), GroupId(2)], SchemeId::replication(), 0)
            .build()
            .unwrap();

        assert_eq!(snapshot.group_count(), 3);
        assert_eq!(snapshot.couple_count(), 1);
        assert_eq!(snapshot.couple_of(GroupId(2)).unwrap().id.as_str(), "1:2");
        assert!(snapshot.couple_of(GroupId(3)).is_none());
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let err = TopologySnapshot::builder()
            .add_group(GroupId(1), vec![])
            .add_group(GroupId(1), vec![])
            .build()
            .unwrap_err();
        assert_eq!(err, TopologyError::DuplicateGroup(GroupId(1)));
    }

    #[test]
    fn test_unknown_member_rejected() {
        let err = TopologySnapshot::builder()
            .add_group(GroupId(1), vec![])
            .add_couple(vec![GroupId(1), GroupId(7)], SchemeId::replication(), 0)
            .build()
            .unwrap_err();
        assert!(matches!(err, TopologyError::UnknownCoupleMember { group: GroupId(7), .. }));
    }

    #[test]
    fn test_group_in_two_couples_rejected() {
        let err = TopologySnapshot::builder()
            .add_group(GroupId(1), vec![])
            .add_group(GroupId(2), vec![])
            .add_couple(vec![GroupId(1)], SchemeId::replication(), 0)
            .add_couple(vec![GroupId(2), GroupId(1)], SchemeId::replication(), 0)
            .build()
            .unwrap_err();
        assert!(matches!(err, TopologyError::GroupInMultipleCouples { group: GroupId(1), .. }));
    }

    #[test]
    fn test_repeated_member_rejected() {
        let err = TopologySnapshot::builder()
            .add_group(GroupId(1), vec![])
            .add_couple(vec![GroupId(1), GroupId(1)], SchemeId::replication(), 0)
            .build()
            .unwrap_err();
        assert!(matches!(err, TopologyError::DuplicateCoupleMember { .. }));
    }

    #[test]
    fn test_empty_couple_rejected() {
        let err = TopologySnapshot::builder()
            .add_couple(vec![], SchemeId::replication(), 0)
            .build()
            .unwrap_err();
        assert_eq!(err, TopologyError::EmptyCouple);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "groups": [
                {"id": 10, "node_backends": [{"host": "s1", "port": 1025, "backend_id": 3}]},
                {"id": 11}
            ],
            "couples": [{"groups": [10, 11], "scheme": "lrc-8-2-2-v1", "part_size": 4096}]
        }"#;
        let snapshot = TopologySnapshot::from_json(json).unwrap();
        let couple = snapshot.couple_of(GroupId(11)).unwrap();
        assert_eq!(couple.part_size, 4096);
        assert_eq!(couple.scheme, SchemeId::lrc_8_2_2_v1());
        let hosts: Vec<_> = snapshot.couple_groups(couple).map(|g| g.id).collect();
        assert_eq!(hosts, vec![GroupId(10), GroupId(11)]);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = TopologySnapshot::from_json("{not json").unwrap_err();
        assert_eq!(err.code(), "LRC_TOPOLOGY_PARSE");
    }
}
