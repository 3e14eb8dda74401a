//! Query builders over the fleet client
//!
//! Each query borrows the client and maps one family of application
//! handles to typed requests and replies.

use serde::{Deserialize, Serialize};

use crate::recovery::RestoreLrcGroupParams;
use crate::topology::{CoupleId, GroupId, NodeBackend};

use super::client::FleetClient;
use super::errors::RpcResult;
use super::transport::Transport;

pub const GET_GROUP_INFO: &str = "get_group_info";
pub const GET_COUPLES_LIST: &str = "get_couples_list";
pub const GET_NAMESPACES_LIST: &str = "get_namespaces_list";
pub const RESTORE_LRC_GROUP: &str = "restore_lrc_group";

/// Group state as the application reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub id: GroupId,
    #[serde(default)]
    pub couple: Option<CoupleId>,
    pub status: String,
    #[serde(default)]
    pub node_backends: Vec<NodeBackend>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoupleInfo {
    pub id: CoupleId,
    pub groups: Vec<GroupId>,
    pub status: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceInfo {
    pub name: String,
    #[serde(default)]
    pub deleted: bool,
}

/// Filter for couple listings; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouplesFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Job accepted by the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub status: String,
}

#[derive(Serialize)]
struct GroupRequest {
    group: GroupId,
}

pub struct GroupsQuery<'c, T: Transport> {
    client: &'c FleetClient<T>,
}

impl<'c, T: Transport> GroupsQuery<'c, T> {
    pub(super) fn new(client: &'c FleetClient<T>) -> Self {
        Self { client }
    }

    pub fn get(&self, group: GroupId) -> RpcResult<GroupInfo> {
        self.client
            .request(GET_GROUP_INFO, &GroupRequest { group }, None, None)
    }
}

pub struct CouplesQuery<'c, T: Transport> {
    client: &'c FleetClient<T>,
}

impl<'c, T: Transport> CouplesQuery<'c, T> {
    pub(super) fn new(client: &'c FleetClient<T>) -> Self {
        Self { client }
    }

    pub fn list(&self, filter: &CouplesFilter) -> RpcResult<Vec<CoupleInfo>> {
        self.client.request(GET_COUPLES_LIST, filter, None, None)
    }
}

pub struct NamespacesQuery<'c, T: Transport> {
    client: &'c FleetClient<T>,
}

impl<'c, T: Transport> NamespacesQuery<'c, T> {
    pub(super) fn new(client: &'c FleetClient<T>) -> Self {
        Self { client }
    }

    /// Live namespaces; deleted ones are skipped
    pub fn list(&self) -> RpcResult<Vec<NamespaceInfo>> {
        let namespaces: Vec<NamespaceInfo> =
            self.client.request(GET_NAMESPACES_LIST, &(), None, None)?;
        Ok(namespaces.into_iter().filter(|ns| !ns.deleted).collect())
    }
}

pub struct JobsQuery<'c, T: Transport> {
    client: &'c FleetClient<T>,
}

impl<'c, T: Transport> JobsQuery<'c, T> {
    pub(super) fn new(client: &'c FleetClient<T>) -> Self {
        Self { client }
    }

    /// Ask the application to schedule a restore job for `group`
    ///
    /// Sent once: the handle is not idempotent.
    pub fn restore_lrc_group(&self, group: GroupId) -> RpcResult<JobSummary> {
        self.client.request(
            RESTORE_LRC_GROUP,
            &RestoreLrcGroupParams::new(group),
            Some(1),
            None,
        )
    }
}
