//! Client for the fleet management application
//!
//! Synchronous request/reply over a message-passing transport:
//!
//! - `Transport` / `Connection` abstract the service bus
//! - `ReconnectableService` owns one connection and rebuilds it after
//!   transport failures
//! - `FleetClient` encodes requests as MessagePack and exposes typed queries

mod client;
mod config;
mod errors;
mod query;
mod service;
mod transport;

pub use client::{decode, encode, FleetClient, DEFAULT_APP_NAME};
pub use config::RpcConfig;
pub use errors::{RpcError, RpcResult};
pub use query::{
    CoupleInfo, CouplesFilter, CouplesQuery, GroupInfo, GroupsQuery, JobSummary, JobsQuery,
    NamespaceInfo, NamespacesQuery, GET_COUPLES_LIST, GET_GROUP_INFO, GET_NAMESPACES_LIST,
    RESTORE_LRC_GROUP,
};
pub use service::ReconnectableService;
pub use transport::{Connection, Fault, Handler, LoopbackConnection, LoopbackTransport, Transport};
