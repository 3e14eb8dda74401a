//! Fleet application client
//!
//! Requests and replies are MessagePack maps with named fields.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::config::RpcConfig;
use super::errors::{RpcError, RpcResult};
use super::query::{CouplesQuery, GroupsQuery, JobsQuery, NamespacesQuery};
use super::service::ReconnectableService;
use super::transport::Transport;

/// Application name used when the configuration names none
pub const DEFAULT_APP_NAME: &str = "mastermind2.26";

/// Typed client for the fleet application
pub struct FleetClient<T: Transport> {
    service: ReconnectableService<T>,
}

impl<T: Transport> FleetClient<T> {
    pub fn new(transport: T, config: &RpcConfig) -> Self {
        Self {
            service: ReconnectableService::new(transport, config),
        }
    }

    pub fn app_name(&self) -> &str {
        self.service.app_name()
    }

    /// Perform one synchronous request
    pub fn request<P, R>(
        &self,
        handle: &str,
        payload: &P,
        attempts: Option<u32>,
        timeout: Option<Duration>,
    ) -> RpcResult<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let bytes = encode(payload)?;
        let reply = self.service.enqueue(handle, &bytes, attempts, timeout)?;
        decode(&reply)
    }

    pub fn groups(&self) -> GroupsQuery<'_, T> {
        GroupsQuery::new(self)
    }

    pub fn couples(&self) -> CouplesQuery<'_, T> {
        CouplesQuery::new(self)
    }

    pub fn namespaces(&self) -> NamespacesQuery<'_, T> {
        NamespacesQuery::new(self)
    }

    pub fn jobs(&self) -> JobsQuery<'_, T> {
        JobsQuery::new(self)
    }
}

/// Encode a value the way the application expects it
pub fn encode<P: Serialize + ?Sized>(value: &P) -> RpcResult<Vec<u8>> {
    rmp_serde::to_vec_named(value).map_err(|e| RpcError::Encode(e.to_string()))
}

/// Decode an application reply
pub fn decode<R: DeserializeOwned>(bytes: &[u8]) -> RpcResult<R> {
    rmp_serde::from_slice(bytes).map_err(|e| RpcError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::transport::LoopbackTransport;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Ping {
        seq: u32,
    }

    #[test]
    fn test_request_round_trips_through_handler() {
        let transport = LoopbackTransport::new();
        transport
            .register("ping", |bytes| {
                let ping: Ping = decode(bytes).map_err(|e| e.to_string())?;
                encode(&Ping { seq: ping.seq + 1 }).map_err(|e| e.to_string())
            })
            .unwrap();

        let client = FleetClient::new(transport, &RpcConfig::default());
        let reply: Ping = client.request("ping", &Ping { seq: 1 }, None, None).unwrap();
        assert_eq!(reply, Ping { seq: 2 });
        assert_eq!(client.app_name(), DEFAULT_APP_NAME);
    }

    #[test]
    fn test_undecodable_reply() {
        let transport = LoopbackTransport::new();
        transport.register("ping", |_| Ok(vec![0xc1])).unwrap();

        let client = FleetClient::new(transport, &RpcConfig::default());
        let err = client
            .request::<_, Ping>("ping", &Ping { seq: 1 }, None, None)
            .unwrap_err();
        assert_eq!(err.code(), "LRC_RPC_DECODE");
    }

    #[test]
    fn test_named_encoding() {
        let bytes = encode(&Ping { seq: 7 }).unwrap();
        let value: serde_json::Value = decode(&bytes).unwrap();
        assert_eq!(value["seq"], 7);
    }
}
