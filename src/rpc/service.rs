//! Reconnecting request service
//!
//! Holds at most one open connection. A transport failure or timeout drops
//! it; the next attempt connects again. Any other failure is final and is
//! returned without retrying.

use std::sync::Mutex;
use std::time::Duration;

use crate::observability::{log_event_with_fields, Event};

use super::config::RpcConfig;
use super::errors::{RpcError, RpcResult};
use super::transport::{Connection, Transport};

/// Request service over a transport, reconnecting on demand
pub struct ReconnectableService<T: Transport> {
    transport: T,
    app_name: String,
    attempts: u32,
    timeout: Duration,
    connection: Mutex<Option<T::Conn>>,
}

impl<T: Transport> ReconnectableService<T> {
    pub fn new(transport: T, config: &RpcConfig) -> Self {
        Self {
            transport,
            app_name: config.app_name.clone(),
            attempts: config.attempts.max(1),
            timeout: config.timeout(),
            connection: Mutex::new(None),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Send `payload` to `handle` and return the encoded reply
    ///
    /// `attempts` and `timeout` fall back to the configured defaults.
    pub fn enqueue(
        &self,
        handle: &str,
        payload: &[u8],
        attempts: Option<u32>,
        timeout: Option<Duration>,
    ) -> RpcResult<Vec<u8>> {
        let attempts = attempts.unwrap_or(self.attempts).max(1);
        let timeout = timeout.unwrap_or(self.timeout);

        let mut connection = self
            .connection
            .lock()
            .map_err(|_| RpcError::Transport("connection slot poisoned".to_string()))?;

        let mut last = None;
        for attempt in 1..=attempts {
            let result = self.call_once(&mut connection, handle, payload, timeout);

            let err = match result {
                Ok(reply) => return Ok(reply),
                Err(err) if err.is_retryable() => err,
                Err(err) => return Err(err),
            };

            let attempt_str = attempt.to_string();
            log_event_with_fields(
                Event::RpcAttemptFailed,
                &[
                    ("app", self.app_name.as_str()),
                    ("handle", handle),
                    ("attempt", attempt_str.as_str()),
                    ("code", err.code()),
                    ("reason", err.to_string().as_str()),
                ],
            );
            if connection.take().is_some() {
                log_event_with_fields(
                    Event::RpcReconnect,
                    &[("app", self.app_name.as_str()), ("handle", handle)],
                );
            }
            last = Some(err);
        }

        Err(RpcError::Exhausted {
            handle: handle.to_string(),
            attempts,
            last: Box::new(last.unwrap_or_else(|| {
                RpcError::Transport("no attempt was made".to_string())
            })),
        })
    }

    /// One attempt, connecting first if the slot is empty
    fn call_once(
        &self,
        slot: &mut Option<T::Conn>,
        handle: &str,
        payload: &[u8],
        timeout: Duration,
    ) -> RpcResult<Vec<u8>> {
        let conn = match slot.take() {
            Some(conn) => conn,
            None => self.transport.connect(&self.app_name)?,
        };
        slot.insert(conn).call(handle, payload, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::transport::{Fault, LoopbackTransport};

    fn service(transport: &LoopbackTransport) -> ReconnectableService<LoopbackTransport> {
        transport.register("ping", |_| Ok(b"pong".to_vec())).unwrap();
        ReconnectableService::new(transport.clone(), &RpcConfig::default())
    }

    #[test]
    fn test_connects_lazily_and_reuses() {
        let transport = LoopbackTransport::new();
        let service = service(&transport);
        assert_eq!(transport.connect_count(), 0);

        service.enqueue("ping", b"", None, None).unwrap();
        service.enqueue("ping", b"", None, None).unwrap();
        assert_eq!(transport.connect_count(), 1);
    }

    #[test]
    fn test_reconnects_after_disconnect() {
        let transport = LoopbackTransport::new();
        let service = service(&transport);
        service.enqueue("ping", b"", None, None).unwrap();

        transport.inject(Fault::Disconnect).unwrap();
        assert_eq!(service.enqueue("ping", b"", None, None).unwrap(), b"pong");
        assert_eq!(transport.connect_count(), 2);
    }

    #[test]
    fn test_retries_refused_connect() {
        let transport = LoopbackTransport::new();
        let service = service(&transport);
        transport.refuse_connects(2);

        assert!(service.enqueue("ping", b"", Some(3), None).is_ok());
    }

    #[test]
    fn test_exhausted_after_attempts() {
        let transport = LoopbackTransport::new();
        let service = service(&transport);
        for _ in 0..2 {
            transport.inject(Fault::Stall).unwrap();
        }

        let err = service.enqueue("ping", b"", Some(2), None).unwrap_err();
        match err {
            RpcError::Exhausted { attempts, last, .. } => {
                assert_eq!(attempts, 2);
                assert!(matches!(*last, RpcError::Timeout { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_transport_error_not_retried() {
        let transport = LoopbackTransport::new();
        let service = service(&transport);

        let err = service.enqueue("nope", b"", Some(5), None).unwrap_err();
        assert_eq!(err, RpcError::UnknownHandle("nope".to_string()));
        assert_eq!(transport.connect_count(), 1);
    }
}
