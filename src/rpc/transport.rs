//! Message transport seam
//!
//! The fleet application is reached through a message-passing service:
//! connect by application name, then call named handles with opaque
//! payloads. Network transports live outside this crate; the loopback
//! transport dispatches to in-process handlers.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use super::errors::{RpcError, RpcResult};

/// An open session with one application
pub trait Connection: Send {
    /// Call `handle` with an encoded payload and wait for the encoded reply
    fn call(&mut self, handle: &str, payload: &[u8], timeout: Duration) -> RpcResult<Vec<u8>>;
}

/// Opens connections to applications by name
pub trait Transport: Send + Sync {
    type Conn: Connection;

    fn connect(&self, app_name: &str) -> RpcResult<Self::Conn>;
}

/// In-process handler: encoded request in, encoded reply or error message out
pub type Handler = Arc<dyn Fn(&[u8]) -> Result<Vec<u8>, String> + Send + Sync>;

/// Fault injected into the next loopback call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The connection drops mid-call
    Disconnect,
    /// The call never answers
    Stall,
}

#[derive(Default)]
struct LoopbackState {
    handlers: RwLock<HashMap<String, Handler>>,
    faults: Mutex<VecDeque<Fault>>,
    refused_connects: AtomicUsize,
    connects: AtomicUsize,
}

/// Transport that dispatches to registered closures
#[derive(Clone, Default)]
pub struct LoopbackTransport {
    state: Arc<LoopbackState>,
}

impl fmt::Debug for LoopbackTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopbackTransport")
            .field("connects", &self.connect_count())
            .finish()
    }
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for `handle`, replacing any previous one
    pub fn register<F>(&self, handle: &str, handler: F) -> RpcResult<()>
    where
        F: Fn(&[u8]) -> Result<Vec<u8>, String> + Send + Sync + 'static,
    {
        let mut handlers = self
            .state
            .handlers
            .write()
            .map_err(|_| poisoned())?;
        handlers.insert(handle.to_string(), Arc::new(handler));
        Ok(())
    }

    /// Queue a fault for an upcoming call; faults fire in order
    pub fn inject(&self, fault: Fault) -> RpcResult<()> {
        self.state
            .faults
            .lock()
            .map_err(|_| poisoned())?
            .push_back(fault);
        Ok(())
    }

    /// Refuse the next `count` connection attempts
    pub fn refuse_connects(&self, count: usize) {
        self.state.refused_connects.store(count, Ordering::SeqCst);
    }

    /// Connections opened so far
    pub fn connect_count(&self) -> usize {
        self.state.connects.load(Ordering::SeqCst)
    }
}

impl Transport for LoopbackTransport {
    type Conn = LoopbackConnection;

    fn connect(&self, app_name: &str) -> RpcResult<LoopbackConnection> {
        let refused = self
            .state
            .refused_connects
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if refused {
            return Err(RpcError::Transport(format!(
                "connection to {} refused",
                app_name
            )));
        }
        self.state.connects.fetch_add(1, Ordering::SeqCst);
        Ok(LoopbackConnection {
            state: Arc::clone(&self.state),
        })
    }
}

/// Connection handed out by `LoopbackTransport`
pub struct LoopbackConnection {
    state: Arc<LoopbackState>,
}

impl Connection for LoopbackConnection {
    fn call(&mut self, handle: &str, payload: &[u8], timeout: Duration) -> RpcResult<Vec<u8>> {
        let fault = self
            .state
            .faults
            .lock()
            .map_err(|_| poisoned())?
            .pop_front();
        match fault {
            Some(Fault::Disconnect) => {
                return Err(RpcError::Transport("connection reset by peer".to_string()))
            }
            Some(Fault::Stall) => {
                return Err(RpcError::Timeout {
                    handle: handle.to_string(),
                    timeout,
                })
            }
            None => {}
        }

        let handler = self
            .state
            .handlers
            .read()
            .map_err(|_| poisoned())?
            .get(handle)
            .cloned()
            .ok_or_else(|| RpcError::UnknownHandle(handle.to_string()))?;

        (*handler)(payload).map_err(|message| RpcError::Remote {
            handle: handle.to_string(),
            message,
        })
    }
}

fn poisoned() -> RpcError {
    RpcError::Transport("loopback state poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(1);

    #[test]
    fn test_dispatches_to_handler() {
        let transport = LoopbackTransport::new();
        transport
            .register("echo", |payload| Ok(payload.to_vec()))
            .unwrap();

        let mut conn = transport.connect("app").unwrap();
        assert_eq!(conn.call("echo", b"abc", TIMEOUT).unwrap(), b"abc");
        assert_eq!(transport.connect_count(), 1);
    }

    #[test]
    fn test_unknown_handle() {
        let transport = LoopbackTransport::new();
        let mut conn = transport.connect("app").unwrap();
        assert_eq!(
            conn.call("missing", b"", TIMEOUT).unwrap_err(),
            RpcError::UnknownHandle("missing".to_string())
        );
    }

    #[test]
    fn test_faults_fire_in_order() {
        let transport = LoopbackTransport::new();
        transport.register("ping", |_| Ok(vec![1])).unwrap();
        transport.inject(Fault::Stall).unwrap();
        transport.inject(Fault::Disconnect).unwrap();

        let mut conn = transport.connect("app").unwrap();
        assert!(matches!(
            conn.call("ping", b"", TIMEOUT),
            Err(RpcError::Timeout { .. })
        ));
        assert!(matches!(
            conn.call("ping", b"", TIMEOUT),
            Err(RpcError::Transport(_))
        ));
        assert_eq!(conn.call("ping", b"", TIMEOUT).unwrap(), vec![1]);
    }

    #[test]
    fn test_refused_connects() {
        let transport = LoopbackTransport::new();
        transport.refuse_connects(1);
        assert!(transport.connect("app").is_err());
        assert!(transport.connect("app").is_ok());
        assert_eq!(transport.connect_count(), 1);
    }

    #[test]
    fn test_handler_error_is_remote() {
        let transport = LoopbackTransport::new();
        transport
            .register("fail", |_| Err("group 7 not found".to_string()))
            .unwrap();
        let mut conn = transport.connect("app").unwrap();
        let err = conn.call("fail", b"", TIMEOUT).unwrap_err();
        assert_eq!(err.code(), "LRC_RPC_REMOTE");
    }
}
