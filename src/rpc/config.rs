//! RPC client settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::client::DEFAULT_APP_NAME;

/// Connection settings for the fleet application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Attempts per request when the caller passes none
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Per-attempt timeout when the caller passes none
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}
fn default_attempts() -> u32 {
    3
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            attempts: default_attempts(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RpcConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.app_name.trim().is_empty() {
            return Err("app_name must not be empty".to_string());
        }
        if self.attempts == 0 {
            return Err("attempts must be at least 1".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }
}
