//! Remote command settings

use serde::{Deserialize, Serialize};

/// Settings shared by the remote recovery command builders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfrastructureConfig {
    /// dc-level recovery binary
    #[serde(default = "default_dnet_recovery_bin")]
    pub dnet_recovery_bin: String,

    /// LRC block recovery binary
    #[serde(default = "default_lrc_recovery_bin")]
    pub lrc_recovery_bin: String,

    /// Address family suffix appended to every remote, 2 is AF_INET
    #[serde(default = "default_remote_family")]
    pub remote_family: u8,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_tmp_dir")]
    pub tmp_dir: String,

    /// Per-key attempts passed to the recovery tools
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_dnet_recovery_bin() -> String {
    "dnet_recovery".to_string()
}
fn default_lrc_recovery_bin() -> String {
    "lrc_recovery".to_string()
}
fn default_remote_family() -> u8 {
    2
}
fn default_log_dir() -> String {
    "/var/log/dnet_recovery".to_string()
}
fn default_tmp_dir() -> String {
    "/var/tmp".to_string()
}
fn default_attempts() -> u32 {
    1
}
fn default_batch_size() -> u32 {
    1024
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for InfrastructureConfig {
    fn default() -> Self {
        Self {
            dnet_recovery_bin: default_dnet_recovery_bin(),
            lrc_recovery_bin: default_lrc_recovery_bin(),
            remote_family: default_remote_family(),
            log_dir: default_log_dir(),
            tmp_dir: default_tmp_dir(),
            attempts: default_attempts(),
            batch_size: default_batch_size(),
            log_level: default_log_level(),
        }
    }
}

impl InfrastructureConfig {
    /// Returns a description of the first invalid setting
    pub fn validate(&self) -> Result<(), String> {
        if self.dnet_recovery_bin.trim().is_empty() {
            return Err("dnet_recovery_bin must not be empty".to_string());
        }
        if self.lrc_recovery_bin.trim().is_empty() {
            return Err("lrc_recovery_bin must not be empty".to_string());
        }
        if self.attempts == 0 {
            return Err("attempts must be > 0".to_string());
        }
        if self.batch_size == 0 {
            return Err("batch_size must be > 0".to_string());
        }
        Ok(())
    }
}
