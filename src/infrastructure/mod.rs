//! Remote command construction
//!
//! Builds the command lines executed on storage hosts by the task engine.

mod commands;
mod config;

pub use commands::{
    lrc_recovery_cmd, recover_lrc_group_cmd, DcRecoveryOptions, LrcRecoveryOptions, TraceId,
    TRACE_ID_LEN,
};
pub use config::InfrastructureConfig;
