//! Controller configuration
//!
//! A single JSON file with `recovery`, `infrastructure`, `schemes` and
//! `rpc` sections. Immutable once loaded.

mod controller;
mod errors;

pub use controller::ControllerConfig;
pub use errors::{ConfigError, ConfigResult};
