//! Controller configuration file
//!
//! Every section and field is optional; omitted values take their
//! defaults. The file is validated as a whole after parsing, and a config
//! that fails validation is never used.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::infrastructure::InfrastructureConfig;
use crate::observability::{log_event_with_fields, Event};
use crate::recovery::RecoveryConfig;
use crate::rpc::RpcConfig;
use crate::scheme::{SchemeDescriptor, SchemeRegistry};

use super::errors::{ConfigError, ConfigResult};

/// Top-level controller configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    #[serde(default)]
    pub recovery: RecoveryConfig,

    #[serde(default)]
    pub infrastructure: InfrastructureConfig,

    /// Schemes registered on top of the built-ins
    #[serde(default)]
    pub schemes: Vec<SchemeDescriptor>,

    #[serde(default)]
    pub rpc: RpcConfig,
}

impl ControllerConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_json(&content)?;

        let schemes = config.schemes.len().to_string();
        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("path", path.display().to_string().as_str()),
                ("extra_schemes", schemes.as_str()),
                ("expected_scheme", config.recovery.expected_scheme.as_str()),
            ],
        );
        Ok(config)
    }

    /// Load `path`, or the defaults if there is no file there
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a config document
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: ControllerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section
    pub fn validate(&self) -> ConfigResult<()> {
        self.infrastructure
            .validate()
            .map_err(ConfigError::invalid("infrastructure"))?;
        self.rpc.validate().map_err(ConfigError::invalid("rpc"))?;
        let registry = self.build_registry()?;
        self.recovery
            .validate(&registry)
            .map_err(ConfigError::invalid("recovery"))?;
        Ok(())
    }

    /// Built-in schemes plus the configured ones
    pub fn build_registry(&self) -> ConfigResult<SchemeRegistry> {
        let mut registry = SchemeRegistry::with_builtins();
        for descriptor in &self.schemes {
            registry.register(descriptor.clone())?;
        }
        Ok(registry)
    }
}
