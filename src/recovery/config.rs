//! Recovery job configuration
//!
//! Immutable after startup.

use serde::{Deserialize, Serialize};

use crate::scheme::{SchemeId, SchemeRegistry};

/// Recovery job settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// LRC scheme a restorable couple must use
    #[serde(default = "SchemeId::lrc_8_2_2_v1")]
    pub expected_scheme: SchemeId,

    /// Report the computed involvement sets to the scheduler.
    ///
    /// Off by default: restore jobs have historically reported empty
    /// involvement sets. Turning this on changes scheduler admission for
    /// every restore job.
    #[serde(default)]
    pub report_involvement: bool,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            expected_scheme: SchemeId::lrc_8_2_2_v1(),
            report_involvement: false,
        }
    }
}

impl RecoveryConfig {
    /// The expected scheme must be a registered LRC scheme
    pub fn validate(&self, schemes: &SchemeRegistry) -> Result<(), String> {
        match schemes.get(&self.expected_scheme) {
            Ok(descriptor) if descriptor.is_lrc() => Ok(()),
            Ok(_) => Err(format!(
                "expected_scheme '{}' is not an LRC scheme",
                self.expected_scheme
            )),
            Err(_) => Err(format!(
                "expected_scheme '{}' is not registered",
                self.expected_scheme
            )),
        }
    }
}
