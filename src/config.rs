//! Registry configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What the registry does with a notification whose kind has no predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKindPolicy {
    /// Log an error and trigger reconciliation anyway.
    #[default]
    Trigger,
    /// Abort the process.
    Panic,
}

/// Registry behaviour that can be set from a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Handling of notifications for kinds without a predicate.
    pub unknown_kind: UnknownKindPolicy,
    /// Log every verdict at debug level.
    pub log_verdicts: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            unknown_kind: UnknownKindPolicy::Trigger,
            log_verdicts: true,
        }
    }
}

impl RegistryConfig {
    /// Parses a configuration document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the document is not valid JSON,
    /// names an unknown field, or holds an unknown policy.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(input).map_err(|e| ConfigError::Invalid {
            reason: e.to_string(),
        })
    }
}
