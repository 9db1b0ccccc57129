//! Error types for the relevance engine.
//!
//! Predicates never fail, so the taxonomy is narrow: configuration mistakes
//! made while assembling the registry, and invalid registry configuration.

use thiserror::Error;

use crate::resource::ResourceKind;

/// Registry configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A second predicate was bound to a kind that already has one.
    #[error("Predicate for kind {kind} registered twice")]
    DuplicateRegistration {
        /// The doubly bound kind.
        kind: ResourceKind,
    },

    /// A notification arrived for a kind without a predicate.
    #[error("No predicate registered for kind {kind}")]
    Unregistered {
        /// Kind of the notification.
        kind: ResourceKind,
    },
}

/// Errors loading a [`RegistryConfig`](crate::config::RegistryConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("Invalid registry configuration: {reason}")]
    Invalid {
        /// Parser message.
        reason: String,
    },
}

impl RegistryError {
    /// Kind the error is about.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::DuplicateRegistration { kind } | Self::Unregistered { kind } => *kind,
        }
    }

    /// Returns true if this error was raised while registering predicates.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateRegistration { .. })
    }
}

/// Result type alias for registry assembly.
pub type RegistryResult<T> = Result<T, RegistryError>;
