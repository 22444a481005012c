//! Core error types for streamlens-core

use thiserror::Error;

use crate::state::CatalogState;

/// Errors that can occur in registry and host actor operations
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    /// Host not found in registry
    #[error("host not found: {0}")]
    HostNotFound(String),

    /// Host already exists in registry
    #[error("host already exists: {0}")]
    HostAlreadyExists(String),

    /// Invalid state transition attempted
    #[error("invalid state transition from {from} to {to}")]
    InvalidTransition {
        /// Current state
        from: CatalogState,
        /// Attempted target state
        to: CatalogState,
    },

    /// Actor communication error
    #[error("actor communication error: {0}")]
    ActorError(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),
}
