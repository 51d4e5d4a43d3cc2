//! Error types for the authorization engine

use thiserror::Error;

/// Authorization engine errors
///
/// These are caller bugs or configuration problems. Authorization outcomes
/// (including "no rule applies") are never reported through this type.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Query or revocation referenced a user that was never registered
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// Query or rule referenced a resource that was never registered
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// Assignment or rule referenced a role that was never registered
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
