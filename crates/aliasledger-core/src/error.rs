//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// API call failed.
    #[error("API error: {0}")]
    Api(#[from] aliasledger_api::Error),

    /// Credential storage error.
    #[error("Credential error: {0}")]
    Credential(#[from] crate::credentials::CredentialError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The server's login response was missing an expected field.
    #[error("Login failed: {0}")]
    Login(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
