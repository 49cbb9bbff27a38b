//! Auth error types

use thiserror::Error;

/// Errors reported by the identity collaborator or the gate
#[derive(Error, Debug)]
pub enum AuthError {
    /// The provider could not exchange credentials for a session
    #[error("Sign-in failed: {0}")]
    SignIn(String),

    /// The provider could not end the session
    #[error("Sign-out failed: {0}")]
    SignOut(String),

    /// An identity payload without a usable user id
    #[error("Malformed identity: {0}")]
    MalformedIdentity(String),

    /// Sign-in client configuration is missing or invalid
    #[error("Sign-in configuration error: {0}")]
    Config(String),

    /// Identity payload could not be decoded
    #[error("Invalid identity payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for auth operations
pub type Result<T> = std::result::Result<T, AuthError>;
