//! Error types for easenote_app

use easenote_auth::AuthError;
use easenote_platform::PlatformError;
use thiserror::Error;

/// Errors that can occur in the EaseNote application shell
#[derive(Error, Debug)]
pub enum AppError {
    /// Host platform error (invalid geometry, event loop failure)
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Auth gate could not be created
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Logging could not be initialized
    #[error("Logging error: {0}")]
    Logging(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Other(format!("{err:#}"))
    }
}

/// Result type for easenote_app operations
pub type Result<T> = std::result::Result<T, AppError>;
