//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Host reported geometry that cannot be laid out
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Failed to run the event loop
    #[error("Event loop error: {0}")]
    EventLoop(String),

    /// Platform not available
    #[error("Platform not available: {0}")]
    Unavailable(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
