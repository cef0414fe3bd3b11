//! Error types for warrant-cli

use thiserror::Error;

/// Result type alias for warrant-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in warrant-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from warrant-core
    #[error("Core error: {0}")]
    Core(#[from] warrant_core::Error),

    /// JSON rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
