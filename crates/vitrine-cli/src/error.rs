//! Error types for vitrine-cli

use thiserror::Error;

/// Result type alias for vitrine-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a command
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from vitrine-core (loading, configuration, I/O)
    #[error(transparent)]
    Core(#[from] vitrine_core::Error),

    /// JSON rendering failed
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The index could not be loaded, so nothing can be searched
    #[error("Search unavailable: no usable index at {location} (run with -v for details)")]
    Unavailable {
        /// Index URL or path
        location: String,
    },
}
