//! Error types for vitrine-core.
//!
//! The taxonomy mirrors how a gallery page reacts to a broken index: transport
//! and status failures may succeed on a later attempt, malformed payloads will
//! not. Index *absence* is not an error at all; loaders report it as `None`.

use std::path::{Path, PathBuf};

/// Errors that can occur while loading an index or reading configuration.
///
/// All variants are `#[non_exhaustive]` so new failure classes can be added
/// without breaking callers that match on them.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Low-level transport failure (connection refused, DNS, timeout, ...).
    #[error("Network error fetching {url}: {source}")]
    Network {
        /// URL that was being fetched
        url: String,
        /// Underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The server answered with a non-success status other than 404.
    #[error("Unexpected HTTP status {status} fetching {url}")]
    Status {
        /// URL that was being fetched
        url: String,
        /// HTTP status code returned by the server
        status: u16,
    },

    /// The response body was not valid JSON.
    #[error("Failed to parse index document from {origin}: {source}")]
    Parse {
        /// URL or path the document came from
        origin: String,
        /// JSON parser error
        #[source]
        source: serde_json::Error,
    },

    /// The JSON was well-formed but not shaped like an index document.
    #[error("Invalid index document from {origin}: {message}")]
    Structure {
        /// URL or path the document came from
        origin: String,
        /// What is wrong with the document
        message: String,
    },

    /// I/O error without path context.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error on a specific file.
    #[error("I/O error at {path}: {source}")]
    IoPath {
        /// File that could not be read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

/// Convenience `Result` type alias for Vitrine operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether a later attempt at the same operation may succeed.
    ///
    /// Transport failures and unexpected statuses (e.g. a 503 while the
    /// gallery is being redeployed) are transient. A document that failed to
    /// parse or validate will fail the same way next time, and so will a
    /// local file read.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network { .. } => true,
            Error::Status { .. } => true,
            Error::Io(_) => false,
            Error::IoPath { .. } => false,
            Error::Parse { .. } => false,
            Error::Structure { .. } => false,
            Error::Config { .. } => false,
        }
    }

    /// Creates a network error wrapping a transport failure.
    pub fn network<U, E>(url: U, source: E) -> Self
    where
        U: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Network {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// Creates a status error for a non-success HTTP response.
    pub fn status<U: Into<String>>(url: U, status: u16) -> Self {
        Error::Status {
            url: url.into(),
            status,
        }
    }

    /// Creates a parse error for an unparseable document body.
    pub fn parse<O: Into<String>>(origin: O, source: serde_json::Error) -> Self {
        Error::Parse {
            origin: origin.into(),
            source,
        }
    }

    /// Creates a structural error for a document with the wrong shape.
    pub fn structure<O, M>(origin: O, message: M) -> Self
    where
        O: Into<String>,
        M: Into<String>,
    {
        Error::Structure {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Creates an I/O error carrying the offending path.
    pub fn io_with_path(source: std::io::Error, path: &Path) -> Self {
        Error::IoPath {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
