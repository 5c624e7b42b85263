/// Error types for loading portal collections
use thiserror::Error;

/// Main error type for loader and configuration failures.
#[derive(Error, Debug)]
pub enum PortalError {
    /// HTTP request failed before a response was received
    #[cfg(feature = "api")]
    #[error("HTTP request for {collection} failed: {source}")]
    Http {
        collection: &'static str,
        source: reqwest::Error,
    },

    /// The API answered with a non-success status
    #[error("{collection} request returned status {status}")]
    Status {
        collection: &'static str,
        status: u16,
    },

    /// Response body was not valid JSON for the collection
    #[error("Failed to decode {collection}: {source}")]
    Decode {
        collection: &'static str,
        source: serde_json::Error,
    },

    /// Response body was JSON but neither an array nor a `data` envelope
    #[error("Unexpected {collection} payload: {detail}")]
    Shape {
        collection: &'static str,
        detail: String,
    },

    /// Snapshot file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Invalid loader configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Type alias for Results using PortalError
pub type Result<T> = std::result::Result<T, PortalError>;
