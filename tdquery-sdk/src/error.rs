//! Error types for the SDK
//!
//! Wraps the core [`tdquery::Error`] and adds the failures that only exist at
//! this layer: building the HTTP client and deserializing typed results.

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum Error {
    /// Client construction failed (bad endpoint, TLS setup, invalid config)
    #[error("Connection error: {0}")]
    Connection(String),

    /// A query stage failed
    #[error(transparent)]
    Query(#[from] tdquery::Error),

    /// A record did not match the requested type
    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl Error {
    /// Kind of the underlying query error, if this is one
    pub fn query_kind(&self) -> Option<tdquery::ErrorKind> {
        match self {
            Error::Query(err) => Some(err.kind()),
            _ => None,
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, Error>;
