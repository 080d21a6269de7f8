//! Error types for the discover crate.
//!
//! Follows a hierarchy that separates reference-resolution failures,
//! synchronization failures, migration failures, and opaque backend failures.
//! Reference, sync, and migration errors are local validation failures raised
//! synchronously and never retried here; backend errors carry the engine's
//! message uninterpreted and leave retry policy to the caller.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all discover operations.
#[derive(Error, Debug)]
pub enum DiscoverError {
    /// Index reference resolution errors
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// Document synchronization errors
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Index migration errors
    #[error(transparent)]
    Migration(#[from] MigrationError),

    /// Backend/transport errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors raised while resolving index references against the registry.
#[derive(Error, Debug)]
pub enum ReferenceError {
    /// The reference has no nesting separator where nesting was required.
    #[error("index '{index}' is not a nested reference")]
    NotNested { index: String },

    /// The nested reference's left-hand side does not name a known type.
    #[error("unknown record type '{type_name}'")]
    UnknownType { type_name: String },

    /// The named type is known but does not implement the Searchable capability.
    #[error("type '{type_name}' is not searchable")]
    NotSearchable { type_name: String },
}

/// Errors raised while synchronizing a document.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A nested record has no parent to merge its document into.
    #[error("record of type '{search_type}' has nested index '{index}' but no parent record")]
    MissingParent {
        search_type: String,
        index: String,
    },
}

/// Errors raised while migrating an index generation.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// Index generations are numbered from 1.
    #[error("invalid target version {version}: index versions start at 1")]
    InvalidTargetVersion { version: u32 },
}

/// Errors originating from the search store or its transport.
///
/// These are deliberately opaque: the core does not reinterpret store
/// failures, and applying retry/backoff is the caller's concern.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection to the backend could not be established.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("request to {backend_name} failed (status {status}): {body}")]
    RequestFailed {
        backend_name: String,
        status: u16,
        body: String,
    },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    Serialization { message: String },
}

/// Result type alias for discover operations.
pub type DiscoverResult<T> = Result<T, DiscoverError>;

/// Result type alias for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for DiscoverError {
    fn from(err: serde_json::Error) -> Self {
        DiscoverError::Backend(err.into())
    }
}
