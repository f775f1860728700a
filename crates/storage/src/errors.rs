//! Error types for the storage layer

use thiserror::Error;

/// Failure reported by a key-value backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("database error: {0}")]
    Database(#[from] sled::Error),

    #[error("namespace is reserved by the backend: {0}")]
    ReservedNamespace(String),
}

/// Coarse classification of a [`StorageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller-supplied data violates a required invariant.
    Validation,
    /// A single requested record does not exist.
    NotFound,
    /// A record could not be serialized or deserialized.
    Encoding,
    /// The underlying store failed.
    Io,
}

/// Errors returned by typed record operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("could not store {kind} without an ID")]
    MissingId { kind: &'static str },

    #[error("{kind} not found with id: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("could not marshal {kind}: {id}")]
    Encode {
        kind: &'static str,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not unmarshal stored {kind}: {id}")]
    Decode {
        kind: &'static str,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not {operation} {kind}: {id}")]
    Io {
        operation: &'static str,
        kind: &'static str,
        id: String,
        #[source]
        source: BackendError,
    },

    #[error("could not get all {kind} records from namespace {namespace}")]
    IoAll {
        kind: &'static str,
        namespace: String,
        #[source]
        source: BackendError,
    },
}

impl StorageError {
    /// Classify this error into the storage error taxonomy.
    pub fn category(&self) -> ErrorCategory {
        match self {
            StorageError::MissingId { .. } => ErrorCategory::Validation,
            StorageError::NotFound { .. } => ErrorCategory::NotFound,
            StorageError::Encode { .. } | StorageError::Decode { .. } => ErrorCategory::Encoding,
            StorageError::Io { .. } | StorageError::IoAll { .. } => ErrorCategory::Io,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
