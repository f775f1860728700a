//! Error types for services, handler registries, and DID operations

use crate::framework::ServiceType;
use ssi_storage::StorageError;
use thiserror::Error;

/// Construction-time failures. A constructor returning one of these yields no
/// usable object.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("{dependency} cannot be nil")]
    MissingDependency { dependency: &'static str },

    #[error("could not create {router} router with service type: {actual}")]
    TypeMismatch {
        router: &'static str,
        actual: ServiceType,
    },

    #[error("service of type {actual} does not provide {router} method handlers")]
    MissingCapability {
        router: &'static str,
        actual: ServiceType,
    },

    #[error("duplicate {kind} method registration: {method}")]
    DuplicateHandler { kind: &'static str, method: String },

    #[error("{service} service requires at least one method")]
    NoMethods { service: ServiceType },

    #[error("could not initialize storage for {method} handler")]
    HandlerInit {
        method: String,
        #[source]
        source: StorageError,
    },
}

/// No handler is registered under the requested method name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not get handler for {kind} method: {method}")]
pub struct HandlerNotFound {
    pub kind: &'static str,
    pub method: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported key type: {0}")]
pub struct UnsupportedKeyType(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported DID method: {0}")]
pub struct UnsupportedMethod(pub String);

/// Errors returned by DID method handlers and the DID router.
#[derive(Error, Debug)]
pub enum DidError {
    #[error("could not create {method}: {reason}")]
    Create { method: &'static str, reason: String },

    #[error("invalid {method} identifier {id}: {reason}")]
    InvalidIdentifier {
        method: &'static str,
        id: String,
        reason: String,
    },

    #[error("malformed DID: {0}")]
    MalformedDid(String),

    #[error(transparent)]
    HandlerNotFound(#[from] HandlerNotFound),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for DID operations
pub type Result<T> = std::result::Result<T, DidError>;
