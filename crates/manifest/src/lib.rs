//! Credential manifest storage.
//!
//! Manifests, the applications submitted against them, and the responses
//! issued for those applications each live in their own namespace of the
//! shared service storage.

pub mod storage;
pub mod types;

pub use storage::{
    ManifestStorage, APPLICATION_NAMESPACE, MANIFEST_NAMESPACE, RESPONSE_NAMESPACE,
};
pub use types::*;
