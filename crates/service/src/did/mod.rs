//! DID service: one handler per DID method, dispatched by method name.

pub mod key;
pub mod types;

pub use key::KeyHandler;
pub use types::*;

use crate::errors::{ConfigurationError, HandlerNotFound, Result};
use crate::framework::{Service, ServiceType, Status};
use crate::registry::HandlerRegistry;
use ssi_storage::ServiceStorage;
use std::sync::Arc;
use tracing::info;

/// Capability set implemented once per DID method.
pub trait MethodHandler: Send + Sync {
    fn method(&self) -> Method;

    fn create_did(&self, request: CreateDidRequest) -> Result<CreateDidResponse>;

    /// Fetch a DID previously created by this handler.
    fn get_did(&self, id: &str) -> Result<GetDidResponse>;

    /// Every stored DID of this method that can be decoded.
    fn get_dids(&self) -> Result<GetDidsResponse>;

    /// Produce the DID document for any identifier of this method.
    fn resolve_did(&self, id: &str) -> Result<DidDocument>;

    fn delete_did(&self, id: &str) -> Result<()>;
}

/// Capabilities a DID router needs from the service it is built on.
pub trait DidHandlerProvider: Service {
    fn get_handler(&self, method: &str) -> std::result::Result<&dyn MethodHandler, HandlerNotFound>;

    fn supported_methods(&self) -> Vec<Method>;
}

/// Service hosting the configured DID method handlers.
pub struct DidService {
    registry: HandlerRegistry<dyn MethodHandler>,
}

impl DidService {
    /// Build a handler for each method over the shared storage handle.
    ///
    /// Fails when no methods are given, a method is listed twice, or a
    /// handler cannot initialize its storage.
    pub fn new(
        methods: &[Method],
        storage: Arc<dyn ServiceStorage>,
    ) -> std::result::Result<Self, ConfigurationError> {
        if methods.is_empty() {
            return Err(ConfigurationError::NoMethods {
                service: ServiceType::DID,
            });
        }

        let mut registry = HandlerRegistry::new("DID");
        for method in methods {
            let handler = build_handler(*method, Arc::clone(&storage))?;
            registry.register(method.as_str(), handler)?;
        }

        info!(methods = ?registry.supported_methods(), "DID service ready");
        Ok(Self { registry })
    }
}

fn build_handler(
    method: Method,
    storage: Arc<dyn ServiceStorage>,
) -> std::result::Result<Box<dyn MethodHandler>, ConfigurationError> {
    let handler = match method {
        Method::Key => KeyHandler::new(storage),
    };
    handler
        .map(|h| Box::new(h) as Box<dyn MethodHandler>)
        .map_err(|source| ConfigurationError::HandlerInit {
            method: method.did_prefix().to_string(),
            source,
        })
}

impl Service for DidService {
    fn service_type(&self) -> ServiceType {
        ServiceType::DID
    }

    /// Construction fails unless every handler initialized its storage, so
    /// a built service is always ready.
    fn status(&self) -> Status {
        Status::ready()
    }

    fn into_did_provider(self: Arc<Self>) -> Option<Arc<dyn DidHandlerProvider>> {
        Some(self)
    }
}

impl DidHandlerProvider for DidService {
    fn get_handler(&self, method: &str) -> std::result::Result<&dyn MethodHandler, HandlerNotFound> {
        self.registry.resolve(method)
    }

    fn supported_methods(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = self.registry.handlers().map(|h| h.method()).collect();
        methods.sort_by_key(|m| m.as_str());
        methods
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssi_storage::{BackendError, MemoryStorage};
    use std::collections::HashMap;

    /// Backend whose every call fails.
    struct UnreachableStorage;

    impl ServiceStorage for UnreachableStorage {
        fn write(&self, namespace: &str, _: &str, _: &[u8]) -> std::result::Result<(), BackendError> {
            Err(BackendError::ReservedNamespace(namespace.to_string()))
        }

        fn read(&self, namespace: &str, _: &str) -> std::result::Result<Vec<u8>, BackendError> {
            Err(BackendError::ReservedNamespace(namespace.to_string()))
        }

        fn read_all(
            &self,
            namespace: &str,
        ) -> std::result::Result<HashMap<String, Vec<u8>>, BackendError> {
            Err(BackendError::ReservedNamespace(namespace.to_string()))
        }

        fn delete(&self, namespace: &str, _: &str) -> std::result::Result<(), BackendError> {
            Err(BackendError::ReservedNamespace(namespace.to_string()))
        }

        fn is_empty(&self, namespace: &str) -> std::result::Result<bool, BackendError> {
            Err(BackendError::ReservedNamespace(namespace.to_string()))
        }
    }

    #[test]
    fn unreachable_storage_fails_construction() {
        let err = DidService::new(&[Method::Key], Arc::new(UnreachableStorage))
            .err()
            .expect("storage is unreachable");
        assert!(matches!(err, ConfigurationError::HandlerInit { .. }));
        assert_eq!(
            err.to_string(),
            "could not initialize storage for did:key handler"
        );
    }

    #[test]
    fn empty_method_list_is_a_configuration_error() {
        let err = DidService::new(&[], Arc::new(MemoryStorage::new()))
            .err()
            .expect("no methods");
        assert!(matches!(err, ConfigurationError::NoMethods { .. }));
        assert_eq!(err.to_string(), "did service requires at least one method");
    }

    #[test]
    fn duplicate_methods_are_rejected() {
        let err = DidService::new(&[Method::Key, Method::Key], Arc::new(MemoryStorage::new()))
            .err()
            .expect("duplicate method");
        assert_eq!(err.to_string(), "duplicate DID method registration: key");
    }

    #[test]
    fn ready_with_registered_handlers() {
        let service = DidService::new(&[Method::Key], Arc::new(MemoryStorage::new())).unwrap();
        assert_eq!(service.service_type(), ServiceType::DID);
        assert!(service.status().is_ready());
        assert_eq!(service.supported_methods(), vec![Method::Key]);
        assert_eq!(service.get_handler("key").unwrap().method(), Method::Key);
    }
}
