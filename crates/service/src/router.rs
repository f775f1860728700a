//! DID router construction and method dispatch.
//!
//! Composition code hands the router any [`Service`]. Before anything
//! method-specific is wired, the service is converted into a
//! [`DidHandlerProvider`]; a missing service, a service of another type, or
//! one lacking the handler capability fails construction outright.

use crate::did::{
    CreateDidRequest, CreateDidResponse, DidDocument, DidHandlerProvider, GetDidResponse,
    GetDidsResponse, Method,
};
use crate::errors::{ConfigurationError, DidError, Result};
use crate::framework::{Service, ServiceType, Status};
use std::sync::Arc;

const ROUTER: &str = "DID";

/// Narrow a generic service into the DID handler capability set.
pub fn as_did_handler_provider(
    service: Option<Arc<dyn Service>>,
) -> std::result::Result<Arc<dyn DidHandlerProvider>, ConfigurationError> {
    let service = service.ok_or(ConfigurationError::MissingDependency {
        dependency: "DID service",
    })?;

    let service_type = service.service_type();
    if service_type != ServiceType::DID {
        return Err(ConfigurationError::TypeMismatch {
            router: ROUTER,
            actual: service_type,
        });
    }

    service
        .into_did_provider()
        .ok_or(ConfigurationError::MissingCapability {
            router: ROUTER,
            actual: service_type,
        })
}

/// Routes DID operations to the handler registered for each method.
pub struct DidRouter {
    service: Arc<dyn DidHandlerProvider>,
}

impl DidRouter {
    pub fn new(service: Option<Arc<dyn Service>>) -> std::result::Result<Self, ConfigurationError> {
        let service = as_did_handler_provider(service)?;
        Ok(Self { service })
    }

    pub fn status(&self) -> Status {
        self.service.status()
    }

    pub fn supported_methods(&self) -> Vec<Method> {
        self.service.supported_methods()
    }

    pub fn create_did(&self, method: &str, request: CreateDidRequest) -> Result<CreateDidResponse> {
        self.service.get_handler(method)?.create_did(request)
    }

    pub fn get_did(&self, method: &str, id: &str) -> Result<GetDidResponse> {
        self.service.get_handler(method)?.get_did(id)
    }

    pub fn get_dids(&self, method: &str) -> Result<GetDidsResponse> {
        self.service.get_handler(method)?.get_dids()
    }

    pub fn delete_did(&self, method: &str, id: &str) -> Result<()> {
        self.service.get_handler(method)?.delete_did(id)
    }

    /// Resolve any DID by dispatching on its method segment.
    pub fn resolve_did(&self, did: &str) -> Result<DidDocument> {
        let method = method_of(did)?;
        self.service.get_handler(method)?.resolve_did(did)
    }
}

/// Extract `<method>` from `did:<method>:<method-specific-id>`.
fn method_of(did: &str) -> Result<&str> {
    did.strip_prefix("did:")
        .and_then(|rest| rest.split_once(':'))
        .map(|(method, _)| method)
        .filter(|method| !method.is_empty())
        .ok_or_else(|| DidError::MalformedDid(did.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_segment_extraction() {
        assert_eq!(method_of("did:key:z6MkABC").unwrap(), "key");
        assert_eq!(method_of("did:web:example.com:user").unwrap(), "web");
        assert!(method_of("did:key").is_err());
        assert!(method_of("did::abc").is_err());
        assert!(method_of("key:z6MkABC").is_err());
    }
}
