//! Service framework and DID method dispatch for the SSI service.
//!
//! A [`Service`] advertises a declared [`ServiceType`] and a health
//! [`Status`]. The [`DidService`] owns a [`HandlerRegistry`] mapping each DID
//! method name (e.g. `key`) to a [`MethodHandler`], and the [`DidRouter`]
//! validates at construction time that the service it receives actually
//! provides those handlers.

pub mod did;
pub mod errors;
pub mod framework;
pub mod registry;
pub mod router;

pub use did::{
    CreateDidRequest, CreateDidResponse, DidDocument, DidHandlerProvider, DidService,
    GetDidResponse, GetDidsResponse, KeyHandler, KeyType, Method, MethodHandler, StoredDid,
    VerificationMethod,
};
pub use errors::*;
pub use framework::{Service, ServiceType, Status, StatusState};
pub use registry::HandlerRegistry;
pub use router::{as_did_handler_provider, DidRouter};
