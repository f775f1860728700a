//! Service types, health status, and the base service contract.

use crate::did::DidHandlerProvider;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Declared kind of a service, used by composition code to check it was
/// handed the service it expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceType(Cow<'static, str>);

impl ServiceType {
    pub const DID: ServiceType = ServiceType(Cow::Borrowed("did"));
    pub const SCHEMA: ServiceType = ServiceType(Cow::Borrowed("schema"));
    pub const CREDENTIAL: ServiceType = ServiceType(Cow::Borrowed("credential"));
    pub const KEY_STORE: ServiceType = ServiceType(Cow::Borrowed("keystore"));
    pub const MANIFEST: ServiceType = ServiceType(Cow::Borrowed("manifest"));

    /// Create a service type outside the built-in set.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusState {
    Ready,
    NotReady,
}

/// Health report returned by [`Service::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub status: StatusState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Status {
    pub fn ready() -> Self {
        Self {
            status: StatusState::Ready,
            message: None,
        }
    }

    pub fn not_ready(message: impl Into<String>) -> Self {
        Self {
            status: StatusState::NotReady,
            message: Some(message.into()),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == StatusState::Ready
    }
}

/// Base contract every service exposes to composition code.
pub trait Service: Send + Sync {
    fn service_type(&self) -> ServiceType;

    fn status(&self) -> Status;

    /// Explicit capability hook: services that provide DID method handlers
    /// return themselves as a [`DidHandlerProvider`]. Everything else keeps
    /// the default and is rejected by DID router construction.
    fn into_did_provider(self: Arc<Self>) -> Option<Arc<dyn DidHandlerProvider>> {
        None
    }
}
