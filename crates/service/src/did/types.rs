//! Types for DID documents and DID handler requests

use crate::errors::{UnsupportedKeyType, UnsupportedMethod};
use serde::{Deserialize, Serialize};
use ssi_storage::Record;
use std::fmt;
use std::str::FromStr;

pub const DID_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

/// DID methods this service can host a handler for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Key,
}

impl Method {
    /// Method name as it appears in a DID, e.g. `key` in `did:key:...`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Key => "key",
        }
    }

    /// `did:<method>` prefix shared by every identifier of this method.
    pub fn did_prefix(&self) -> &'static str {
        match self {
            Method::Key => "did:key",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "key" => Ok(Method::Key),
            other => Err(UnsupportedMethod(other.to_string())),
        }
    }
}

/// Key types a handler can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyType {
    Ed25519,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Ed25519 => f.write_str("Ed25519"),
        }
    }
}

impl FromStr for KeyType {
    type Err = UnsupportedKeyType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ed25519") {
            Ok(KeyType::Ed25519)
        } else {
            Err(UnsupportedKeyType(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    pub id: String,
    #[serde(rename = "type")]
    pub method_type: String,
    pub controller: String,
    pub public_key_base58: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    pub id: String,
    pub verification_method: Vec<VerificationMethod>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authentication: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertion_method: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capability_invocation: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capability_delegation: Vec<String>,
}

/// DID persisted by a method handler, together with its private key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDid {
    pub id: String,
    pub did: DidDocument,
    pub private_key_base58: String,
}

impl Record for StoredDid {
    const KIND: &'static str = "DID";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Request to create a DID. The key type is parsed by the handler so that an
/// unsupported value fails the creation with a descriptive error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDidRequest {
    pub key_type: String,
}

impl CreateDidRequest {
    pub fn new(key_type: impl Into<String>) -> Self {
        Self {
            key_type: key_type.into(),
        }
    }
}

impl From<KeyType> for CreateDidRequest {
    fn from(key_type: KeyType) -> Self {
        Self::new(key_type.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDidResponse {
    pub did: DidDocument,
    pub private_key_base58: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDidResponse {
    pub did: DidDocument,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDidsResponse {
    pub dids: Vec<DidDocument>,
}
