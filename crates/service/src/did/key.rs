//! did:key method handler.
//!
//! A did:key identifier is the multibase (base58btc, `z` prefix) encoding of
//! the multicodec-tagged public key, so documents can be expanded from the
//! identifier alone. Created DIDs and their private keys are persisted in the
//! `did:key` namespace.

use crate::did::types::*;
use crate::did::MethodHandler;
use crate::errors::{DidError, Result};
use ed25519_dalek::{SigningKey, VerifyingKey, PUBLIC_KEY_LENGTH};
use rand_core::OsRng;
use ssi_storage::{RecordStore, ServiceStorage, StorageError};
use std::sync::Arc;
use tracing::debug;

pub const KEY_NAMESPACE: &str = "did:key";

/// Multicodec prefix for an Ed25519 public key (varint of 0xed).
const ED25519_MULTICODEC: [u8; 2] = [0xed, 0x01];
const BASE58_BTC_MULTIBASE: char = 'z';
const ED25519_VERIFICATION_KEY: &str = "Ed25519VerificationKey2018";

pub struct KeyHandler {
    store: RecordStore<StoredDid>,
}

impl KeyHandler {
    /// Create the handler over the shared storage handle. Fails if the
    /// `did:key` namespace cannot be read.
    pub fn new(db: Arc<dyn ServiceStorage>) -> std::result::Result<Self, StorageError> {
        let store = RecordStore::new(db, KEY_NAMESPACE);
        let empty = store.is_empty()?;
        debug!(
            namespace = KEY_NAMESPACE,
            has_records = !empty,
            "did:key handler initialized"
        );
        Ok(Self { store })
    }
}

impl MethodHandler for KeyHandler {
    fn method(&self) -> Method {
        Method::Key
    }

    fn create_did(&self, request: CreateDidRequest) -> Result<CreateDidResponse> {
        let key_type = request
            .key_type
            .parse::<KeyType>()
            .map_err(|e| DidError::Create {
                method: Method::Key.did_prefix(),
                reason: e.to_string(),
            })?;

        let signing_key = match key_type {
            KeyType::Ed25519 => SigningKey::generate(&mut OsRng),
        };
        let document = expand_ed25519(&signing_key.verifying_key());
        let private_key_base58 = bs58::encode(signing_key.to_bytes()).into_string();

        let stored = StoredDid {
            id: document.id.clone(),
            did: document.clone(),
            private_key_base58: private_key_base58.clone(),
        };
        self.store.store(&stored)?;

        Ok(CreateDidResponse {
            did: document,
            private_key_base58,
        })
    }

    fn get_did(&self, id: &str) -> Result<GetDidResponse> {
        let stored = self.store.get(id)?;
        Ok(GetDidResponse { did: stored.did })
    }

    fn get_dids(&self) -> Result<GetDidsResponse> {
        let dids = self
            .store
            .get_all()?
            .into_iter()
            .map(|stored| stored.did)
            .collect();
        Ok(GetDidsResponse { dids })
    }

    fn resolve_did(&self, id: &str) -> Result<DidDocument> {
        let public_key = decode_ed25519(id)?;
        Ok(expand_ed25519(&public_key))
    }

    fn delete_did(&self, id: &str) -> Result<()> {
        self.store.delete(id)?;
        Ok(())
    }
}

/// Encode an Ed25519 public key as a did:key identifier.
pub fn encode_ed25519(public_key: &VerifyingKey) -> String {
    let mut tagged = Vec::with_capacity(ED25519_MULTICODEC.len() + PUBLIC_KEY_LENGTH);
    tagged.extend_from_slice(&ED25519_MULTICODEC);
    tagged.extend_from_slice(public_key.as_bytes());
    format!(
        "{}:{}{}",
        Method::Key.did_prefix(),
        BASE58_BTC_MULTIBASE,
        bs58::encode(tagged).into_string()
    )
}

fn invalid(id: &str, reason: impl Into<String>) -> DidError {
    DidError::InvalidIdentifier {
        method: Method::Key.did_prefix(),
        id: id.to_string(),
        reason: reason.into(),
    }
}

/// Decode a did:key identifier back to its Ed25519 public key.
pub fn decode_ed25519(id: &str) -> Result<VerifyingKey> {
    let encoded = id
        .strip_prefix(Method::Key.did_prefix())
        .and_then(|rest| rest.strip_prefix(':'))
        .ok_or_else(|| invalid(id, "missing did:key prefix"))?;
    let encoded = encoded.split('#').next().unwrap_or_default();
    let encoded = encoded
        .strip_prefix(BASE58_BTC_MULTIBASE)
        .ok_or_else(|| invalid(id, "only base58btc multibase is supported"))?;

    let tagged = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| invalid(id, e.to_string()))?;
    let key_bytes = tagged
        .strip_prefix(&ED25519_MULTICODEC[..])
        .ok_or_else(|| invalid(id, "not an Ed25519 public key"))?;
    let key_bytes: [u8; PUBLIC_KEY_LENGTH] = key_bytes
        .try_into()
        .map_err(|_| invalid(id, format!("expected {PUBLIC_KEY_LENGTH} key bytes")))?;

    VerifyingKey::from_bytes(&key_bytes).map_err(|e| invalid(id, e.to_string()))
}

/// Build the DID document for an Ed25519 did:key.
pub fn expand_ed25519(public_key: &VerifyingKey) -> DidDocument {
    let did = encode_ed25519(public_key);
    let fingerprint = did
        .rsplit(':')
        .next()
        .unwrap_or_default()
        .to_string();
    let key_id = format!("{did}#{fingerprint}");

    DidDocument {
        context: vec![DID_CONTEXT.to_string()],
        id: did.clone(),
        verification_method: vec![VerificationMethod {
            id: key_id.clone(),
            method_type: ED25519_VERIFICATION_KEY.to_string(),
            controller: did,
            public_key_base58: bs58::encode(public_key.as_bytes()).into_string(),
        }],
        authentication: vec![key_id.clone()],
        assertion_method: vec![key_id.clone()],
        capability_invocation: vec![key_id.clone()],
        capability_delegation: vec![key_id],
    }
}
