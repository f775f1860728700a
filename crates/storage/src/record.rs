//! Typed record storage over a shared [`ServiceStorage`].
//!
//! Records are stored as JSON envelopes keyed by their ID. Single-record
//! reads surface every failure; bulk reads skip entries that fail to decode so
//! that one corrupt or legacy record never makes a whole listing unavailable.

use crate::errors::{Result, StorageError};
use crate::kv::ServiceStorage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// A domain entity persisted by a [`RecordStore`].
pub trait Record: Serialize + DeserializeOwned {
    /// Human-readable record kind, used in errors and logs.
    const KIND: &'static str;

    /// Storage key of this record. Must be non-empty to be stored.
    fn id(&self) -> &str;
}

/// Entry that could not be decoded during a bulk read.
#[derive(Debug)]
pub struct SkippedEntry {
    pub key: String,
    pub cause: serde_json::Error,
}

/// Outcome of reading every entry in a namespace.
#[derive(Debug)]
pub struct BulkRead<T> {
    pub decoded: Vec<T>,
    pub skipped: Vec<SkippedEntry>,
}

impl<T> Default for BulkRead<T> {
    fn default() -> Self {
        Self {
            decoded: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Store for one record kind, scoped to a single namespace.
pub struct RecordStore<T> {
    db: Arc<dyn ServiceStorage>,
    namespace: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for RecordStore<T> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            namespace: self.namespace.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> RecordStore<T> {
    pub fn new(db: Arc<dyn ServiceStorage>, namespace: impl Into<String>) -> Self {
        Self {
            db,
            namespace: namespace.into(),
            _record: PhantomData,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Persist `record` under its ID, overwriting any previous value.
    ///
    /// There is no existence check or version token: concurrent stores of
    /// the same ID race and the last write wins.
    pub fn store(&self, record: &T) -> Result<()> {
        let id = record.id();
        if id.is_empty() {
            return Err(StorageError::MissingId { kind: T::KIND });
        }
        let bytes = serde_json::to_vec(record).map_err(|source| StorageError::Encode {
            kind: T::KIND,
            id: id.to_string(),
            source,
        })?;
        self.db
            .write(&self.namespace, id, &bytes)
            .map_err(|source| StorageError::Io {
                operation: "store",
                kind: T::KIND,
                id: id.to_string(),
                source,
            })
    }

    pub fn get(&self, id: &str) -> Result<T> {
        let bytes = self
            .db
            .read(&self.namespace, id)
            .map_err(|source| StorageError::Io {
                operation: "get",
                kind: T::KIND,
                id: id.to_string(),
                source,
            })?;
        if bytes.is_empty() {
            return Err(StorageError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            });
        }
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Decode {
            kind: T::KIND,
            id: id.to_string(),
            source,
        })
    }

    /// Read and decode every entry in the namespace, collecting the entries
    /// that fail to decode instead of failing the call.
    pub fn read_all(&self) -> Result<BulkRead<T>> {
        let entries = self
            .db
            .read_all(&self.namespace)
            .map_err(|source| StorageError::IoAll {
                kind: T::KIND,
                namespace: self.namespace.clone(),
                source,
            })?;

        Ok(entries
            .into_iter()
            .fold(BulkRead::default(), |mut read, (key, bytes)| {
                match serde_json::from_slice::<T>(&bytes) {
                    Ok(record) => read.decoded.push(record),
                    Err(cause) => read.skipped.push(SkippedEntry { key, cause }),
                }
                read
            }))
    }

    /// Return every record that decodes. Undecodable entries are logged and
    /// skipped; an empty namespace is an empty list, not an error. Order is
    /// unspecified.
    pub fn get_all(&self) -> Result<Vec<T>> {
        let BulkRead { decoded, skipped } = self.read_all()?;

        for entry in &skipped {
            warn!(
                namespace = %self.namespace,
                key = %entry.key,
                error = %entry.cause,
                "could not unmarshal stored {}, skipping",
                T::KIND
            );
        }
        if decoded.is_empty() && skipped.is_empty() {
            debug!(namespace = %self.namespace, "no {} records to get", T::KIND);
        }

        Ok(decoded)
    }

    /// Whether the namespace holds no entries. Touches no values, so it is a
    /// cheap way to confirm the backend is reachable.
    pub fn is_empty(&self) -> Result<bool> {
        self.db
            .is_empty(&self.namespace)
            .map_err(|source| StorageError::IoAll {
                kind: T::KIND,
                namespace: self.namespace.clone(),
                source,
            })
    }

    /// Delete the record under `id`. Deleting an absent record succeeds.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.db
            .delete(&self.namespace, id)
            .map_err(|source| StorageError::Io {
                operation: "delete",
                kind: T::KIND,
                id: id.to_string(),
                source,
            })
    }
}
