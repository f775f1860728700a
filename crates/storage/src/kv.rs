//! Namespaced key-value backends.

use crate::errors::BackendError;
use parking_lot::RwLock;
use sled::{Db, Tree};
use std::collections::HashMap;
use std::path::Path;

/// Byte-oriented key-value store partitioned into namespaces.
///
/// A key is only unique within its namespace. Implementations must be safe
/// to share across request workers; each call is an independent unit of work
/// with at least single-key atomicity.
pub trait ServiceStorage: Send + Sync {
    /// Write `value` under `(namespace, key)`, replacing any previous value.
    fn write(&self, namespace: &str, key: &str, value: &[u8]) -> Result<(), BackendError>;

    /// Read the value under `(namespace, key)`. An absent key yields an empty
    /// vector rather than an error.
    fn read(&self, namespace: &str, key: &str) -> Result<Vec<u8>, BackendError>;

    /// Read every entry in `namespace`. An empty namespace yields an empty map.
    fn read_all(&self, namespace: &str) -> Result<HashMap<String, Vec<u8>>, BackendError>;

    /// Delete `(namespace, key)`. Deleting an absent key is not an error.
    fn delete(&self, namespace: &str, key: &str) -> Result<(), BackendError>;

    /// Whether `namespace` holds no entries, without reading any values.
    fn is_empty(&self, namespace: &str) -> Result<bool, BackendError>;
}

/// Name of the tree sled opens for the database itself.
const SLED_DEFAULT_TREE: &str = "__sled__default";

/// Sled-backed implementation, one tree per namespace.
///
/// Trees are only created by writes. Reads and deletes against a namespace
/// that was never written see it as empty.
pub struct SledStorage {
    db: Db,
}

impl SledStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, BackendError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Open a throwaway database that is removed when dropped.
    pub fn temporary() -> Result<Self, BackendError> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }

    pub fn flush(&self) -> Result<(), BackendError> {
        self.db.flush()?;
        Ok(())
    }

    fn tree(&self, namespace: &str) -> Result<Tree, BackendError> {
        check_namespace(namespace)?;
        Ok(self.db.open_tree(namespace)?)
    }

    fn existing_tree(&self, namespace: &str) -> Result<Option<Tree>, BackendError> {
        check_namespace(namespace)?;
        let exists = self
            .db
            .tree_names()
            .iter()
            .any(|name| &name[..] == namespace.as_bytes());
        if !exists {
            return Ok(None);
        }
        Ok(Some(self.db.open_tree(namespace)?))
    }
}

fn check_namespace(namespace: &str) -> Result<(), BackendError> {
    if namespace == SLED_DEFAULT_TREE {
        return Err(BackendError::ReservedNamespace(namespace.to_string()));
    }
    Ok(())
}

impl ServiceStorage for SledStorage {
    fn write(&self, namespace: &str, key: &str, value: &[u8]) -> Result<(), BackendError> {
        self.tree(namespace)?.insert(key.as_bytes(), value)?;
        Ok(())
    }

    fn read(&self, namespace: &str, key: &str) -> Result<Vec<u8>, BackendError> {
        let Some(tree) = self.existing_tree(namespace)? else {
            return Ok(Vec::new());
        };
        Ok(tree
            .get(key.as_bytes())?
            .map(|v| v.to_vec())
            .unwrap_or_default())
    }

    fn read_all(&self, namespace: &str) -> Result<HashMap<String, Vec<u8>>, BackendError> {
        let mut entries = HashMap::new();
        let Some(tree) = self.existing_tree(namespace)? else {
            return Ok(entries);
        };
        for item in tree.iter() {
            let (k, v) = item?;
            entries.insert(String::from_utf8_lossy(&k).into_owned(), v.to_vec());
        }
        Ok(entries)
    }

    fn delete(&self, namespace: &str, key: &str) -> Result<(), BackendError> {
        if let Some(tree) = self.existing_tree(namespace)? {
            tree.remove(key.as_bytes())?;
        }
        Ok(())
    }

    fn is_empty(&self, namespace: &str) -> Result<bool, BackendError> {
        Ok(self
            .existing_tree(namespace)?
            .map_or(true, |tree| tree.is_empty()))
    }
}

/// In-memory backend for tests and ephemeral deployments.
#[derive(Default)]
pub struct MemoryStorage {
    namespaces: RwLock<HashMap<String, HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ServiceStorage for MemoryStorage {
    fn write(&self, namespace: &str, key: &str, value: &[u8]) -> Result<(), BackendError> {
        self.namespaces
            .write()
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn read(&self, namespace: &str, key: &str) -> Result<Vec<u8>, BackendError> {
        Ok(self
            .namespaces
            .read()
            .get(namespace)
            .and_then(|entries| entries.get(key))
            .cloned()
            .unwrap_or_default())
    }

    fn read_all(&self, namespace: &str) -> Result<HashMap<String, Vec<u8>>, BackendError> {
        Ok(self
            .namespaces
            .read()
            .get(namespace)
            .cloned()
            .unwrap_or_default())
    }

    fn delete(&self, namespace: &str, key: &str) -> Result<(), BackendError> {
        if let Some(entries) = self.namespaces.write().get_mut(namespace) {
            entries.remove(key);
        }
        Ok(())
    }

    fn is_empty(&self, namespace: &str) -> Result<bool, BackendError> {
        Ok(self
            .namespaces
            .read()
            .get(namespace)
            .map_or(true, |entries| entries.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise_backend<S: ServiceStorage>(storage: &S) {
        assert!(storage.read("manifest", "missing").unwrap().is_empty());
        assert!(storage.read_all("manifest").unwrap().is_empty());

        storage.write("manifest", "a", b"one").unwrap();
        storage.write("application", "a", b"two").unwrap();
        assert_eq!(storage.read("manifest", "a").unwrap(), b"one");
        assert_eq!(storage.read("application", "a").unwrap(), b"two");

        storage.write("manifest", "a", b"three").unwrap();
        assert_eq!(storage.read("manifest", "a").unwrap(), b"three");

        let all = storage.read_all("manifest").unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all.get("a").map(Vec::as_slice), Some(&b"three"[..]));

        assert!(storage.is_empty("response").unwrap());
        assert!(!storage.is_empty("manifest").unwrap());

        storage.delete("manifest", "a").unwrap();
        storage.delete("manifest", "a").unwrap();
        storage.delete("unknown", "a").unwrap();
        assert!(storage.read("manifest", "a").unwrap().is_empty());
        assert_eq!(storage.read("application", "a").unwrap(), b"two");
        assert!(storage.is_empty("manifest").unwrap());
    }

    #[test]
    fn memory_backend_semantics() {
        exercise_backend(&MemoryStorage::new());
    }

    #[test]
    fn sled_backend_semantics() {
        let storage = SledStorage::temporary().expect("temporary sled");
        exercise_backend(&storage);
    }

    fn tree_exists(storage: &SledStorage, namespace: &str) -> bool {
        storage
            .db
            .tree_names()
            .iter()
            .any(|name| &name[..] == namespace.as_bytes())
    }

    #[test]
    fn sled_reads_do_not_create_namespaces() {
        let storage = SledStorage::temporary().expect("temporary sled");

        assert!(storage.read("did:key", "missing").unwrap().is_empty());
        assert!(storage.read_all("did:key").unwrap().is_empty());
        assert!(storage.is_empty("did:key").unwrap());
        storage.delete("did:key", "missing").unwrap();
        assert!(!tree_exists(&storage, "did:key"));

        storage.write("did:key", "a", b"doc").unwrap();
        assert!(tree_exists(&storage, "did:key"));
    }

    #[test]
    fn sled_default_tree_is_not_a_namespace() {
        let storage = SledStorage::temporary().expect("temporary sled");

        let err = storage
            .write(SLED_DEFAULT_TREE, "a", b"value")
            .unwrap_err();
        assert!(matches!(err, BackendError::ReservedNamespace(_)));
        assert!(storage.read(SLED_DEFAULT_TREE, "a").is_err());
        assert!(storage.read_all(SLED_DEFAULT_TREE).is_err());
    }
}
