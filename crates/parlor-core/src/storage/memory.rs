//! In-process blob store

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::{validate_key, BackendKind, BlobStore, StorageError};

/// Objects held in memory; used for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all stored objects, sorted
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let objects = self.objects.lock().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = objects.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl BlobStore for MemoryStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        let objects = self.objects.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(objects.contains_key(key))
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        validate_key(key)?;
        let objects = self.objects.lock().unwrap_or_else(PoisonError::into_inner);
        objects
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut objects = self.objects.lock().unwrap_or_else(PoisonError::into_inner);
        objects.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_overwrite() {
        let store = MemoryStore::new();
        assert!(!store.exists("a.csv").unwrap());
        assert!(store.get("a.csv").unwrap_err().is_not_found());

        store.put("a.csv", b"one").unwrap();
        store.put("a.csv", b"two").unwrap();
        assert!(store.exists("a.csv").unwrap());
        assert_eq!(store.get("a.csv").unwrap(), b"two");
        assert_eq!(store.keys(), vec!["a.csv".to_string()]);
    }

    #[test]
    fn test_rejects_bad_keys() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.put("../x", b""),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
