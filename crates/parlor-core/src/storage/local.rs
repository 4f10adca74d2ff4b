//! Blob store backed by a local directory

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::debug;

use super::{validate_key, BackendKind, BlobStore, StorageError};

/// One file per object under a root directory
#[derive(Debug, Clone)]
pub struct LocalDirStore {
    root: PathBuf,
}

impl LocalDirStore {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn object_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

impl BlobStore for LocalDirStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.object_path(key)?.is_file())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.object_path(key)?;
        debug!(path = %path.display(), "reading object");
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound(key.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.object_path(key)?;
        debug!(path = %path.display(), bytes = bytes.len(), "writing object");

        fs::create_dir_all(&self.root)?;

        // Temp file in the same directory so the rename stays on one filesystem
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }
}
