//! Blob storage backends
//!
//! Every dataset lives in one object of a [`BlobStore`]. Objects are read
//! and written whole; there are no partial writes, no conditional writes,
//! and no retries.

pub mod bucket;
pub mod drive;
pub mod local;
pub mod memory;

pub use bucket::BucketStore;
pub use drive::DriveStore;
pub use local::LocalDirStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{backend} returned HTTP {status} for {key}")]
    Status {
        backend: &'static str,
        status: u16,
        key: String,
    },

    #[error("Unexpected response: {0}")]
    Protocol(String),
}

impl StorageError {
    /// Get the error code for CLI output
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidKey(_) => "INVALID_KEY",
            Self::Io(_) => "IO_ERROR",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Status { .. } => "REMOTE_ERROR",
            Self::Protocol(_) => "PROTOCOL_ERROR",
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Which backend a store talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    Local,
    Bucket,
    Drive,
}

impl BackendKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Local => "local",
            Self::Bucket => "bucket",
            Self::Drive => "drive",
        }
    }
}

/// A remote store of whole named objects
pub trait BlobStore: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Whether an object exists
    ///
    /// # Errors
    /// Returns an error if the backend cannot be reached
    fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// Fetch an object's bytes
    ///
    /// # Errors
    /// Returns [`StorageError::NotFound`] if the object is absent, or another
    /// error if the fetch fails
    fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Create or overwrite an object in a single call
    ///
    /// # Errors
    /// Returns an error if the write fails
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

impl<S: BlobStore + ?Sized> BlobStore for Box<S> {
    fn kind(&self) -> BackendKind {
        (**self).kind()
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        (**self).exists(key)
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).put(key, bytes)
    }
}

/// Validate an object key
///
/// Keys are flat file names: no path separators, no `..`, no leading dot.
///
/// # Errors
/// Returns an error if the key is unsafe to use as a file name
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key cannot be empty".to_string()));
    }
    if key.contains('/') || key.contains('\\') || key.contains("..") {
        return Err(StorageError::InvalidKey(format!(
            "{key}: cannot contain path separators or '..'"
        )));
    }
    if key.starts_with('.') {
        return Err(StorageError::InvalidKey(format!(
            "{key}: cannot start with '.'"
        )));
    }
    if key.contains('\0') {
        return Err(StorageError::InvalidKey(
            "key cannot contain null bytes".to_string(),
        ));
    }
    Ok(())
}

/// MIME type sent with an object upload
#[must_use]
pub fn content_type_for(key: &str) -> &'static str {
    if key.ends_with(".csv") {
        "text/csv"
    } else if key.ends_with(".json") {
        "application/json"
    } else {
        "application/octet-stream"
    }
}
