//! Startup configuration
//!
//! Selects the blob store backend. Read from a JSON file; the token for
//! remote backends may come from the `PARLOR_TOKEN` environment variable
//! instead of the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::storage::{drive, BlobStore, BucketStore, DriveStore, LocalDirStore, MemoryStore};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "PARLOR_CONFIG";

/// Environment variable holding the remote backend token
pub const TOKEN_ENV: &str = "PARLOR_TOKEN";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error for {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Invalid config in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Cannot find home directory")]
    NoHomeDir,

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Which backend to use and how to reach it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    /// Nothing persists past the process
    Memory,
    /// Files in a local directory
    Local { root: PathBuf },
    /// S3-compatible bucket
    Bucket {
        endpoint: String,
        bucket: String,
        #[serde(default)]
        token: Option<String>,
    },
    /// Drive-style folder
    Drive {
        #[serde(default = "default_api_base")]
        api_base: String,
        folder_id: String,
        #[serde(default)]
        token: Option<String>,
    },
}

fn default_api_base() -> String {
    drive::DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Parlor configuration file contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParlorConfig {
    pub backend: BackendConfig,
    /// Request timeout for remote backends
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ParlorConfig {
    #[must_use]
    pub fn new(backend: BackendConfig) -> Self {
        Self {
            backend,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Local backend rooted at `<dir>/data`
    #[must_use]
    pub fn local(dir: &Path) -> Self {
        Self::new(BackendConfig::Local {
            root: dir.join("data"),
        })
    }

    /// Parse a config file
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable, or malformed
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Find and load the configuration
    ///
    /// An explicit path (flag or `PARLOR_CONFIG`) must exist. Otherwise
    /// `~/.parlor/config.json` is used when present, falling back to a local
    /// backend under `~/.parlor/data`.
    ///
    /// # Errors
    /// Returns an error if an explicit file is missing or any file is invalid
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        let config = if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            Self::from_file(&path)?
        } else {
            let dir = default_dir()?;
            let path = dir.join("config.json");
            if path.exists() {
                debug!(path = %path.display(), "loading config");
                Self::from_file(&path)?
            } else {
                Self::local(&dir)
            }
        };
        Ok(config.with_token_fallback(std::env::var(TOKEN_ENV).ok()))
    }

    /// Fill in a missing backend token
    #[must_use]
    pub fn with_token_fallback(mut self, fallback: Option<String>) -> Self {
        match &mut self.backend {
            BackendConfig::Bucket { token, .. } | BackendConfig::Drive { token, .. } => {
                if token.is_none() {
                    *token = fallback;
                }
            }
            BackendConfig::Memory | BackendConfig::Local { .. } => {}
        }
        self
    }

    /// Build the configured blob store
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn open_store(&self) -> Result<Box<dyn BlobStore>, ConfigError> {
        let store: Box<dyn BlobStore> = match &self.backend {
            BackendConfig::Memory => Box::new(MemoryStore::new()),
            BackendConfig::Local { root } => Box::new(LocalDirStore::new(root.clone())),
            BackendConfig::Bucket {
                endpoint,
                bucket,
                token,
            } => Box::new(
                BucketStore::new(endpoint.as_str(), bucket.as_str())
                    .with_bearer_token(token.clone())
                    .with_client(self.http_client()?),
            ),
            BackendConfig::Drive {
                api_base,
                folder_id,
                token,
            } => Box::new(
                DriveStore::new(api_base.as_str(), folder_id.as_str())
                    .with_bearer_token(token.clone())
                    .with_client(self.http_client()?),
            ),
        };
        debug!(backend = store.kind().as_str(), "opened blob store");
        Ok(store)
    }

    fn http_client(&self) -> Result<reqwest::blocking::Client, ConfigError> {
        reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))
    }
}

/// `~/.parlor`
///
/// # Errors
/// Returns an error if the home directory cannot be determined
pub fn default_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".parlor"))
        .ok_or(ConfigError::NoHomeDir)
}
