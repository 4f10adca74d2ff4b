//! Folder-scoped file API backend
//!
//! Speaks the Drive v3 file API: an object is the file with the given name
//! inside one parent folder. Files are looked up by name on every call and
//! created on first write.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::{content_type_for, validate_key, BackendKind, BlobStore, StorageError};

const BACKEND: &str = "drive";

/// Public Drive API host
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com";

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// Files in one parent folder, addressed by name
pub struct DriveStore {
    api_base: String,
    folder_id: String,
    bearer_token: Option<String>,
    client: Client,
}

impl DriveStore {
    #[must_use]
    pub fn new(api_base: impl Into<String>, folder_id: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            folder_id: folder_id.into(),
            bearer_token: None,
            client: Client::new(),
        }
    }

    #[must_use]
    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token.filter(|t| !t.is_empty());
        self
    }

    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn check(resp: Response, key: &str) -> Result<Response, StorageError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(StorageError::Status {
                backend: BACKEND,
                status: resp.status().as_u16(),
                key: key.to_string(),
            })
        }
    }

    /// Search query matching `name` inside the folder
    fn lookup_query(&self, name: &str) -> String {
        format!(
            "name = '{}' and '{}' in parents and trashed = false",
            escape_literal(name),
            escape_literal(&self.folder_id)
        )
    }

    fn find_file_id(&self, key: &str) -> Result<Option<String>, StorageError> {
        debug!(folder = %self.folder_id, key, "looking up file");
        let req = self
            .client
            .get(format!("{}/drive/v3/files", self.api_base))
            .query(&[
                ("q", self.lookup_query(key).as_str()),
                ("fields", "files(id,name)"),
            ]);
        let resp = Self::check(self.authorize(req).send()?, key)?;
        let list: FileList = resp
            .json()
            .map_err(|e| StorageError::Protocol(format!("file list: {e}")))?;
        Ok(list.files.into_iter().next().map(|f| f.id))
    }

    fn create_file(&self, key: &str) -> Result<String, StorageError> {
        info!(folder = %self.folder_id, key, "creating file");
        let metadata = json!({
            "name": key,
            "parents": [self.folder_id],
            "mimeType": content_type_for(key),
        });
        let req = self
            .client
            .post(format!("{}/drive/v3/files", self.api_base))
            .json(&metadata);
        let resp = Self::check(self.authorize(req).send()?, key)?;
        let file: DriveFile = resp
            .json()
            .map_err(|e| StorageError::Protocol(format!("created file: {e}")))?;
        Ok(file.id)
    }

    fn upload(&self, id: &str, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        debug!(id, key, bytes = bytes.len(), "uploading content");
        let req = self
            .client
            .patch(format!("{}/upload/drive/v3/files/{id}", self.api_base))
            .query(&[("uploadType", "media")])
            .header(CONTENT_TYPE, content_type_for(key))
            .body(bytes.to_vec());
        Self::check(self.authorize(req).send()?, key)?;
        Ok(())
    }
}

impl BlobStore for DriveStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Drive
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        Ok(self.find_file_id(key)?.is_some())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        validate_key(key)?;
        let id = self
            .find_file_id(key)?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;

        let req = self
            .client
            .get(format!("{}/drive/v3/files/{id}", self.api_base))
            .query(&[("alt", "media")]);
        let resp = self.authorize(req).send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(Self::check(resp, key)?.bytes()?.to_vec())
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        validate_key(key)?;
        let id = match self.find_file_id(key)? {
            Some(id) => id,
            None => self.create_file(key)?,
        };
        self.upload(&id, key, bytes)
    }
}

fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
