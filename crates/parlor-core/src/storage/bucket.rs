//! S3-compatible bucket backend
//!
//! Objects are addressed path-style as `{endpoint}/{bucket}/{key}`.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::debug;

use super::{content_type_for, validate_key, BackendKind, BlobStore, StorageError};

const BACKEND: &str = "bucket";

/// Bucket + key object store over HTTP
///
/// Requests carry an optional bearer token and are never SigV4-signed, so
/// plain AWS S3 is reachable only through a signing gateway or proxy that
/// accepts bearer auth. Self-hosted S3-compatible servers configured for
/// token auth work directly.
pub struct BucketStore {
    endpoint: String,
    bucket: String,
    bearer_token: Option<String>,
    client: Client,
}

impl BucketStore {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
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

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

impl BlobStore for BucketStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Bucket
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        debug!(bucket = %self.bucket, key, "HEAD object");
        let resp = self.authorize(self.client.head(self.object_url(key))).send()?;
        match resp.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            s => Err(StorageError::Status {
                backend: BACKEND,
                status: s.as_u16(),
                key: key.to_string(),
            }),
        }
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        validate_key(key)?;
        debug!(bucket = %self.bucket, key, "GET object");
        let resp = self.authorize(self.client.get(self.object_url(key))).send()?;
        match resp.status() {
            s if s.is_success() => Ok(resp.bytes()?.to_vec()),
            StatusCode::NOT_FOUND => Err(StorageError::NotFound(key.to_string())),
            s => Err(StorageError::Status {
                backend: BACKEND,
                status: s.as_u16(),
                key: key.to_string(),
            }),
        }
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        validate_key(key)?;
        debug!(bucket = %self.bucket, key, bytes = bytes.len(), "PUT object");
        let req = self
            .client
            .put(self.object_url(key))
            .header(CONTENT_TYPE, content_type_for(key))
            .body(bytes.to_vec());
        let resp = self.authorize(req).send()?;
        if !resp.status().is_success() {
            return Err(StorageError::Status {
                backend: BACKEND,
                status: resp.status().as_u16(),
                key: key.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url_is_path_style() {
        let store = BucketStore::new("https://s3.us-east-1.amazonaws.com/", "parlor");
        assert_eq!(
            store.object_url("orders.csv"),
            "https://s3.us-east-1.amazonaws.com/parlor/orders.csv"
        );
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let store = BucketStore::new("http://localhost", "b").with_bearer_token(Some(String::new()));
        assert!(store.bearer_token.is_none());
    }
}
