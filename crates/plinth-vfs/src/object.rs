//! Object-storage-backed virtual files.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::path::segments;
use crate::{StorageError, VirtualFiles};

/// Error returned by an [`ObjectClient`].
pub type UploadError = Box<dyn Error + Send + Sync>;

/// Uploads objects to a bucket.
#[async_trait]
pub trait ObjectClient: Send + Sync {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), UploadError>;
}

/// Virtual files stored as objects in a single bucket.
///
/// A virtual path maps to the key formed by its segments, without a leading `/`.
#[derive(Clone)]
pub struct ObjectStoreVirtualFiles {
    client: Arc<dyn ObjectClient>,
    bucket: String,
    scheme: String,
}

impl ObjectStoreVirtualFiles {
    pub fn new(client: Arc<dyn ObjectClient>, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            scheme: "s3".to_string(),
        }
    }

    /// Scheme shown in the root descriptor (`r2`, `s3`, ...).
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Object key for a virtual path.
    pub fn key_for(&self, path: &str) -> Result<String, StorageError> {
        Ok(segments(path)?.join("/"))
    }
}

impl fmt::Debug for ObjectStoreVirtualFiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStoreVirtualFiles")
            .field("bucket", &self.bucket)
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl VirtualFiles for ObjectStoreVirtualFiles {
    fn root_descriptor(&self) -> String {
        format!("{}://{}", self.scheme, self.bucket)
    }

    async fn write_file(&self, path: &str, contents: Bytes) -> Result<(), StorageError> {
        let key = self.key_for(path)?;
        let content_type = mime_guess::from_path(&key).first_or_octet_stream();
        let size = contents.len();

        self.client
            .put_object(&self.bucket, &key, contents, content_type.essence_str())
            .await
            .map_err(|source| StorageError::Upload {
                key: key.clone(),
                source,
            })?;

        tracing::debug!("Uploaded {} bytes to {}/{}", size, self.root_descriptor(), key);
        Ok(())
    }
}

/// S3-compatible client issuing `PUT {endpoint}/{bucket}/{key}`.
#[derive(Clone)]
pub struct HttpObjectClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpObjectClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: None,
        }
    }

    /// Use a preconfigured HTTP client (timeouts, proxies, ...).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Send `Authorization: Bearer <token>` with every upload.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// URL of `key` in `bucket`, with each key segment percent-encoded.
    pub fn object_url(&self, bucket: &str, key: &str) -> Result<Url, UploadError> {
        let mut url = Url::parse(&self.endpoint)?;
        url.path_segments_mut()
            .map_err(|_| format!("endpoint {} cannot hold a path", self.endpoint))?
            .pop_if_empty()
            .push(bucket)
            .extend(key.split('/'));
        Ok(url)
    }
}

impl fmt::Debug for HttpObjectClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpObjectClient")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

#[async_trait]
impl ObjectClient for HttpObjectClient {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), UploadError> {
        let mut request = self
            .http
            .put(self.object_url(bucket, key)?)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        request.send().await?.error_for_status()?;
        Ok(())
    }
}

/// An object held by [`MemoryObjectClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: String,
}

/// In-process object client, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryObjectClient {
    objects: Mutex<BTreeMap<(String, String), StoredObject>>,
}

impl MemoryObjectClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Keys stored in `bucket`, in order.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect()
    }
}

#[async_trait]
impl ObjectClient for MemoryObjectClient {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), UploadError> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                (bucket.to_string(), key.to_string()),
                StoredObject {
                    body,
                    content_type: content_type.to_string(),
                },
            );
        Ok(())
    }
}
