//! Write-only virtual file stores.
//!
//! A store exposes one operation, writing content at a `/`-separated virtual
//! path, plus a human-readable root descriptor for diagnostics. The local
//! store maps paths under a directory, the object store maps them to keys in
//! a bucket.

pub mod local;
pub mod object;
pub mod path;

use async_trait::async_trait;
use bytes::Bytes;

pub use local::FileSystemVirtualFiles;
pub use object::{
    HttpObjectClient, MemoryObjectClient, ObjectClient, ObjectStoreVirtualFiles, StoredObject,
    UploadError,
};
pub use path::combine_paths;

/// A store that files can be written to.
#[async_trait]
pub trait VirtualFiles: Send + Sync {
    /// Human-readable root (directory or bucket), used only in diagnostics.
    fn root_descriptor(&self) -> String;

    /// Write `contents` at `path`, replacing anything already there.
    async fn write_file(&self, path: &str, contents: Bytes) -> Result<(), StorageError>;
}

/// Errors that can occur while writing to a store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid virtual path: {0}")]
    InvalidPath(String),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to upload {key}: {source}")]
    Upload {
        key: String,
        #[source]
        source: UploadError,
    },
}
