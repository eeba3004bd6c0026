//! Filesystem-backed virtual files.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::path::segments;
use crate::{StorageError, VirtualFiles};

/// Virtual files rooted at a local directory.
#[derive(Debug, Clone)]
pub struct FileSystemVirtualFiles {
    root: PathBuf,
}

impl FileSystemVirtualFiles {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a virtual path onto a filesystem path under the root.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let mut resolved = self.root.clone();
        for segment in segments(path)? {
            resolved.push(segment);
        }
        Ok(resolved)
    }
}

#[async_trait]
impl VirtualFiles for FileSystemVirtualFiles {
    fn root_descriptor(&self) -> String {
        self.root.display().to_string()
    }

    async fn write_file(&self, path: &str, contents: Bytes) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        let io_error = |source: io::Error| StorageError::Io {
            path: target.display().to_string(),
            source,
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }

        // Write beside the target and rename, so readers never see a partial file
        let staging = staging_path(&target);
        if let Err(err) = write_then_rename(&staging, &target, &contents).await {
            let _ = fs::remove_file(&staging).await;
            return Err(io_error(err));
        }

        tracing::debug!("Wrote {} bytes to {}", contents.len(), target.display());
        Ok(())
    }
}

async fn write_then_rename(staging: &Path, target: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(staging).await?;
    file.write_all(contents).await?;
    file.flush().await?;
    drop(file);
    fs::rename(staging, target).await
}

fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.tmp"))
}
