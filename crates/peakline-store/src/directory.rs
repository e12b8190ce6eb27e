//! Filesystem-rooted object store adapter.
//!
//! Serves buckets as directories beneath a configured root. Object keys may
//! contain `/` segments; they map directly onto nested directories. Used by
//! the binary for local operation and by integration tests.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::model::ObjectRef;
use crate::service::ObjectStore;

/// Object store adapter backed by a local directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Construct an adapter rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, object: &ObjectRef) -> PathBuf {
        self.root.join(&object.bucket).join(&object.key)
    }

    fn classify_read_error(object: &ObjectRef, path: &Path, source: io::Error) -> StoreError {
        match source.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound {
                bucket: object.bucket.clone(),
                key: object.key.clone(),
            },
            io::ErrorKind::PermissionDenied => StoreError::Access {
                bucket: object.bucket.clone(),
                key: object.key.clone(),
                source,
            },
            _ => StoreError::Io {
                operation: "fetch.read",
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

#[async_trait]
impl ObjectStore for DirectoryStore {
    async fn fetch(&self, object: &ObjectRef) -> StoreResult<Vec<u8>> {
        let path = self.object_path(object);
        let bytes = fs::read(&path)
            .await
            .map_err(|source| Self::classify_read_error(object, &path, source))?;
        debug!(object = %object, bytes = bytes.len(), "object fetched");
        Ok(bytes)
    }

    async fn put(&self, object: &ObjectRef, bytes: Vec<u8>) -> StoreResult<()> {
        let path = self.object_path(object);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Io {
                    operation: "put.create_parent",
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        fs::write(&path, &bytes)
            .await
            .map_err(|source| match source.kind() {
                io::ErrorKind::PermissionDenied => StoreError::Access {
                    bucket: object.bucket.clone(),
                    key: object.key.clone(),
                    source,
                },
                _ => StoreError::Io {
                    operation: "put.write",
                    path: path.clone(),
                    source,
                },
            })?;
        debug!(object = %object, bytes = bytes.len(), "object stored");
        Ok(())
    }
}
