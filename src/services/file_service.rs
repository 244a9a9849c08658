//! File service storing uploaded blobs on the local filesystem.
//!
//! Blobs are addressed by relative keys such as `posts/<uuid>.png`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use uuid::Uuid;

use crate::errors::ApiError;

/// Blob store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileService {
    root: PathBuf,
}

impl FileService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store bytes under `namespace` with a fresh unique name and return the key.
    pub async fn store(
        &self,
        namespace: &str,
        extension: &str,
        bytes: &[u8],
    ) -> Result<String, ApiError> {
        let key = format!("{}/{}.{}", namespace, Uuid::new_v4(), extension);
        let path = self
            .resolve(&key)
            .ok_or_else(|| ApiError::Internal(format!("Invalid storage namespace: {}", namespace)))?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        debug!("Stored {} bytes at {}", bytes.len(), key);
        Ok(key)
    }

    /// Read a blob; `None` when the key is unknown or not a plain relative path.
    pub async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, ApiError> {
        let path = match self.resolve(key) {
            Some(path) => path,
            None => return Ok(None),
        };

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn exists(&self, key: &str) -> bool {
        match self.resolve(key) {
            Some(path) => tokio::fs::try_exists(&path).await.unwrap_or(false),
            None => false,
        }
    }

    /// Delete a blob. Missing blobs are ignored.
    pub async fn delete(&self, key: &str) -> Result<(), ApiError> {
        let path = match self.resolve(key) {
            Some(path) => path,
            None => {
                warn!("Refusing to delete blob with invalid key: {}", key);
                return Ok(());
            }
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Map a key to a path below the root, rejecting traversal and absolute keys.
    fn resolve(&self, key: &str) -> Option<PathBuf> {
        let mut path = self.root.clone();
        for segment in key.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
                return None;
            }
            path.push(segment);
        }
        Some(path)
    }
}
