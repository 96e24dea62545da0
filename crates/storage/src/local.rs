//! Local-filesystem storage provider.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::{object_path, validate_path, Storage, StorageError, UploadFile};

/// Stores blobs as plain files under a root directory.
///
/// Stored paths are relative to the root (e.g.
/// `game/flip-tiles/<game_id>/<uuid>-thumb.png`), so the root can be
/// relocated without rewriting database rows.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        validate_path(path)?;
        Ok(self.root.join(path))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(&self, prefix: &str, file: UploadFile) -> Result<String, StorageError> {
        let path = object_path(prefix, &file.filename);
        let full = self.resolve(&path)?;

        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Io {
                    path: path.clone(),
                    source,
                })?;
        }

        tokio::fs::write(&full, &file.bytes)
            .await
            .map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(%path, size = file.bytes.len(), "Stored blob");
        Ok(path)
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;

        match tokio::fs::remove_file(&full).await {
            Ok(()) => {
                tracing::debug!(%path, "Removed blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(source) => Err(StorageError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_file() -> UploadFile {
        UploadFile {
            filename: "thumb.png".into(),
            content_type: Some("image/png".into()),
            bytes: vec![1, 2, 3],
        }
    }

    #[tokio::test]
    async fn test_upload_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let path = storage.upload("game/flip-tiles/abc", test_file()).await.unwrap();
        assert!(dir.path().join(&path).exists());

        storage.remove(&path).await.unwrap();
        assert!(!dir.path().join(&path).exists());
    }

    #[tokio::test]
    async fn test_remove_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let err = storage.remove("game/flip-tiles/nope.png").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_upload_rejects_traversal_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let err = storage.upload("../escape", test_file()).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidPath(_)));
    }
}
