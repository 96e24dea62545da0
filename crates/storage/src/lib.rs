//! Blob-store collaborator for uploaded game assets (thumbnails).
//!
//! The [`Storage`] trait is the seam the service layer programs against:
//! `upload` places a file under a caller-chosen prefix and returns the
//! stored path, `remove` deletes a previously stored path. Errors
//! propagate to the caller; no retry logic lives here.
//!
//! Two implementations:
//! - [`local::LocalStorage`] -- files under a configured root directory.
//! - [`memory::MemoryStorage`] -- in-process map, for tests.

pub mod local;
pub mod memory;

use async_trait::async_trait;

/// A file received from a client, ready to be stored.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Original filename as sent by the client. Used for the stored
    /// path's suffix only; never trusted as a filesystem path.
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error for path '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Invalid storage path: {0}")]
    InvalidPath(String),
}

/// An external key/blob store.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `file` under `prefix`, returning the full stored path.
    ///
    /// The returned path embeds a fresh UUID, so repeated uploads under
    /// the same prefix never collide or overwrite each other.
    async fn upload(&self, prefix: &str, file: UploadFile) -> Result<String, StorageError>;

    /// Remove a previously stored path.
    async fn remove(&self, path: &str) -> Result<(), StorageError>;
}

/// Build the stored path for an upload: `{prefix}/{uuid}-{safe_filename}`.
fn object_path(prefix: &str, filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let prefix = prefix.trim_matches('/');
    format!("{prefix}/{}-{safe}", uuid::Uuid::new_v4())
}

/// Reject paths that could escape the storage root.
fn validate_path(path: &str) -> Result<(), StorageError> {
    if path.is_empty() || path.starts_with('/') || path.split('/').any(|seg| seg == "..") {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(())
}
