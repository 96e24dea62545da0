//! In-memory storage provider for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{object_path, validate_path, Storage, StorageError, UploadFile};

/// Keeps blobs in a process-local map. Intended for integration tests
/// that need to observe which paths exist after an operation.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a blob exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.blobs.lock().unwrap().contains_key(path)
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored paths, unordered.
    pub fn paths(&self) -> Vec<String> {
        self.blobs.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload(&self, prefix: &str, file: UploadFile) -> Result<String, StorageError> {
        let path = object_path(prefix, &file.filename);
        validate_path(&path)?;
        self.blobs.lock().unwrap().insert(path.clone(), file.bytes);
        Ok(path)
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        match self.blobs.lock().unwrap().remove(path) {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound(path.to_string())),
        }
    }
}
