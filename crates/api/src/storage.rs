//! Storage backend for task attachments.
//!
//! Rows in `task_files` hold an opaque `storage_key`; the bytes live behind
//! [`FileStorage`]. [`LocalFileStorage`] keeps them in a directory on disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Stored file not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;
    /// Remove the object. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Files stored flat under a root directory, one file per key.
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if valid {
            Ok(self.root.join(key))
        } else {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound(key.into())),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Build a fresh storage key for an uploaded file, keeping a sanitized form
/// of its extension so stored files stay recognizable on disk.
pub fn new_storage_key(filename: &str) -> String {
    let id = uuid::Uuid::new_v4();
    let ext: String = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    if ext.is_empty() {
        id.to_string()
    } else {
        format!("{id}.{ext}")
    }
}

/// Remove stored objects, logging failures. Used after the owning rows are
/// gone, so a leftover file never blocks the request.
pub async fn remove_best_effort(storage: &dyn FileStorage, keys: &[String]) {
    for key in keys {
        if let Err(e) = storage.delete(key).await {
            tracing::warn!(error = %e, storage_key = %key, "Failed to remove stored file");
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn put_get_delete_round_trip() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let storage = LocalFileStorage::new(dir.path().join("files"));

        storage.put("abc.txt", b"hello").await.unwrap();
        assert_eq!(storage.get("abc.txt").await.unwrap(), b"hello");

        storage.delete("abc.txt").await.unwrap();
        assert_matches!(storage.get("abc.txt").await, Err(StorageError::NotFound(_)));
        storage.delete("abc.txt").await.unwrap();
    }

    #[tokio::test]
    async fn rejects_keys_escaping_the_root() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let storage = LocalFileStorage::new(dir.path());

        assert_matches!(
            storage.put("../escape", b"x").await,
            Err(StorageError::InvalidKey(_))
        );
        assert_matches!(storage.get("a/b").await, Err(StorageError::InvalidKey(_)));
    }

    #[test]
    fn storage_keys_keep_a_clean_extension() {
        let key = new_storage_key("Quarterly Plan.PDF");
        assert!(key.ends_with(".pdf"));
        assert_eq!(key.len(), 36 + 4);

        let bare = new_storage_key("README");
        assert_eq!(bare.len(), 36);
        assert_ne!(new_storage_key("a.txt"), new_storage_key("a.txt"));
    }
}
