//! Local filesystem storage backend.

use super::{StorageBackend, StorageError};
use async_trait::async_trait;
use std::path::PathBuf;

/// Stores uploads under a configured root directory.
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> LocalStorage {
        let root = root.into();
        tracing::info!("LocalStorage initialized at {}", root.display());
        LocalStorage { root }
    }
}

#[async_trait]
impl StorageBackend for LocalStorage {
    async fn put_object(&self, data: Vec<u8>, filename: &str) -> Result<(), StorageError> {
        tracing::debug!("LocalStorage: put_object: {}", filename);

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(filename), data).await?;
        Ok(())
    }
}
