//! Storage backend abstraction for image uploads.
//!
//! Supports two backends:
//! - `local`: Local filesystem storage
//! - `s3`: S3-compatible object storage (MinIO, AWS S3, etc.)

pub mod local;
pub mod s3;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use rand::distributions::Alphanumeric;
use rand::Rng;
use thiserror::Error;

use crate::config::config;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("S3 error: {0}")]
    S3(String),
}

/// Trait for storage backends.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Store a file under the given filename.
    async fn put_object(&self, data: Vec<u8>, filename: &str) -> Result<(), StorageError>;
}

static BACKEND: Lazy<Box<dyn StorageBackend>> = Lazy::new(|| {
    let cfg = &config().storage;
    match cfg.backend.as_str() {
        "s3" => Box::new(s3::S3Storage::new(&cfg.s3_region, cfg.s3_bucket.clone())),
        _ => Box::new(local::LocalStorage::new(cfg.local_root.clone())),
    }
});

/// The process-wide storage backend, selected by configuration.
pub fn storage() -> &'static dyn StorageBackend {
    BACKEND.as_ref()
}

/// Rename an upload to a short random identifier, preserving the original
/// extension.
pub fn random_filename(original: &str) -> String {
    let id: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect();

    match std::path::Path::new(original)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) => format!("{}.{}", id, ext.to_ascii_lowercase()),
        None => id,
    }
}

/// Public URL for a stored filename.
pub fn public_url(filename: &str) -> String {
    format!(
        "{}/{}",
        config().storage.public_base_url.trim_end_matches('/'),
        filename
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_filename_keeps_extension() {
        let name = random_filename("photo.JPG");
        assert_eq!(name.len(), 10 + 4);
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn random_filename_without_extension() {
        let name = random_filename("README");
        assert_eq!(name.len(), 10);
        assert!(!name.contains('.'));
    }

    #[test]
    fn random_filenames_are_distinct() {
        assert_ne!(random_filename("a.png"), random_filename("a.png"));
    }
}
