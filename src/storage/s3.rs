//! S3-compatible storage backend.

use super::{StorageBackend, StorageError};
use async_trait::async_trait;
use rusoto_core::Region;
use rusoto_s3::{PutObjectRequest, S3Client, S3};

pub struct S3Storage {
    s3: S3Client,
    bucket_name: String,
}

impl S3Storage {
    pub fn new(region: &str, bucket_name: String) -> S3Storage {
        let region = region.parse::<Region>().unwrap_or(Region::UsEast1);
        tracing::info!("S3Storage initialized for bucket: {}", bucket_name);

        S3Storage {
            s3: S3Client::new(region),
            bucket_name,
        }
    }
}

#[async_trait]
impl StorageBackend for S3Storage {
    async fn put_object(&self, data: Vec<u8>, filename: &str) -> Result<(), StorageError> {
        tracing::debug!("S3Storage: put_object: {}", filename);

        let put_request = PutObjectRequest {
            bucket: self.bucket_name.clone(),
            key: filename.to_string(),
            body: Some(data.into()),
            ..Default::default()
        };

        self.s3
            .put_object(put_request)
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;

        Ok(())
    }
}
