//! Port traits over the external collaborators.
//!
//! The handler is generic over these so its routing properties can be tested
//! with in-memory fakes; production wires in [`VisionClient`] and
//! [`BlobClient`].

use async_trait::async_trait;
use vsort_models::Tag;
use vsort_storage::{BlobClient, ObjectInfo, StorageResult};
use vsort_vision::{VisionClient, VisionResult};

/// Remote image classifier.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify image bytes into a set of tags.
    async fn classify(&self, image: &[u8]) -> VisionResult<Vec<Tag>>;
}

#[async_trait]
impl Classifier for VisionClient {
    async fn classify(&self, image: &[u8]) -> VisionResult<Vec<Tag>> {
        self.analyze(image).await
    }
}

/// Durable object store holding source and destination artifacts.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Overwrite the object at `key` with `data`.
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> StorageResult<()>;

    /// Read the object at `key` fully into memory.
    async fn get(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// List objects under a prefix.
    async fn list(&self, prefix: &str) -> StorageResult<Vec<ObjectInfo>>;
}

#[async_trait]
impl ObjectStore for BlobClient {
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> StorageResult<()> {
        self.upload_bytes(key, data.to_vec(), content_type).await
    }

    async fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.download_bytes(key).await
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<ObjectInfo>> {
        self.list_objects(prefix).await
    }
}
