//! # Object Store Trait
//!
//! The object-storage collaborator interface. Production deployments
//! point this at an S3-compatible backend; `LocalStore` implements it
//! over the local filesystem for development and tests.
//!
//! All calls are potentially long-latency I/O; implementations must
//! not require callers to hold locks across them.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::errors::StorageResult;
use super::object::StoredObject;

/// A time-limited direct-access URL minted by the backend
#[derive(Debug, Clone)]
pub struct SignedDownload {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

/// Backend trait for object storage
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write an object; the key is trusted (already namespaced)
    async fn put(&self, key: &str, data: &[u8], content_type: &str)
        -> StorageResult<StoredObject>;

    /// List objects under a prefix
    async fn list(&self, prefix: &str) -> StorageResult<Vec<StoredObject>>;

    /// Whether an object exists at the key
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Mint a time-limited signed URL for direct read access.
    ///
    /// Expiry enforcement lives in the backend's signing mechanism,
    /// not in gateway logic - this is the trust boundary.
    async fn signed_get_url(&self, key: &str, ttl: Duration) -> StorageResult<SignedDownload>;

    /// Stable public URL for an object (not access-granting by itself)
    fn public_url(&self, key: &str) -> String;
}
