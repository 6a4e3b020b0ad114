//! # Namespaced Store
//!
//! Wraps the object-storage backend so every key is deterministically
//! scoped under the owning principal's namespace. The prefix comes
//! from the verified principal, never from client input.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::backend::ObjectStore;
use super::errors::{StorageError, StorageResult};
use super::namespace::{self, validate_filename};
use super::object::StoredObject;
use crate::auth::user::Principal;

/// Strictly monotonic upload suffixes.
///
/// Millisecond timestamps, bumped past the last issued value on ties,
/// so concurrent uploads from one principal in the same tick still get
/// distinct, ordered suffixes.
#[derive(Debug, Default)]
pub struct UploadSuffix {
    last: AtomicI64,
}

impl UploadSuffix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match self.last.compare_exchange_weak(
                last,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(observed) => last = observed,
            }
        }
    }
}

/// Principal-scoped view over the object store
pub struct NamespacedStore {
    backend: Arc<dyn ObjectStore>,
    suffixes: UploadSuffix,
    max_upload_bytes: u64,
}

impl NamespacedStore {
    pub fn new(backend: Arc<dyn ObjectStore>, max_upload_bytes: u64) -> Self {
        Self {
            backend,
            suffixes: UploadSuffix::new(),
            max_upload_bytes,
        }
    }

    /// Store a file under the principal's namespace.
    ///
    /// The key is `users/{username}/{suffix}-{filename}`; the suffix
    /// keeps same-named uploads from overwriting each other.
    pub async fn put(
        &self,
        principal: &Principal,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> StorageResult<StoredObject> {
        validate_filename(filename)?;

        if data.len() as u64 > self.max_upload_bytes {
            return Err(StorageError::FileTooLarge(
                data.len() as u64,
                self.max_upload_bytes,
            ));
        }

        let key = namespace::object_key(&principal.username, self.suffixes.next(), filename);
        self.backend.put(&key, data, content_type).await
    }

    /// List the principal's objects, and only theirs
    pub async fn list(&self, principal: &Principal) -> StorageResult<Vec<StoredObject>> {
        self.backend
            .list(&namespace::namespace(&principal.username))
            .await
    }

    /// Public URL for a stored object
    pub fn public_url(&self, object: &StoredObject) -> String {
        self.backend.public_url(&object.key)
    }
}
