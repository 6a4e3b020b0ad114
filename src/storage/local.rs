//! # Local Filesystem Store
//!
//! `ObjectStore` over a local directory, for development and tests.
//! Keys map to paths segment-by-segment; any key with an empty, `.`,
//! or `..` segment is rejected before touching the filesystem.
//!
//! Signed URLs point at the gateway's `/objects/` route, which serves
//! as this backend's direct-access endpoint.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::backend::{ObjectStore, SignedDownload};
use super::errors::{StorageError, StorageResult};
use super::object::StoredObject;
use super::signed_url::SignedUrlGenerator;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Local filesystem object store
pub struct LocalStore {
    root: PathBuf,
    base_url: String,
    signer: SignedUrlGenerator,
    // Content types are not recoverable from the filesystem; uploads
    // record them here, anything else reads back as octet-stream
    content_types: RwLock<HashMap<String, String>>,
}

impl LocalStore {
    pub fn new(root: PathBuf, base_url: String, signing_secret: &[u8]) -> Self {
        Self {
            root,
            base_url: base_url.trim_end_matches('/').to_string(),
            signer: SignedUrlGenerator::new(signing_secret),
            content_types: RwLock::new(HashMap::new()),
        }
    }

    fn full_path(&self, key: &str) -> StorageResult<PathBuf> {
        let mut path = self.root.clone();
        for segment in key.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(StorageError::InvalidKey(key.to_string()));
            }
            path.push(segment);
        }
        Ok(path)
    }

    fn content_type_for(&self, key: &str) -> StorageResult<String> {
        let types = self
            .content_types
            .read()
            .map_err(|_| StorageError::Backend("lock poisoned".to_string()))?;
        Ok(types
            .get(key)
            .cloned()
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()))
    }

    /// Read an object's metadata and bytes.
    ///
    /// Backs the `/objects/` route; only reachable after the signed
    /// token has been verified.
    pub async fn get(&self, key: &str) -> StorageResult<(StoredObject, Vec<u8>)> {
        let path = self.full_path(key)?;

        let data = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::ObjectNotFound(key.to_string())
            } else {
                StorageError::Io(e.to_string())
            }
        })?;

        let meta = tokio::fs::metadata(&path)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        let last_modified = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        let object = StoredObject {
            key: key.to_string(),
            size: data.len() as u64,
            last_modified,
            content_type: self.content_type_for(key)?,
        };

        Ok((object, data))
    }

    /// Verify a presented signed-URL token for a key
    pub fn verify_token(&self, key: &str, expires: i64, token: &str) -> StorageResult<()> {
        self.signer.verify(key, expires, token)
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> StorageResult<StoredObject> {
        let path = self.full_path(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Io(e.to_string()))?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        self.content_types
            .write()
            .map_err(|_| StorageError::Backend("lock poisoned".to_string()))?
            .insert(key.to_string(), content_type.to_string());

        Ok(StoredObject {
            key: key.to_string(),
            size: data.len() as u64,
            last_modified: Utc::now(),
            content_type: content_type.to_string(),
        })
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<StoredObject>> {
        let dir = self.full_path(prefix.trim_end_matches('/'))?;

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };

        let mut objects = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?
        {
            let meta = entry
                .metadata()
                .await
                .map_err(|e| StorageError::Io(e.to_string()))?;
            if !meta.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let key = format!("{}{}", prefix, name);
            let last_modified = meta
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());
            let content_type = self.content_type_for(&key)?;

            objects.push(StoredObject {
                key,
                size: meta.len(),
                last_modified,
                content_type,
            });
        }

        objects.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(objects)
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.full_path(key)?;

        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }

    async fn signed_get_url(&self, key: &str, ttl: Duration) -> StorageResult<SignedDownload> {
        let signed = self.signer.generate(key, ttl);

        Ok(SignedDownload {
            url: signed.to_url(&self.base_url),
            expires_at: signed.expires_at,
        })
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/objects/{}", self.base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (LocalStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = LocalStore::new(
            temp.path().to_path_buf(),
            "http://localhost:4000".to_string(),
            b"url-test-secret",
        );
        (store, temp)
    }

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let (store, _temp) = create_test_store();

        let obj = store
            .put("users/alice/1-hello.txt", b"Hello, World!", "text/plain")
            .await
            .unwrap();
        assert_eq!(obj.size, 13);
        assert_eq!(obj.content_type, "text/plain");

        let (meta, data) = store.get("users/alice/1-hello.txt").await.unwrap();
        assert_eq!(data, b"Hello, World!");
        assert_eq!(meta.content_type, "text/plain");
    }

    #[tokio::test]
    async fn test_list_returns_only_prefix() {
        let (store, _temp) = create_test_store();

        store
            .put("users/alice/1-a.txt", b"a", "text/plain")
            .await
            .unwrap();
        store
            .put("users/alice/2-b.txt", b"bb", "text/plain")
            .await
            .unwrap();
        store
            .put("users/bob/3-c.txt", b"ccc", "text/plain")
            .await
            .unwrap();

        let objects = store.list("users/alice/").await.unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].key, "users/alice/1-a.txt");
        assert_eq!(objects[0].size, 1);
        assert_eq!(objects[1].key, "users/alice/2-b.txt");
    }

    #[tokio::test]
    async fn test_list_missing_prefix_is_empty() {
        let (store, _temp) = create_test_store();

        let objects = store.list("users/nobody/").await.unwrap();
        assert!(objects.is_empty());
    }

    #[tokio::test]
    async fn test_exists() {
        let (store, _temp) = create_test_store();

        store
            .put("users/alice/1-a.txt", b"a", "text/plain")
            .await
            .unwrap();

        assert!(store.exists("users/alice/1-a.txt").await.unwrap());
        assert!(!store.exists("users/alice/2-b.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_traversal_keys_rejected() {
        let (store, _temp) = create_test_store();

        let result = store.get("users/alice/../bob/1-a.txt").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = store.put("users/alice/..", b"x", "text/plain").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = store.exists("users//1-a.txt").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_missing_object_not_found() {
        let (store, _temp) = create_test_store();

        let result = store.get("users/alice/1-missing.txt").await;
        assert!(matches!(result, Err(StorageError::ObjectNotFound(_))));
    }

    #[tokio::test]
    async fn test_signed_url_roundtrip() {
        let (store, _temp) = create_test_store();

        store
            .put("users/alice/1-a.txt", b"a", "text/plain")
            .await
            .unwrap();

        let signed = store
            .signed_get_url("users/alice/1-a.txt", Duration::hours(1))
            .await
            .unwrap();
        assert!(signed.url.contains("/objects/users/alice/1-a.txt?"));

        // Pull token and expiry back out of the URL and verify
        let query = signed.url.split('?').nth(1).unwrap();
        let token = query
            .split('&')
            .find_map(|p| p.strip_prefix("token="))
            .unwrap();

        assert!(store
            .verify_token("users/alice/1-a.txt", signed.expires_at.timestamp(), token)
            .is_ok());
        assert!(store
            .verify_token("users/bob/1-a.txt", signed.expires_at.timestamp(), token)
            .is_err());
    }

    #[tokio::test]
    async fn test_public_url() {
        let (store, _temp) = create_test_store();

        assert_eq!(
            store.public_url("users/alice/1-a.txt"),
            "http://localhost:4000/objects/users/alice/1-a.txt"
        );
    }
}
