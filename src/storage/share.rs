//! # Share Links
//!
//! Ownership-checked issuance of time-limited signed URLs. The gateway
//! never proxies file bytes on this path; the link lets the client
//! fetch directly from the backend.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::backend::ObjectStore;
use super::errors::{StorageError, StorageResult};
use super::namespace::key_in_namespace;
use crate::auth::user::Principal;

/// A granted share link (ephemeral, never persisted)
#[derive(Debug, Clone, Serialize)]
pub struct ShareGrant {
    pub key: String,
    pub download_url: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues signed share links for objects the caller owns
pub struct ShareLinkIssuer {
    backend: Arc<dyn ObjectStore>,
    ttl: Duration,
}

impl ShareLinkIssuer {
    pub fn new(backend: Arc<dyn ObjectStore>, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    /// Issue a share link for `key` on behalf of `principal`.
    ///
    /// Any key outside the caller's namespace fails `Forbidden` before
    /// the backend is consulted, so the response is identical whether
    /// the foreign object exists or not. A missing object inside the
    /// caller's own namespace is a plain `ObjectNotFound`.
    pub async fn issue(&self, principal: &Principal, key: &str) -> StorageResult<ShareGrant> {
        if !key_in_namespace(key, &principal.username) {
            return Err(StorageError::Forbidden);
        }

        if !self.backend.exists(key).await? {
            return Err(StorageError::ObjectNotFound(key.to_string()));
        }

        let signed = self.backend.signed_get_url(key, self.ttl).await?;

        Ok(ShareGrant {
            key: key.to_string(),
            download_url: signed.url,
            expires_at: signed.expires_at,
        })
    }
}
