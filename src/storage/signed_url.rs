//! # Signed URL Generation
//!
//! Keyed-hash tokens binding an object key to an expiry timestamp.
//! Used by `LocalStore` to mint and verify its direct-access links.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::errors::{StorageError, StorageResult};

/// Signed URL generator
#[derive(Debug, Clone)]
pub struct SignedUrlGenerator {
    secret: Vec<u8>,
}

impl SignedUrlGenerator {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            secret: secret.to_vec(),
        }
    }

    /// Sign a key with an expiry of now + ttl
    pub fn generate(&self, key: &str, ttl: Duration) -> SignedUrl {
        let expires_at = Utc::now() + ttl;
        let token = self.sign(key, expires_at.timestamp());

        SignedUrl {
            key: key.to_string(),
            expires_at,
            token,
        }
    }

    /// Verify a presented token against a key and expiry timestamp
    pub fn verify(&self, key: &str, expires: i64, token: &str) -> StorageResult<()> {
        if Utc::now().timestamp() > expires {
            return Err(StorageError::UrlExpired);
        }

        let expected = self.sign(key, expires);
        if !bool::from(expected.as_bytes().ct_eq(token.as_bytes())) {
            return Err(StorageError::InvalidSignature);
        }

        Ok(())
    }

    fn sign(&self, key: &str, expires: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.secret);
        hasher.update(key.as_bytes());
        hasher.update(b"\n");
        hasher.update(expires.to_string().as_bytes());
        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }
}

/// A signed URL's parts
#[derive(Debug, Clone)]
pub struct SignedUrl {
    pub key: String,
    pub expires_at: DateTime<Utc>,
    pub token: String,
}

impl SignedUrl {
    /// Render the full URL against a base
    pub fn to_url(&self, base_url: &str) -> String {
        format!(
            "{}/objects/{}?token={}&expires={}",
            base_url,
            self.key,
            self.token,
            self.expires_at.timestamp()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_verify() {
        let generator = SignedUrlGenerator::new(b"test-secret");

        let signed = generator.generate("users/alice/1-notes.txt", Duration::hours(1));
        assert!(!signed.token.is_empty());

        assert!(generator
            .verify(&signed.key, signed.expires_at.timestamp(), &signed.token)
            .is_ok());
    }

    #[test]
    fn test_expired_url() {
        let generator = SignedUrlGenerator::new(b"test-secret");

        let expired_at = (Utc::now() - Duration::hours(1)).timestamp();
        let result = generator.verify("users/alice/1-notes.txt", expired_at, "whatever");
        assert!(matches!(result, Err(StorageError::UrlExpired)));
    }

    #[test]
    fn test_tampered_token() {
        let generator = SignedUrlGenerator::new(b"test-secret");

        let signed = generator.generate("users/alice/1-notes.txt", Duration::hours(1));
        let result = generator.verify(
            &signed.key,
            signed.expires_at.timestamp(),
            "bad-signature",
        );
        assert!(matches!(result, Err(StorageError::InvalidSignature)));
    }

    #[test]
    fn test_token_bound_to_key() {
        let generator = SignedUrlGenerator::new(b"test-secret");

        let signed = generator.generate("users/alice/1-notes.txt", Duration::hours(1));
        let result = generator.verify(
            "users/bob/1-notes.txt",
            signed.expires_at.timestamp(),
            &signed.token,
        );
        assert!(matches!(result, Err(StorageError::InvalidSignature)));
    }

    #[test]
    fn test_token_bound_to_expiry() {
        let generator = SignedUrlGenerator::new(b"test-secret");

        // Extending the expiry invalidates the signature
        let signed = generator.generate("users/alice/1-notes.txt", Duration::hours(1));
        let result = generator.verify(
            &signed.key,
            signed.expires_at.timestamp() + 3600,
            &signed.token,
        );
        assert!(matches!(result, Err(StorageError::InvalidSignature)));
    }

    #[test]
    fn test_to_url() {
        let generator = SignedUrlGenerator::new(b"secret");
        let signed = generator.generate("users/alice/1-notes.txt", Duration::hours(1));

        let url = signed.to_url("http://localhost:4000");
        assert!(url.starts_with("http://localhost:4000/objects/users/alice/1-notes.txt?"));
        assert!(url.contains("token="));
        assert!(url.contains("expires="));
    }
}
