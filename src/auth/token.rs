//! # Session Tokens
//!
//! Signed, expiring identity tokens (JWT, HS256). Validation is
//! stateless: signature check plus expiry comparison, no server-side
//! session table.
//!
//! Clock-skew tolerance is zero: `leeway` is set to 0, so no token is
//! accepted past its embedded expiry.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{AuthError, AuthResult};

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (principal ID)
    pub sub: String,

    /// Issued at timestamp (Unix epoch seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds)
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

/// Session token configuration
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Secret key for signing (256-bit minimum recommended)
    pub secret: String,

    /// Token lifetime
    pub ttl: Duration,

    /// Issuer identifier
    pub issuer: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: "CHANGE_THIS_SECRET_IN_PRODUCTION".to_string(),
            ttl: Duration::hours(1),
            issuer: "cubby".to_string(),
        }
    }
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a new token service with the given configuration
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for a principal, expiring at now + TTL
    pub fn issue(&self, principal_id: Uuid) -> AuthResult<String> {
        let now = Utc::now();
        let exp = now + self.config.ttl;

        let claims = TokenClaims {
            sub: principal_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenGenerationFailed)
    }

    /// Verify a token and extract the principal ID it was issued to
    ///
    /// Signature mismatch yields `InvalidSignature`, a past expiry
    /// yields `TokenExpired`; both are terminal (no refresh flow).
    pub fn verify(&self, token: &str) -> AuthResult<Uuid> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.leeway = 0;

        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AuthError::InvalidSignature
                    }
                    _ => AuthError::MalformedToken,
                }
            })?;

        Uuid::parse_str(&token_data.claims.sub).map_err(|_| AuthError::MalformedToken)
    }

    /// Expiration time a token issued now would carry
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc::now() + self.config.ttl
    }
}
