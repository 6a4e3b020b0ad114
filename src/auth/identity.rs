//! # Identity Resolution
//!
//! The gate between raw requests and verified principals: extracts the
//! bearer token, verifies it, and resolves the embedded principal ID
//! against the user store.
//!
//! Stateless by design - nothing is mutated, so the gateway scales
//! horizontally without shared session storage.

use std::sync::Arc;

use super::errors::{AuthError, AuthResult};
use super::token::TokenService;
use super::user::{Principal, UserStore};

/// Resolves `Authorization` headers to verified principals
#[derive(Clone)]
pub struct IdentityResolver {
    tokens: TokenService,
    users: Arc<dyn UserStore>,
}

impl IdentityResolver {
    pub fn new(tokens: TokenService, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, users }
    }

    /// Resolve a raw `Authorization` header value to a principal.
    ///
    /// A verified token whose principal no longer exists fails with
    /// `PrincipalNotFound` rather than a generic rejection; callers map
    /// both to an opaque 401 but the distinction shows up in logs.
    pub async fn resolve(&self, authorization: Option<&str>) -> AuthResult<Principal> {
        let token = bearer_token(authorization)?;
        let principal_id = self.tokens.verify(token)?;

        let user = self
            .users
            .find_by_id(principal_id)
            .await?
            .ok_or(AuthError::PrincipalNotFound)?;

        Ok(user.principal())
    }
}

/// Extract the token from a `Bearer <token>` header value
fn bearer_token(authorization: Option<&str>) -> AuthResult<&str> {
    let header = authorization.ok_or(AuthError::MissingToken)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedToken)?;

    if token.is_empty() {
        return Err(AuthError::MalformedToken);
    }

    Ok(token)
}
