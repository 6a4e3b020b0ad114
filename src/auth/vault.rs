//! # Credential Vault
//!
//! Registration and credential verification over a `UserStore`.
//! Plaintext passwords never survive past these calls.

use std::sync::Arc;

use super::crypto::{self, PasswordPolicy};
use super::errors::{AuthError, AuthResult};
use super::user::{User, UserStore};
use crate::storage::namespace;

/// Registers users and verifies login credentials
pub struct CredentialVault {
    users: Arc<dyn UserStore>,
    policy: PasswordPolicy,
}

impl CredentialVault {
    pub fn new(users: Arc<dyn UserStore>, policy: PasswordPolicy) -> Self {
        Self { users, policy }
    }

    /// Register a new user.
    ///
    /// The username must be usable as a namespace component (no
    /// delimiter, see `storage::namespace`). Uniqueness is enforced by
    /// the store's insert, so no partial record is left on failure.
    pub async fn register(&self, username: &str, password: &str) -> AuthResult<User> {
        namespace::validate_username(username).map_err(AuthError::InvalidUsername)?;

        let user = User::new(username.to_string(), password, &self.policy)?;
        self.users.insert(&user).await?;

        Ok(user)
    }

    /// Verify login credentials.
    ///
    /// Unknown username and wrong password return the same error; the
    /// unknown-username path still runs one Argon2 verification against
    /// a dummy hash so the two are not separable by response time.
    pub async fn verify(&self, username: &str, password: &str) -> AuthResult<User> {
        match self.users.find_by_username(username).await? {
            Some(user) => {
                if user.verify_password(password)? {
                    Ok(user)
                } else {
                    Err(AuthError::InvalidCredentials)
                }
            }
            None => {
                let _ = crypto::verify_password(password, crypto::DUMMY_HASH);
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}
