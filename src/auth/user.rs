//! # Users & Principals
//!
//! User model and the `UserStore` collaborator interface. In
//! production the store is a relational database; the in-memory
//! implementation ships for development and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{hash_password, verify_password, PasswordPolicy};
use super::errors::{AuthError, AuthResult};

/// A verified identity: what the resolver hands to downstream handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
}

/// Stored user record.
///
/// Carries the credential (Argon2id hash) one-to-one with the
/// principal; the hash is never serialized to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Unique username, immutable after creation
    pub username: String,

    /// Argon2id password hash (never plaintext)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the given username and password
    pub fn new(username: String, password: &str, policy: &PasswordPolicy) -> AuthResult<Self> {
        policy.validate(password)?;

        let password_hash = hash_password(password)?;

        Ok(Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            created_at: Utc::now(),
        })
    }

    /// Verify a password against this user's stored hash
    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        verify_password(password, &self.password_hash)
    }

    /// The identity this record represents
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// User store collaborator interface.
///
/// Lookups and insertion only; usernames are immutable and there is no
/// deletion path in scope.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by their username
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>>;

    /// Find a user by their ID
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>>;

    /// Insert a new user; fails with `UsernameTaken` on duplicates
    async fn insert(&self, user: &User) -> AuthResult<()>;
}

/// In-memory user store for development and testing
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: std::sync::RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::Store("lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::Store("lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: &User) -> AuthResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AuthError::Store("lock poisoned".to_string()))?;

        // Uniqueness check and insert under one write lock, so a failed
        // registration leaves no partial record
        if users.iter().any(|u| u.username == user.username) {
            return Err(AuthError::UsernameTaken);
        }

        users.push(user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_policy() -> PasswordPolicy {
        PasswordPolicy::default()
    }

    #[test]
    fn test_user_creation() {
        let user = User::new("alice".to_string(), "password123", &default_policy()).unwrap();

        assert_eq!(user.username, "alice");
        assert!(!user.password_hash.is_empty());
        assert_ne!(user.password_hash, "password123"); // Not plaintext!
    }

    #[test]
    fn test_password_verification() {
        let user = User::new("alice".to_string(), "password123", &default_policy()).unwrap();

        assert!(user.verify_password("password123").unwrap());
        assert!(!user.verify_password("wrong_password").unwrap());
    }

    #[test]
    fn test_weak_password_rejected() {
        let result = User::new("alice".to_string(), "short", &default_policy());
        assert!(matches!(result, Err(AuthError::WeakPassword(_))));
    }

    #[test]
    fn test_principal_projection() {
        let user = User::new("alice".to_string(), "password123", &default_policy()).unwrap();
        let principal = user.principal();

        assert_eq!(principal.id, user.id);
        assert_eq!(principal.username, "alice");
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryUserStore::new();

        let user = User::new("alice".to_string(), "password123", &default_policy()).unwrap();
        let user_id = user.id;
        store.insert(&user).await.unwrap();

        let found = store.find_by_id(user_id).await.unwrap();
        assert_eq!(found.unwrap().username, "alice");

        let found = store.find_by_username("alice").await.unwrap();
        assert!(found.is_some());

        assert!(store.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = InMemoryUserStore::new();

        let first = User::new("alice".to_string(), "password123", &default_policy()).unwrap();
        store.insert(&first).await.unwrap();

        let second = User::new("alice".to_string(), "password456", &default_policy()).unwrap();
        let result = store.insert(&second).await;
        assert!(matches!(result, Err(AuthError::UsernameTaken)));

        // The failed insert left nothing behind: only the original record
        // resolves, and it still holds the original credential
        let stored = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored.id, first.id);
        assert!(stored.verify_password("password123").unwrap());
    }

    #[test]
    fn test_user_serialization_omits_password() {
        let user = User::new("alice".to_string(), "password123", &default_policy()).unwrap();

        let json = serde_json::to_string(&user).unwrap();

        assert!(!json.contains("password_hash"));
        assert!(!json.contains(&user.password_hash));
    }
}
