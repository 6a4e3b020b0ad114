//! # Auth Errors
//!
//! Error types for the authentication module.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and authorization errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // ==================
    // Credential Errors
    // ==================

    /// Unknown username or wrong password (generic - don't leak which)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username already registered
    #[error("Username already exists")]
    UsernameTaken,

    /// Username not usable as a namespace component
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    // ==================
    // Token Errors
    // ==================

    /// No bearer token in the request
    #[error("Missing authorization header")]
    MissingToken,

    /// Token is structurally invalid
    #[error("Malformed token")]
    MalformedToken,

    /// Token has passed its embedded expiry
    #[error("Token expired")]
    TokenExpired,

    /// Token signature does not verify
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token verified but the principal no longer exists
    #[error("Principal not found")]
    PrincipalNotFound,

    // ==================
    // Internal Errors
    // ==================

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Token signing failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,

    /// User store unavailable or erroring
    #[error("User store error: {0}")]
    Store(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            AuthError::InvalidCredentials => 400,
            AuthError::UsernameTaken => 400,
            AuthError::InvalidUsername(_) => 400,
            AuthError::WeakPassword(_) => 400,

            // 401 Unauthorized
            AuthError::MissingToken => 401,
            AuthError::MalformedToken => 401,
            AuthError::TokenExpired => 401,
            AuthError::InvalidSignature => 401,
            AuthError::PrincipalNotFound => 401,

            // 500 Internal Server Error
            AuthError::HashingFailed => 500,
            AuthError::TokenGenerationFailed => 500,
            AuthError::Store(_) => 500,
        }
    }

    /// Message safe to return to clients.
    ///
    /// All token-resolution failures collapse to one opaque string so a
    /// caller cannot tell an expired token from a tampered one or from
    /// a token whose principal was deleted out-of-band. Validation
    /// failures keep their detail.
    pub fn public_message(&self) -> String {
        match self {
            AuthError::MissingToken
            | AuthError::MalformedToken
            | AuthError::TokenExpired
            | AuthError::InvalidSignature
            | AuthError::PrincipalNotFound => "Invalid or expired token".to_string(),

            AuthError::HashingFailed | AuthError::TokenGenerationFailed | AuthError::Store(_) => {
                "Internal server error".to_string()
            }

            other => other.to_string(),
        }
    }

    /// Returns whether this error should be logged at warn level
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
