//! # Storage Errors

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage and share-link errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    // Authorization errors
    #[error("Forbidden")]
    Forbidden,

    // Object errors
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    // Validation errors
    #[error("No file uploaded")]
    NoFile,

    #[error("Invalid multipart body: {0}")]
    InvalidMultipart(String),

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("File too large: {0} bytes (max: {1})")]
    FileTooLarge(u64, u64),

    // Signed URL errors
    #[error("URL expired")]
    UrlExpired,

    #[error("Invalid signature")]
    InvalidSignature,

    // Collaborator errors
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            StorageError::NoFile => 400,
            StorageError::InvalidMultipart(_) => 400,
            StorageError::InvalidFilename(_) => 400,
            StorageError::InvalidKey(_) => 400,
            StorageError::Forbidden => 403,
            StorageError::UrlExpired => 403,
            StorageError::InvalidSignature => 403,
            StorageError::ObjectNotFound(_) => 404,
            StorageError::FileTooLarge(_, _) => 413,
            StorageError::Io(_) => 500,
            StorageError::Backend(_) => 500,
        }
    }

    /// Message safe to return to clients.
    ///
    /// Authorization failures carry no detail (nothing about whether
    /// the target exists), expired and tampered links read the same,
    /// and collaborator failures are opaque; validation failures keep
    /// their detail.
    pub fn public_message(&self) -> String {
        match self {
            StorageError::Forbidden => "Forbidden".to_string(),
            StorageError::ObjectNotFound(_) => "Object not found".to_string(),
            StorageError::UrlExpired | StorageError::InvalidSignature => {
                "Invalid or expired link".to_string()
            }
            StorageError::Io(_) | StorageError::Backend(_) => {
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
