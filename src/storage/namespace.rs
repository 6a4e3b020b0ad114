//! # Namespace Derivation
//!
//! The pure mapping from a username to its key-space prefix, and the
//! validation that keeps that mapping collision-free.
//!
//! `namespace` always ends with the delimiter, so for any two distinct
//! delimiter-free usernames neither prefix is a prefix of the other:
//! `users/a/` does not prefix `users/ab/`. Usernames containing the
//! delimiter are rejected at registration, which is what makes the
//! argument hold.

use super::errors::{StorageError, StorageResult};

/// Key-space delimiter; usernames and filenames must not contain it
pub const DELIMITER: char = '/';

/// Top-level prefix all per-user namespaces live under
pub const ROOT_PREFIX: &str = "users";

const MAX_USERNAME_BYTES: usize = 64;

/// Derive the namespace prefix for a username
pub fn namespace(username: &str) -> String {
    format!("{}{}{}{}", ROOT_PREFIX, DELIMITER, username, DELIMITER)
}

/// Whether a key lies strictly inside a username's namespace
pub fn key_in_namespace(key: &str, username: &str) -> bool {
    let prefix = namespace(username);
    key.len() > prefix.len() && key.starts_with(&prefix)
}

/// Build the full key for an uploaded file
pub fn object_key(username: &str, suffix: i64, filename: &str) -> String {
    format!("{}{}-{}", namespace(username), suffix, filename)
}

/// Validate a username for use as a namespace component.
///
/// Returns the rejection reason; the caller wraps it in its own error
/// type.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("username must not be empty".to_string());
    }
    if username.len() > MAX_USERNAME_BYTES {
        return Err(format!(
            "username must be at most {} bytes",
            MAX_USERNAME_BYTES
        ));
    }
    if username.contains(DELIMITER) || username.contains('\\') {
        return Err(format!("username must not contain '{}'", DELIMITER));
    }
    if username == "." || username == ".." {
        return Err("username must not be a relative path component".to_string());
    }
    if username
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err("username must not contain whitespace or control characters".to_string());
    }
    Ok(())
}

/// Validate an uploaded filename before it becomes part of a key
pub fn validate_filename(filename: &str) -> StorageResult<()> {
    if filename.is_empty() {
        return Err(StorageError::InvalidFilename(
            "filename must not be empty".to_string(),
        ));
    }
    if filename.contains(DELIMITER) || filename.contains('\\') {
        return Err(StorageError::InvalidFilename(format!(
            "filename must not contain '{}'",
            DELIMITER
        )));
    }
    if filename == "." || filename == ".." {
        return Err(StorageError::InvalidFilename(
            "filename must not be a relative path component".to_string(),
        ));
    }
    if filename.chars().any(|c| c.is_control()) {
        return Err(StorageError::InvalidFilename(
            "filename must not contain control characters".to_string(),
        ));
    }
    Ok(())
}
