//! # Stored Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one stored object.
///
/// The owner is encoded in the key's namespace prefix; objects are
/// immutable once written (no update-in-place).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredObject {
    /// Full object key, including the namespace prefix
    pub key: String,

    /// Size in bytes
    pub size: u64,

    /// When the object was written
    pub last_modified: DateTime<Utc>,

    /// MIME type recorded at upload
    pub content_type: String,
}

impl StoredObject {
    /// The stored name: the last segment of the key
    pub fn name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_last_segment() {
        let obj = StoredObject {
            key: "users/alice/1700000000000-notes.txt".to_string(),
            size: 12,
            last_modified: Utc::now(),
            content_type: "text/plain".to_string(),
        };

        assert_eq!(obj.name(), "1700000000000-notes.txt");
    }
}
