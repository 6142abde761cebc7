//! Object information structures for bucket storage.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Information about a stored object as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object key/path.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
    /// Last modified timestamp.
    pub last_modified: OffsetDateTime,
    /// ETag of the object.
    pub etag: Option<String>,
}

impl ObjectInfo {
    /// Creates a new ObjectInfo.
    pub fn new(key: impl Into<String>, size: u64, last_modified: OffsetDateTime) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified,
            etag: None,
        }
    }

    /// Sets the ETag.
    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_info_builder() {
        let info = ObjectInfo::new("prefix/test1.csv", 24, OffsetDateTime::UNIX_EPOCH)
            .with_etag("\"abc123\"");

        assert_eq!(info.key, "prefix/test1.csv");
        assert_eq!(info.size, 24);
        assert_eq!(info.etag.as_deref(), Some("\"abc123\""));
    }
}
