//! Object key wrapper for bucket storage.
//!
//! Keys are opaque to the connector: hierarchical by slash convention but
//! never interpreted. The only structural requirement is that a key is
//! non-empty.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A string wrapper representing an object key within a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectKey {
    /// The actual key string used in the bucket.
    key: String,
}

impl ObjectKey {
    /// Creates a new ObjectKey from a string without validation.
    ///
    /// Use `from_str` for validation.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Consumes the ObjectKey and returns the inner string.
    pub fn into_string(self) -> String {
        self.key
    }

    /// Returns whether the key starts with the given prefix.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.key.starts_with(prefix)
    }

    /// Validates that the key is structurally usable.
    pub fn validate(&self) -> Result<()> {
        if self.key.is_empty() {
            return Err(Error::InvalidRequest(
                "Object key cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl FromStr for ObjectKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = ObjectKey::new(s);
        key.validate()?;
        Ok(key)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl From<ObjectKey> for String {
    fn from(value: ObjectKey) -> Self {
        value.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_accessors() {
        let key = ObjectKey::new("2022-01/report.csv");
        assert_eq!(key.as_str(), "2022-01/report.csv");
        assert_eq!(key.to_string(), "2022-01/report.csv");
        assert_eq!(key.clone().into_string(), "2022-01/report.csv");
        assert_eq!(key.as_ref(), "2022-01/report.csv");
    }

    #[test]
    fn test_object_key_prefix_matching() {
        let key = ObjectKey::new("2022-01/report.csv");
        assert!(key.starts_with("2022-01/"));
        assert!(key.starts_with(""));
        assert!(!key.starts_with("2022-02/"));
    }

    #[test]
    fn test_object_key_from_str() {
        let key = ObjectKey::from_str("prefix/test1.csv").unwrap();
        assert_eq!(key.as_str(), "prefix/test1.csv");

        assert!(ObjectKey::from_str("").is_err());
    }

    #[test]
    fn test_object_key_validation() {
        assert!(ObjectKey::new("a").validate().is_ok());
        assert!(ObjectKey::new("").validate().is_err());
    }
}
