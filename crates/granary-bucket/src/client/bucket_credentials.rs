//! Bucket authentication credentials.
//!
//! Credentials are immutable for a connector's lifetime and are never
//! logged: the access key is masked for debug output and the secret key is
//! never serialized.

use minio::s3::creds::StaticProvider;
use serde::{Deserialize, Serialize};

use super::secret_source::SecretSource;
use crate::Result;

/// Authentication credentials for an S3-compatible object store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketCredentials {
    /// Access key for authentication.
    pub access_key: String,

    /// Secret key for authentication.
    /// This field is sensitive and is never serialized.
    #[serde(skip_serializing)]
    pub secret_key: String,

    /// Optional session token for temporary credentials.
    pub session_token: Option<String>,
}

impl BucketCredentials {
    /// Creates new credentials from literal key values.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            session_token: None,
        }
    }

    /// Creates new credentials with a session token for temporary
    /// credentials (AWS STS or similar).
    pub fn with_session_token(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            session_token: Some(session_token.into()),
        }
    }

    /// Resolves credentials from secret *names* through the given source.
    ///
    /// The two name parameters identify entries in the source (environment
    /// variable names in production), not literal key material, so secrets
    /// can rotate without code changes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if either name cannot
    /// be resolved.
    pub fn from_source(
        source: &dyn SecretSource,
        access_key_name: &str,
        secret_key_name: &str,
    ) -> Result<Self> {
        let access_key = source.resolve(access_key_name)?;
        let secret_key = source.resolve(secret_key_name)?;
        Ok(Self::new(access_key, secret_key))
    }

    /// Returns the access key.
    #[inline]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Returns the secret key.
    #[inline]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Returns the session token if available.
    #[inline]
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// Returns a masked version of the access key for logging.
    ///
    /// This shows only the first 4 characters followed by asterisks.
    pub fn access_key_masked(&self) -> String {
        if self.access_key.len() <= 4 {
            "*".repeat(self.access_key.len())
        } else {
            format!("{}***", &self.access_key[..4])
        }
    }
}

impl From<BucketCredentials> for StaticProvider {
    fn from(credentials: BucketCredentials) -> Self {
        StaticProvider::new(
            &credentials.access_key,
            &credentials.secret_key,
            credentials.session_token.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_credentials_new() {
        let creds = BucketCredentials::new("access", "secret");
        assert_eq!(creds.access_key(), "access");
        assert_eq!(creds.secret_key(), "secret");
        assert!(creds.session_token().is_none());
    }

    #[test]
    fn test_credentials_with_session_token() {
        let creds = BucketCredentials::with_session_token("access", "secret", "token");
        assert_eq!(creds.session_token(), Some("token"));
    }

    #[test]
    fn test_credentials_masking() {
        let creds = BucketCredentials::new("AKIATEST12345", "secret");
        assert_eq!(creds.access_key_masked(), "AKIA***");

        let short_creds = BucketCredentials::new("ABC", "secret");
        assert_eq!(short_creds.access_key_masked(), "***");
    }

    #[test]
    fn test_credentials_from_source() {
        let mut source = HashMap::new();
        source.insert("STORE_ACCESS_KEY".to_string(), "KEY1".to_string());
        source.insert("STORE_SECRET_KEY".to_string(), "KEY2".to_string());

        let creds =
            BucketCredentials::from_source(&source, "STORE_ACCESS_KEY", "STORE_SECRET_KEY")
                .unwrap();
        assert_eq!(creds.access_key(), "KEY1");
        assert_eq!(creds.secret_key(), "KEY2");
    }

    #[test]
    fn test_credentials_from_source_missing_name() {
        let source: HashMap<String, String> = HashMap::new();

        let err = BucketCredentials::from_source(&source, "STORE_ACCESS_KEY", "STORE_SECRET_KEY")
            .unwrap_err();
        assert!(err.is_config());
    }
}
