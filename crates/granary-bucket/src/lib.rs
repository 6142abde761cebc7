#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging
pub const TRACING_TARGET_CLIENT: &str = "granary_bucket::client";
pub const TRACING_TARGET_BACKEND: &str = "granary_bucket::backend";
pub const TRACING_TARGET_OBJECTS: &str = "granary_bucket::objects";

pub mod backend;
pub mod client;
pub mod types;

// Re-export for convenience
pub use crate::backend::{MemoryBackend, PageStream, S3Backend, StorageBackend};
pub use crate::client::{
    BucketClient, BucketConfig, BucketCredentials, EnvSecrets, SecretSource,
};
pub use crate::types::{ObjectInfo, ObjectKey, ObjectPage};

/// Error type for bucket connector operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum Error {
    /// Configuration error.
    ///
    /// This includes invalid configuration parameters, unresolvable secret
    /// names, malformed endpoint URLs, and empty bucket names.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection error.
    ///
    /// This covers authentication failures, network failures, timeouts, and
    /// a nonexistent or inaccessible bucket at construction time. The
    /// connector never retries these itself; they propagate to the caller
    /// immediately.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Object not found.
    ///
    /// This occurs when reading a key that does not exist in the bucket.
    /// A listing that matches no keys is a successful empty result, never
    /// this error.
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Invalid request or malformed data.
    ///
    /// This occurs when request parameters fail validation, such as an
    /// empty object key.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// I/O operation failed.
    ///
    /// This includes stream reading/writing failures while collecting
    /// object bodies.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns whether this error indicates a configuration issue.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Returns whether this error indicates a transport or access failure.
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection(_))
    }

    /// Returns whether this error indicates a missing object.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Returns whether a caller-supplied retry policy may reasonably retry
    /// the failed operation.
    ///
    /// The connector itself never retries; this only classifies the failure
    /// for callers that wrap operations in their own policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Connection(_) => true,
            Error::Io(_) => true,
            Error::Config(_) => false,
            Error::NotFound(_) => false,
            Error::InvalidRequest(_) => false,
        }
    }
}

/// Specialized [`Result`] type for bucket connector operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
