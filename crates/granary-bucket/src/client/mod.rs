//! Bucket client with configuration and credential management.
//!
//! This module provides the high-level interface for connecting to a single
//! bucket on an S3-compatible object store: client construction with
//! fail-fast bucket verification, endpoint/credential configuration with
//! validation, and secret resolution through a named-source capability so
//! credentials rotate without code changes.

mod bucket_client;
mod bucket_config;
mod bucket_credentials;
mod secret_source;

pub use bucket_client::BucketClient;
pub use bucket_config::BucketConfig;
pub use bucket_credentials::BucketCredentials;
pub use secret_source::{EnvSecrets, SecretSource};
