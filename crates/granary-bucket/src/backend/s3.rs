//! MinIO/S3-compatible storage backend.
//!
//! Wraps the `minio` crate client behind the [`StorageBackend`] capability
//! set. Works with AWS S3, MinIO, and any S3-compatible service.

use bytes::Bytes;
use futures::StreamExt;
use minio::s3::Client;
use minio::s3::creds::StaticProvider;
use minio::s3::segmented_bytes::SegmentedBytes;
use minio::s3::types::{S3Api, ToStream};
use time::OffsetDateTime;
use tracing::{debug, error, info};

use crate::client::BucketConfig;
use crate::types::{ObjectInfo, ObjectPage};
use crate::{Error, Result, TRACING_TARGET_BACKEND};

use super::store::{PageStream, StorageBackend};

/// S3-compatible backend over the `minio` crate client.
pub struct S3Backend {
    inner: Client,
}

impl S3Backend {
    /// Creates a new S3 backend from the provided configuration.
    ///
    /// This builds the SDK client but performs no network round trip;
    /// connectivity is verified when the bucket client binds to a bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is rejected by the SDK or the
    /// client cannot be constructed.
    pub fn new(config: &BucketConfig) -> Result<Self> {
        let provider = StaticProvider::from(config.credentials().clone());

        let endpoint_url = config.endpoint().to_string();
        let endpoint = endpoint_url.parse().map_err(|e| {
            error!(target: TRACING_TARGET_BACKEND, error = %e, "Invalid endpoint URL");
            Error::Config(format!("Invalid endpoint URL: {}", e))
        })?;

        let provider = Box::new(provider);
        let inner = Client::new(endpoint, Some(provider), None, None).map_err(|e| {
            error!(target: TRACING_TARGET_BACKEND, error = %e, "Failed to create S3 client");
            Error::Config(format!("Failed to build S3 client: {}", e))
        })?;

        info!(
            target: TRACING_TARGET_BACKEND,
            endpoint = %config.endpoint_masked(),
            secure = config.is_secure(),
            "S3 backend initialized"
        );

        Ok(Self { inner })
    }
}

/// Maps an SDK fault onto the connector's error taxonomy.
fn to_backend_error(op: &str, target: &str, err: minio::s3::error::Error) -> Error {
    classify_fault(op, target, &err.to_string())
}

/// MinIO surfaces missing keys inside S3 error responses; the response code
/// text is matched here rather than the SDK's error variants, which have
/// shifted between client versions.
fn classify_fault(op: &str, target: &str, text: &str) -> Error {
    if text.contains("NoSuchKey") {
        Error::NotFound(format!("{} {}: {}", op, target, text))
    } else {
        Error::Connection(format!("{} {}: {}", op, target, text))
    }
}

#[async_trait::async_trait]
impl StorageBackend for S3Backend {
    async fn verify_bucket(&self, bucket: &str) -> Result<()> {
        debug!(target: TRACING_TARGET_BACKEND, bucket = %bucket, "Verifying bucket");

        let response = self
            .inner
            .bucket_exists(bucket)
            .send()
            .await
            .map_err(|e| to_backend_error("bucket_exists", bucket, e))?;

        if !response.exists {
            return Err(Error::Connection(format!(
                "bucket '{}' does not exist or is not accessible",
                bucket
            )));
        }

        Ok(())
    }

    async fn list_pages(&self, bucket: &str, prefix: &str) -> Result<PageStream> {
        let mut request = self.inner.list_objects(bucket);

        if !prefix.is_empty() {
            request = request.prefix(Some(prefix.to_string()));
        }

        let prefix = prefix.to_string();
        let stream = request.to_stream().await;

        let pages = stream.map(move |result| {
            result
                .map(|response| {
                    let objects = response
                        .contents
                        .into_iter()
                        .map(|obj| {
                            let size = obj.size.unwrap_or(0) as u64;

                            let last_modified = obj
                                .last_modified
                                .and_then(|dt| {
                                    OffsetDateTime::from_unix_timestamp(dt.timestamp()).ok()
                                })
                                .unwrap_or_else(OffsetDateTime::now_utc);

                            let mut info = ObjectInfo::new(obj.name, size, last_modified);
                            if let Some(etag) = obj.etag {
                                info = info.with_etag(etag);
                            }
                            info
                        })
                        .collect();

                    ObjectPage::new(objects, response.is_truncated)
                })
                .map_err(|e| to_backend_error("list_objects", &prefix, e))
        });

        Ok(pages.boxed())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes> {
        let response = self
            .inner
            .get_object(bucket, key)
            .send()
            .await
            .map_err(|e| to_backend_error("get_object", key, e))?;

        let segmented = response
            .content
            .to_segmented_bytes()
            .await
            .map_err(Error::Io)?;

        Ok(segmented.to_bytes())
    }

    async fn put_object(&self, bucket: &str, key: &str, data: Bytes) -> Result<()> {
        let segmented = SegmentedBytes::from(data);

        self.inner
            .put_object(bucket, key, segmented)
            .send()
            .await
            .map_err(|e| to_backend_error("put_object", key, e))?;

        Ok(())
    }

    async fn delete_objects(&self, bucket: &str, keys: Vec<String>) -> Result<()> {
        use minio::s3::builders::ObjectToDelete;

        let objects_to_delete: Vec<ObjectToDelete> = keys
            .iter()
            .map(|key| ObjectToDelete::from(key.as_str()))
            .collect();

        self.inner
            .delete_objects::<&str, ObjectToDelete>(bucket, objects_to_delete)
            .send()
            .await
            .map_err(|e| to_backend_error("delete_objects", bucket, e))?;

        Ok(())
    }
}

impl std::fmt::Debug for S3Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Backend").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_classification() {
        let err = classify_fault(
            "get_object",
            "missing.csv",
            "S3 operation failed; code: NoSuchKey",
        );
        assert!(err.is_not_found());

        let err = classify_fault("list_objects", "prefix/", "connection refused");
        assert!(err.is_connection());
        assert!(err.to_string().contains("prefix/"));
    }
}
