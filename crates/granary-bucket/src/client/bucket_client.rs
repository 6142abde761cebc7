//! High-level bucket client implementation.
//!
//! A client is bound to exactly one bucket and one credential set for its
//! entire lifetime; rebinding means constructing a new client. Construction
//! verifies the bucket and fails fast with a connection error if it does not
//! exist or is inaccessible.

use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use tracing::{debug, error, info, instrument, warn};

use crate::backend::{S3Backend, StorageBackend};
use crate::types::ObjectKey;
use crate::{BucketConfig, Result, TRACING_TARGET_CLIENT, TRACING_TARGET_OBJECTS};

/// Client bound to a single bucket on an object storage backend.
///
/// Holds no mutable state beyond the immutable backend handle, so it is safe
/// to share and invoke concurrently; every call is independent. All
/// operations perform network I/O and suspend the calling task for the
/// duration of the round trips involved.
#[derive(Clone)]
pub struct BucketClient {
    backend: Arc<dyn StorageBackend>,
    bucket: String,
}

impl BucketClient {
    /// Connects to the configured endpoint and binds to the configured
    /// bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - The backend client cannot be constructed
    /// - The bucket does not exist or is not accessible
    #[instrument(skip(config), target = TRACING_TARGET_CLIENT, fields(endpoint = %config.endpoint_masked(), bucket = %config.bucket()))]
    pub async fn connect(config: BucketConfig) -> Result<Self> {
        info!(target: TRACING_TARGET_CLIENT, "Initializing bucket client");

        config.validate().map_err(|e| {
            error!(target: TRACING_TARGET_CLIENT, error = %e, "Configuration validation failed");
            e
        })?;

        let backend = S3Backend::new(&config)?;
        Self::with_backend(Arc::new(backend), config.bucket).await
    }

    /// Binds to `bucket` through an already constructed backend.
    ///
    /// This is the seam the in-memory test backend plugs into; the contract
    /// is identical to [`connect`](Self::connect): the bucket is verified
    /// before the client is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`](crate::Error::Connection) if the bucket
    /// does not exist or is not accessible.
    #[instrument(skip(backend, bucket), target = TRACING_TARGET_CLIENT)]
    pub async fn with_backend(
        backend: Arc<dyn StorageBackend>,
        bucket: impl Into<String>,
    ) -> Result<Self> {
        let bucket = bucket.into();

        debug!(target: TRACING_TARGET_CLIENT, bucket = %bucket, "Verifying bucket binding");

        let start = std::time::Instant::now();
        backend.verify_bucket(&bucket).await.map_err(|e| {
            error!(
                target: TRACING_TARGET_CLIENT,
                bucket = %bucket,
                error = %e,
                elapsed = ?start.elapsed(),
                "Bucket verification failed"
            );
            e
        })?;

        info!(
            target: TRACING_TARGET_CLIENT,
            bucket = %bucket,
            elapsed = ?start.elapsed(),
            "Bucket client connected"
        );

        Ok(Self { backend, bucket })
    }

    /// Returns the name of the bucket this client is bound to.
    #[inline]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Lists every object key in the bucket that starts with `prefix`.
    ///
    /// An empty prefix lists the whole bucket. The backend returns large
    /// listings in bounded-size pages; every page is drained into one
    /// sequence, in backend-reported order. A prefix matching no keys
    /// returns an empty sequence, never an error.
    ///
    /// # Errors
    ///
    /// Returns an error if any listing round trip fails.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(bucket = %self.bucket))]
    pub async fn list_objects_in_prefix(&self, prefix: &str) -> Result<Vec<ObjectKey>> {
        debug!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %self.bucket,
            prefix = %prefix,
            "Listing objects"
        );

        let start = std::time::Instant::now();

        let mut stream = self
            .backend
            .list_pages(&self.bucket, prefix)
            .await
            .map_err(|e| {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %self.bucket,
                    prefix = %prefix,
                    error = %e,
                    "Failed to start listing"
                );
                e
            })?;

        let mut keys = Vec::new();
        let mut pages = 0usize;

        while let Some(page) = stream.next().await {
            let page = page.map_err(|e| {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %self.bucket,
                    prefix = %prefix,
                    pages = %pages,
                    error = %e,
                    "Failed to list objects"
                );
                e
            })?;

            pages += 1;
            keys.extend(page.objects.into_iter().map(|o| ObjectKey::new(o.key)));
        }

        info!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %self.bucket,
            prefix = %prefix,
            count = keys.len(),
            pages = %pages,
            elapsed = ?start.elapsed(),
            "Objects listed successfully"
        );

        Ok(keys)
    }

    /// Reads the full body of the object stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if the key does
    /// not exist, or a connection error if the transfer fails.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(bucket = %self.bucket, key = %key))]
    pub async fn read_object(&self, key: &str) -> Result<Bytes> {
        debug!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %self.bucket,
            key = %key,
            "Reading object"
        );

        let start = std::time::Instant::now();
        let result = self.backend.get_object(&self.bucket, key).await;
        let elapsed = start.elapsed();

        match result {
            Ok(data) => {
                info!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %self.bucket,
                    key = %key,
                    size = data.len(),
                    elapsed = ?elapsed,
                    "Object read successfully"
                );
                Ok(data)
            }
            Err(e) => {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %self.bucket,
                    key = %key,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to read object"
                );
                Err(e)
            }
        }
    }

    /// Writes `data` under `key`, overwriting any existing object
    /// (last-write-wins, as reported by the backend).
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    #[instrument(skip(self, data), target = TRACING_TARGET_OBJECTS, fields(bucket = %self.bucket, key = %key, size = data.len()))]
    pub async fn write_object(&self, key: &str, data: Bytes) -> Result<()> {
        let size = data.len();

        debug!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %self.bucket,
            key = %key,
            size = %size,
            "Writing object"
        );

        let start = std::time::Instant::now();
        let result = self.backend.put_object(&self.bucket, key, data).await;
        let elapsed = start.elapsed();

        match result {
            Ok(()) => {
                info!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %self.bucket,
                    key = %key,
                    size = %size,
                    elapsed = ?elapsed,
                    "Object written successfully"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %self.bucket,
                    key = %key,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to write object"
                );
                Err(e)
            }
        }
    }

    /// Deletes the given keys in one batch.
    ///
    /// An empty key list is a no-op. Keys that do not exist are ignored,
    /// matching S3 semantics.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch deletion fails.
    #[instrument(skip(self, keys), target = TRACING_TARGET_OBJECTS, fields(bucket = %self.bucket, count = keys.len()))]
    pub async fn delete_objects(&self, keys: Vec<String>) -> Result<()> {
        if keys.is_empty() {
            warn!(
                target: TRACING_TARGET_OBJECTS,
                bucket = %self.bucket,
                "No keys provided for batch deletion"
            );
            return Ok(());
        }

        let count = keys.len();
        let start = std::time::Instant::now();

        self.backend
            .delete_objects(&self.bucket, keys)
            .await
            .map_err(|e| {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %self.bucket,
                    count = %count,
                    error = %e,
                    "Failed to delete objects"
                );
                e
            })?;

        info!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %self.bucket,
            count = %count,
            elapsed = ?start.elapsed(),
            "Objects deleted successfully"
        );

        Ok(())
    }
}

impl std::fmt::Debug for BucketClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketClient")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::MemoryBackend;

    use super::*;

    const CSV_BODY: &str = "col1, col2\nvalA, valB";

    async fn seeded_client(keys: &[&str]) -> BucketClient {
        let backend = MemoryBackend::new();
        backend.create_bucket("report-archive").await;
        for key in keys {
            backend
                .put_object("report-archive", key, Bytes::from(CSV_BODY))
                .await
                .unwrap();
        }
        BucketClient::with_backend(Arc::new(backend), "report-archive")
            .await
            .unwrap()
    }

    fn key_strings(keys: &[ObjectKey]) -> Vec<&str> {
        keys.iter().map(ObjectKey::as_str).collect()
    }

    #[tokio::test]
    async fn test_list_objects_in_prefix() {
        let client = seeded_client(&[
            "prefix/test1.csv",
            "prefix/test2.csv",
            "other/test3.csv",
        ])
        .await;

        let keys = client.list_objects_in_prefix("prefix/").await.unwrap();

        assert_eq!(keys.len(), 2);
        assert!(key_strings(&keys).contains(&"prefix/test1.csv"));
        assert!(key_strings(&keys).contains(&"prefix/test2.csv"));
    }

    #[tokio::test]
    async fn test_list_objects_wrong_prefix_is_empty_not_error() {
        let client = seeded_client(&["prefix/test1.csv", "prefix/test2.csv"]).await;

        let keys = client.list_objects_in_prefix("doesnotexist/").await.unwrap();

        assert!(keys.is_empty());
    }

    #[tokio::test]
    async fn test_list_objects_empty_prefix_lists_whole_bucket() {
        let client = seeded_client(&["a/1.csv", "b/2.csv", "c/3.csv"]).await;

        let keys = client.list_objects_in_prefix("").await.unwrap();

        assert_eq!(keys.len(), 3);
    }

    #[tokio::test]
    async fn test_listing_spans_multiple_backend_pages() {
        let backend = MemoryBackend::new().with_page_size(2);
        backend.create_bucket("report-archive").await;
        let expected: Vec<String> = (0..7).map(|i| format!("pages/part-{i}.csv")).collect();
        for key in &expected {
            backend
                .put_object("report-archive", key, Bytes::from(CSV_BODY))
                .await
                .unwrap();
        }
        let client = BucketClient::with_backend(Arc::new(backend), "report-archive")
            .await
            .unwrap();

        let keys = client.list_objects_in_prefix("pages/").await.unwrap();

        assert_eq!(keys.len(), expected.len());
        for key in &expected {
            assert!(key_strings(&keys).contains(&key.as_str()));
        }
    }

    #[tokio::test]
    async fn test_listing_is_idempotent() {
        let client = seeded_client(&["prefix/test1.csv", "prefix/test2.csv"]).await;

        let first = client.list_objects_in_prefix("prefix/").await.unwrap();
        let second = client.list_objects_in_prefix("prefix/").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_connect_fails_fast_on_missing_bucket() {
        let backend = MemoryBackend::new();
        backend.create_bucket("report-archive").await;

        let result = BucketClient::with_backend(Arc::new(backend), "no-such-bucket").await;

        assert!(result.unwrap_err().is_connection());
    }

    #[tokio::test]
    async fn test_read_write_roundtrip() {
        let client = seeded_client(&[]).await;

        client
            .write_object("prefix/report.csv", Bytes::from(CSV_BODY))
            .await
            .unwrap();

        let body = client.read_object("prefix/report.csv").await.unwrap();
        assert_eq!(body, Bytes::from(CSV_BODY));
    }

    #[tokio::test]
    async fn test_read_missing_object() {
        let client = seeded_client(&[]).await;

        let err = client.read_object("prefix/missing.csv").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_objects() {
        let client = seeded_client(&["prefix/test1.csv", "prefix/test2.csv"]).await;

        client
            .delete_objects(vec![
                "prefix/test1.csv".to_string(),
                "prefix/test2.csv".to_string(),
            ])
            .await
            .unwrap();

        let keys = client.list_objects_in_prefix("prefix/").await.unwrap();
        assert!(keys.is_empty());
    }

    #[tokio::test]
    async fn test_delete_objects_empty_list_is_noop() {
        let client = seeded_client(&["prefix/test1.csv"]).await;

        client.delete_objects(Vec::new()).await.unwrap();

        let keys = client.list_objects_in_prefix("prefix/").await.unwrap();
        assert_eq!(keys.len(), 1);
    }

    // Mirrors the connector's primary production scenario end to end:
    // seed two CSV objects, list them by prefix, then show the unmatched
    // prefix comes back empty.
    #[tokio::test]
    async fn test_end_to_end_prefix_listing_scenario() {
        let client = seeded_client(&[]).await;

        client
            .write_object("prefix/test1.csv", Bytes::from(CSV_BODY))
            .await
            .unwrap();
        client
            .write_object("prefix/test2.csv", Bytes::from(CSV_BODY))
            .await
            .unwrap();

        let keys = client.list_objects_in_prefix("prefix/").await.unwrap();
        assert_eq!(keys.len(), 2);
        assert!(key_strings(&keys).contains(&"prefix/test1.csv"));
        assert!(key_strings(&keys).contains(&"prefix/test2.csv"));

        let keys = client.list_objects_in_prefix("doesnotexist/").await.unwrap();
        assert!(keys.is_empty());

        client
            .delete_objects(vec![
                "prefix/test1.csv".to_string(),
                "prefix/test2.csv".to_string(),
            ])
            .await
            .unwrap();
    }
}
