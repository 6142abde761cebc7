//! Paged in-memory storage backend.
//!
//! Serves as the test harness boundary: connector behavior can be validated
//! without a network dependency. The backend paginates its listings at a
//! configurable page size so pagination handling in the client is exercised
//! the same way a real backend would exercise it.

use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;
use futures::StreamExt;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::debug;

use crate::types::{ObjectInfo, ObjectPage};
use crate::{Error, Result, TRACING_TARGET_BACKEND};

use super::store::{PageStream, StorageBackend};

/// Default listing page size, matching the common S3 limit.
const DEFAULT_PAGE_SIZE: usize = 1000;

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    last_modified: OffsetDateTime,
}

/// In-memory object store with paged listings.
///
/// Keys iterate in lexicographic order within a bucket. Buckets must be
/// created explicitly before use; operations against an unknown bucket fail
/// with [`Error::Connection`], mirroring a real backend.
#[derive(Debug)]
pub struct MemoryBackend {
    buckets: RwLock<HashMap<String, BTreeMap<String, StoredObject>>>,
    page_size: usize,
}

impl MemoryBackend {
    /// Creates an empty backend with the default page size.
    pub fn new() -> Self {
        Self {
            buckets: RwLock::new(HashMap::new()),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the listing page size.
    ///
    /// Small sizes force multi-page listings so tests can exercise the
    /// client's page-draining loop.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Creates a bucket. Creating an existing bucket is a no-op.
    pub async fn create_bucket(&self, bucket: impl Into<String>) {
        let mut buckets = self.buckets.write().await;
        buckets.entry(bucket.into()).or_default();
    }

    /// Returns the number of objects currently stored in `bucket`.
    pub async fn object_count(&self, bucket: &str) -> usize {
        let buckets = self.buckets.read().await;
        buckets.get(bucket).map_or(0, BTreeMap::len)
    }

    fn unknown_bucket(bucket: &str) -> Error {
        Error::Connection(format!(
            "bucket '{}' does not exist or is not accessible",
            bucket
        ))
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StorageBackend for MemoryBackend {
    async fn verify_bucket(&self, bucket: &str) -> Result<()> {
        let buckets = self.buckets.read().await;
        if buckets.contains_key(bucket) {
            Ok(())
        } else {
            Err(Self::unknown_bucket(bucket))
        }
    }

    async fn list_pages(&self, bucket: &str, prefix: &str) -> Result<PageStream> {
        let buckets = self.buckets.read().await;
        let objects = buckets.get(bucket).ok_or_else(|| Self::unknown_bucket(bucket))?;

        let matching: Vec<ObjectInfo> = objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, stored)| {
                ObjectInfo::new(key.clone(), stored.data.len() as u64, stored.last_modified)
            })
            .collect();

        debug!(
            target: TRACING_TARGET_BACKEND,
            bucket = %bucket,
            prefix = %prefix,
            count = matching.len(),
            page_size = self.page_size,
            "Enumerating in-memory objects"
        );

        let page_count = matching.len().div_ceil(self.page_size).max(1);
        let pages: Vec<Result<ObjectPage>> = matching
            .chunks(self.page_size)
            .enumerate()
            .map(|(index, chunk)| {
                Ok(ObjectPage::new(chunk.to_vec(), index + 1 < page_count))
            })
            .collect();

        Ok(futures::stream::iter(pages).boxed())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes> {
        let buckets = self.buckets.read().await;
        let objects = buckets.get(bucket).ok_or_else(|| Self::unknown_bucket(bucket))?;

        objects
            .get(key)
            .map(|stored| stored.data.clone())
            .ok_or_else(|| Error::NotFound(format!("get_object {}: no such key", key)))
    }

    async fn put_object(&self, bucket: &str, key: &str, data: Bytes) -> Result<()> {
        let mut buckets = self.buckets.write().await;
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| Self::unknown_bucket(bucket))?;

        objects.insert(
            key.to_string(),
            StoredObject {
                data,
                last_modified: OffsetDateTime::now_utc(),
            },
        );

        Ok(())
    }

    async fn delete_objects(&self, bucket: &str, keys: Vec<String>) -> Result<()> {
        let mut buckets = self.buckets.write().await;
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| Self::unknown_bucket(bucket))?;

        for key in &keys {
            objects.remove(key);
        }

        Ok(())
    }
}
