//! Backend capability set the bucket client is constructed against.

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::Result;
use crate::types::ObjectPage;

/// Stream of listing pages produced by a backend enumeration.
pub type PageStream = BoxStream<'static, Result<ObjectPage>>;

/// Capability set required of an object storage backend.
///
/// The real SDK client and the in-memory test double both implement this
/// trait; the client is constructed against the trait, never a concrete
/// backend type. Implementations must be safe for concurrent use: every
/// method takes `&self` and backends hold no mutable state beyond their own
/// synchronized internals.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    /// Verifies that the bucket exists and is accessible.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`](crate::Error::Connection) if the bucket
    /// does not exist or the backend cannot be reached.
    async fn verify_bucket(&self, bucket: &str) -> Result<()>;

    /// Starts a paged enumeration of every object whose key begins with
    /// `prefix`. An empty prefix enumerates the whole bucket.
    ///
    /// Pages arrive in backend iteration order. Exhausting the stream
    /// observes every committed object the backend reports at call time.
    async fn list_pages(&self, bucket: &str, prefix: &str) -> Result<PageStream>;

    /// Fetches the full body of the object stored under `key`.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes>;

    /// Stores `data` under `key`, overwriting any existing object
    /// (last-write-wins).
    async fn put_object(&self, bucket: &str, key: &str, data: Bytes) -> Result<()>;

    /// Deletes the given keys in one batch. Keys that do not exist are
    /// ignored, matching S3 semantics.
    async fn delete_objects(&self, bucket: &str, keys: Vec<String>) -> Result<()>;
}
