//! Storage backends for the bucket client.
//!
//! The client depends on the [`StorageBackend`] capability set rather than a
//! concrete SDK type. Two implementations ship with the crate: [`S3Backend`]
//! wraps a MinIO/S3-compatible client, and [`MemoryBackend`] is a paged
//! in-memory store used as the test harness boundary.

mod memory;
mod s3;
mod store;

pub use memory::MemoryBackend;
pub use s3::S3Backend;
pub use store::{PageStream, StorageBackend};
