//! Types and data structures for bucket connector operations.
//!
//! This module provides types for working with object keys, object
//! metadata, and the listing pages returned by storage backends.

mod object_info;
mod object_key;
mod object_page;

pub use object_info::ObjectInfo;
pub use object_key::ObjectKey;
pub use object_page::ObjectPage;
