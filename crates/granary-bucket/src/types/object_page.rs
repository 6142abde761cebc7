//! Listing pages yielded by storage backends.

use crate::types::ObjectInfo;

/// One backend page of a prefix listing.
///
/// Backends return large listings in bounded-size pages; the client drains
/// every page into a single sequence so callers never see pagination.
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    /// Objects contained in this page, in backend-reported order.
    pub objects: Vec<ObjectInfo>,
    /// Whether more pages follow this one.
    pub is_truncated: bool,
}

impl ObjectPage {
    /// Creates a new page.
    pub fn new(objects: Vec<ObjectInfo>, is_truncated: bool) -> Self {
        Self {
            objects,
            is_truncated,
        }
    }

    /// Returns the number of objects in this page.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns whether this page contains no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
