//! Object store DTOs shared across the workspace.

use serde::{Deserialize, Serialize};

/// Fully qualified reference to one stored object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Bucket or container holding the object.
    pub bucket: String,
    /// Key identifying the object within its bucket.
    pub key: String,
}

impl ObjectRef {
    /// Convenience constructor.
    #[must_use]
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}
