//! Typed errors for object store operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for object store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by object store adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested object does not exist.
    #[error("object not found")]
    NotFound {
        /// Bucket that was queried.
        bucket: String,
        /// Key that was queried.
        key: String,
    },
    /// The adapter was denied access to the object.
    #[error("object access denied")]
    Access {
        /// Bucket that was queried.
        bucket: String,
        /// Key that was queried.
        key: String,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Any other IO failure while talking to the backing store.
    #[error("store io failure")]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn not_found_carries_no_source() {
        let err = StoreError::NotFound {
            bucket: "audio".to_string(),
            key: "uploads/a.mp3".to_string(),
        };
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "object not found");
    }

    #[test]
    fn io_variants_preserve_sources() {
        let err = StoreError::Io {
            operation: "put.write",
            path: PathBuf::from("data/store/audio/wave/a.mp3.dat"),
            source: io::Error::other("disk full"),
        };
        assert!(err.source().is_some());
    }
}
