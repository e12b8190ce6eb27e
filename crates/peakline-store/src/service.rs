//! Object store trait implemented by storage adapters.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::model::ObjectRef;

/// Primary store trait implemented by adapters (directory, S3, test doubles).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the full payload of the referenced object.
    async fn fetch(&self, object: &ObjectRef) -> StoreResult<Vec<u8>>;

    /// Store the payload under the referenced key, replacing any prior value.
    async fn put(&self, object: &ObjectRef, bytes: Vec<u8>) -> StoreResult<()>;
}
