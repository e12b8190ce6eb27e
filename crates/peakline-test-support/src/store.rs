//! In-memory object store double with call recording and failure injection.

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use peakline_store::{ObjectRef, ObjectStore, StoreError, StoreResult};

/// Object store double backed by a map, suitable for orchestrator tests.
///
/// Keys registered through [`MemoryStore::fail_fetch`] or
/// [`MemoryStore::fail_put`] produce access errors, letting tests engineer a
/// failure at either store-facing pipeline step.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    objects: HashMap<ObjectRef, Vec<u8>>,
    fetch_failures: HashSet<String>,
    put_failures: HashSet<String>,
    fetch_calls: Vec<ObjectRef>,
    put_calls: Vec<ObjectRef>,
}

impl MemoryStore {
    /// Construct an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object into the store.
    pub fn insert(&self, bucket: &str, key: &str, bytes: impl Into<Vec<u8>>) {
        let mut inner = self.lock();
        inner
            .objects
            .insert(ObjectRef::new(bucket, key), bytes.into());
    }

    /// Make every fetch of `key` fail with an access error.
    pub fn fail_fetch(&self, key: &str) {
        self.lock().fetch_failures.insert(key.to_string());
    }

    /// Make every put of `key` fail with an access error.
    pub fn fail_put(&self, key: &str) {
        self.lock().put_failures.insert(key.to_string());
    }

    /// Objects fetched so far, in call order.
    #[must_use]
    pub fn fetch_calls(&self) -> Vec<ObjectRef> {
        self.lock().fetch_calls.clone()
    }

    /// Objects put so far, in call order.
    #[must_use]
    pub fn put_calls(&self) -> Vec<ObjectRef> {
        self.lock().put_calls.clone()
    }

    /// Current payload stored under the given reference, if any.
    #[must_use]
    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.lock().objects.get(&ObjectRef::new(bucket, key)).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store mutex poisoned")
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn fetch(&self, object: &ObjectRef) -> StoreResult<Vec<u8>> {
        let mut inner = self.lock();
        inner.fetch_calls.push(object.clone());
        if inner.fetch_failures.contains(&object.key) {
            return Err(StoreError::Access {
                bucket: object.bucket.clone(),
                key: object.key.clone(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }
        inner
            .objects
            .get(object)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                bucket: object.bucket.clone(),
                key: object.key.clone(),
            })
    }

    async fn put(&self, object: &ObjectRef, bytes: Vec<u8>) -> StoreResult<()> {
        let mut inner = self.lock();
        inner.put_calls.push(object.clone());
        if inner.put_failures.contains(&object.key) {
            return Err(StoreError::Access {
                bucket: object.bucket.clone(),
                key: object.key.clone(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }
        inner.objects.insert(object.clone(), bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_and_round_trips() -> StoreResult<()> {
        let store = MemoryStore::new();
        store.insert("audio", "uploads/a.mp3", b"payload".to_vec());

        let object = ObjectRef::new("audio", "uploads/a.mp3");
        let bytes = store.fetch(&object).await?;
        assert_eq!(bytes, b"payload");
        assert_eq!(store.fetch_calls(), vec![object.clone()]);

        store.put(&ObjectRef::new("audio", "wave/a.mp3.dat"), b"dat".to_vec()).await?;
        assert_eq!(store.object("audio", "wave/a.mp3.dat"), Some(b"dat".to_vec()));
        Ok(())
    }

    #[tokio::test]
    async fn injected_failures_surface_as_access_errors() {
        let store = MemoryStore::new();
        store.insert("audio", "uploads/a.mp3", b"payload".to_vec());
        store.fail_fetch("uploads/a.mp3");

        let err = store
            .fetch(&ObjectRef::new("audio", "uploads/a.mp3"))
            .await
            .expect_err("expected access error");
        assert!(matches!(err, StoreError::Access { .. }));
    }
}
