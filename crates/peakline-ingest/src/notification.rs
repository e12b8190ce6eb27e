//! Trigger payload model for storage-change notification batches.

use serde::{Deserialize, Serialize};

/// Ordered batch of notification records delivered by the trigger.
///
/// Order is irrelevant to correctness; the outcome sequence preserves it for
/// reporting.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct NotificationBatch {
    /// Records carried by this invocation.
    #[serde(rename = "Records", default)]
    pub records: Vec<NotificationRecord>,
}

impl NotificationBatch {
    /// Number of records in the batch.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch carries no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One entry in a trigger batch describing a single storage-object change.
///
/// A record without a `storage` payload did not originate from a
/// storage-change event and carries no usable bucket or key; it is skipped
/// without error.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct NotificationRecord {
    /// Storage-change payload, absent for non-storage records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageChange>,
}

impl NotificationRecord {
    /// Convenience constructor for a genuine storage-change record.
    #[must_use]
    pub fn storage_event(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            storage: Some(StorageChange {
                bucket: bucket.into(),
                key: key.into(),
            }),
        }
    }

    /// Convenience constructor for a record that is not a storage event.
    #[must_use]
    pub const fn other() -> Self {
        Self { storage: None }
    }
}

/// Bucket and key identifying the changed object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageChange {
    /// Bucket or container holding the changed object.
    pub bucket: String,
    /// Key of the changed object.
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_deserializes_records_array() {
        let batch: NotificationBatch = serde_json::from_str(
            r#"{"Records": [
                {"storage": {"bucket": "audio", "key": "uploads/a.mp3"}},
                {}
            ]}"#,
        )
        .expect("batch should deserialize");

        assert_eq!(batch.len(), 2);
        assert_eq!(
            batch.records[0].storage.as_ref().map(|s| s.key.as_str()),
            Some("uploads/a.mp3")
        );
        assert!(batch.records[1].storage.is_none());
    }

    #[test]
    fn missing_records_array_yields_empty_batch() {
        let batch: NotificationBatch =
            serde_json::from_str("{}").expect("empty document should deserialize");
        assert!(batch.is_empty());
    }
}
