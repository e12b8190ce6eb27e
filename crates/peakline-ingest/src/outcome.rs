//! Per-record terminal outcomes.

use serde::{Deserialize, Serialize};

/// Terminal result of processing one notification record.
///
/// The batch result is the ordered sequence of these; a `Failed` outcome is
/// visible in the report but does not change the invocation's own success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordOutcome {
    /// The record was skipped before any network or filesystem work.
    Skipped {
        /// Bucket, when the record carried one.
        #[serde(skip_serializing_if = "Option::is_none")]
        bucket: Option<String>,
        /// Key, when the record carried one.
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        /// Why the record was skipped.
        reason: SkipReason,
    },
    /// The record's artifact was generated and uploaded.
    Succeeded {
        /// Source bucket.
        bucket: String,
        /// Source object key.
        key: String,
        /// Destination key the artifact was stored under.
        destination_key: String,
    },
    /// The record failed at one of the pipeline's failure points.
    Failed {
        /// Source bucket.
        bucket: String,
        /// Source object key.
        key: String,
        /// Failure classification.
        kind: FailureKind,
        /// Rendered failure detail.
        message: String,
    },
}

impl RecordOutcome {
    /// Outcome label used for metrics and summary logging.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Skipped { .. } => "skipped",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Reasons a record is skipped without error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The record did not originate from a storage-change event.
    NotStorageEvent,
    /// The object key does not carry the configured audio suffix.
    NotEligibleAudio,
}

impl SkipReason {
    /// Human-readable reason used in events and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStorageEvent => "not a storage event",
            Self::NotEligibleAudio => "not an eligible audio object",
        }
    }
}

/// Classification of a record's failure point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The source object could not be fetched.
    Fetch,
    /// A staging read or write failed.
    StagingIo,
    /// The external generator failed or produced no output.
    Generation,
    /// The artifact could not be uploaded.
    Upload,
    /// The record's task aborted before reaching a terminal state.
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_serialize_with_status_tags() {
        let outcome = RecordOutcome::Succeeded {
            bucket: "audio".to_string(),
            key: "uploads/a.mp3".to_string(),
            destination_key: "wave/a.mp3.dat".to_string(),
        };
        let value = serde_json::to_value(&outcome).expect("outcome should serialize");
        assert_eq!(value["status"], "succeeded");
        assert_eq!(value["destination_key"], "wave/a.mp3.dat");

        let outcome = RecordOutcome::Skipped {
            bucket: None,
            key: None,
            reason: SkipReason::NotStorageEvent,
        };
        let value = serde_json::to_value(&outcome).expect("outcome should serialize");
        assert_eq!(value["status"], "skipped");
        assert_eq!(value["reason"], "not_storage_event");
        assert!(value.get("key").is_none());
    }

    #[test]
    fn labels_cover_every_variant() {
        assert_eq!(
            RecordOutcome::Skipped {
                bucket: None,
                key: None,
                reason: SkipReason::NotEligibleAudio,
            }
            .label(),
            "skipped"
        );
        assert_eq!(
            RecordOutcome::Failed {
                bucket: "audio".to_string(),
                key: "uploads/a.mp3".to_string(),
                kind: FailureKind::Generation,
                message: "waveform generation failed".to_string(),
            }
            .label(),
            "failed"
        );
    }
}
