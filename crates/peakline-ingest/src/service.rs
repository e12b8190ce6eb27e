//! Batch orchestrator driving each record through the ingestion pipeline.

use std::future::Future;
use std::sync::Arc;

use peakline_config::PipelinePolicy;
use peakline_events::{Event, EventBus};
use peakline_generator::WaveformGenerator;
use peakline_store::{ObjectRef, ObjectStore};
use peakline_telemetry::Metrics;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::{IngestError, IngestResult};
use crate::notification::{NotificationBatch, NotificationRecord, StorageChange};
use crate::outcome::{FailureKind, RecordOutcome, SkipReason};
use crate::paths::destination_key;
use crate::staging::{StagedPaths, StagingArea};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StepKind {
    Fetch,
    Stage,
    Generate,
    Read,
    Upload,
}

impl StepKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Stage => "stage",
            Self::Generate => "generate",
            Self::Read => "read",
            Self::Upload => "upload",
        }
    }
}

/// Service that processes notification batches into per-record outcomes.
///
/// Collaborators are injected capabilities: the object store and the
/// waveform generator are trait objects so tests can substitute doubles.
#[derive(Clone)]
pub struct IngestService {
    store: Arc<dyn ObjectStore>,
    generator: Arc<dyn WaveformGenerator>,
    staging: StagingArea,
    policy: PipelinePolicy,
    bit_depth: u8,
    events: EventBus,
    metrics: Metrics,
}

impl IngestService {
    /// Construct a new ingest service with shared dependencies.
    #[must_use]
    pub fn new(
        store: Arc<dyn ObjectStore>,
        generator: Arc<dyn WaveformGenerator>,
        policy: PipelinePolicy,
        bit_depth: u8,
        events: EventBus,
        metrics: Metrics,
    ) -> Self {
        let staging = StagingArea::new(
            policy.staging_dir.clone(),
            policy.separator_substitute,
            policy.artifact_suffix.clone(),
        );
        Self {
            store,
            generator,
            staging,
            policy,
            bit_depth,
            events,
            metrics,
        }
    }

    /// Process a notification batch, returning one outcome per record in
    /// input order.
    ///
    /// All records are launched concurrently and joined before returning.
    /// A record's failure is contained to its own outcome; it never cancels,
    /// blocks, or alters sibling records.
    pub async fn process(&self, batch: NotificationBatch) -> Vec<RecordOutcome> {
        self.metrics.inc_batch();
        self.publish(Event::BatchReceived {
            records: batch.len(),
        });

        let mut handles: Vec<(Option<StorageChange>, JoinHandle<RecordOutcome>)> =
            Vec::with_capacity(batch.len());
        for record in batch.records {
            let identity = record.storage.clone();
            let service = self.clone();
            let handle = tokio::spawn(async move { service.process_record(record).await });
            handles.push((identity, handle));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (identity, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    error!(error = %join_error, "record task aborted");
                    self.metrics.inc_record("failed");
                    RecordOutcome::Failed {
                        bucket: identity
                            .as_ref()
                            .map(|change| change.bucket.clone())
                            .unwrap_or_default(),
                        key: identity
                            .as_ref()
                            .map(|change| change.key.clone())
                            .unwrap_or_default(),
                        kind: FailureKind::Internal,
                        message: format!("record task aborted: {join_error}"),
                    }
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn process_record(&self, record: NotificationRecord) -> RecordOutcome {
        let Some(change) = record.storage else {
            debug!("skipping record that is not a storage event");
            return self.skip(None, None, SkipReason::NotStorageEvent);
        };
        if !change.key.ends_with(&self.policy.audio_suffix) {
            info!(key = %change.key, "skipping object without the audio suffix");
            return self.skip(Some(change.bucket), Some(change.key), SkipReason::NotEligibleAudio);
        }

        let staged = self.staging.plan(&change.key);
        let result = self.run_pipeline(&change, &staged).await;
        let release_failures = self.staging.release(&staged).await;
        for _ in 0..release_failures {
            self.metrics.inc_staging_release_failure();
        }

        match result {
            Ok(destination) => {
                info!(key = %change.key, destination = %destination, "artifact uploaded");
                self.metrics.inc_record("succeeded");
                self.publish(Event::RecordSucceeded {
                    key: change.key.clone(),
                    destination_key: destination.clone(),
                });
                RecordOutcome::Succeeded {
                    bucket: change.bucket,
                    key: change.key,
                    destination_key: destination,
                }
            }
            Err(ingest_error) => {
                let message = ingest_error.detail();
                error!(key = %change.key, error = %message, "record failed");
                self.metrics.inc_record("failed");
                self.publish(Event::RecordFailed {
                    key: change.key.clone(),
                    message: message.clone(),
                });
                RecordOutcome::Failed {
                    bucket: change.bucket,
                    key: change.key,
                    kind: ingest_error.kind(),
                    message,
                }
            }
        }
    }

    async fn run_pipeline(
        &self,
        change: &StorageChange,
        staged: &StagedPaths,
    ) -> IngestResult<String> {
        let origin = ObjectRef::new(change.bucket.clone(), change.key.clone());
        let bytes = self
            .run_step(&change.key, StepKind::Fetch, async {
                self.store
                    .fetch(&origin)
                    .await
                    .map_err(|source| IngestError::Fetch {
                        bucket: change.bucket.clone(),
                        key: change.key.clone(),
                        source,
                    })
            })
            .await?;

        self.run_step(&change.key, StepKind::Stage, self.staging.stage(staged, &bytes))
            .await?;

        self.run_step(&change.key, StepKind::Generate, async {
            self.generator
                .generate(&staged.input, &staged.output, self.bit_depth)
                .await
                .map_err(|source| IngestError::Generation { source })
        })
        .await?;

        let artifact = self
            .run_step(&change.key, StepKind::Read, self.staging.read_artifact(staged))
            .await?;

        let destination = destination_key(
            &change.key,
            &self.policy.source_folder_token,
            &self.policy.derived_folder_token,
            &self.policy.artifact_suffix,
        );
        let target = ObjectRef::new(change.bucket.clone(), destination.clone());
        self.run_step(&change.key, StepKind::Upload, async {
            self.store
                .put(&target, artifact)
                .await
                .map_err(|source| IngestError::Upload {
                    bucket: change.bucket.clone(),
                    key: destination.clone(),
                    source,
                })
        })
        .await?;

        Ok(destination)
    }

    async fn run_step<T, F>(&self, key: &str, step: StepKind, work: F) -> IngestResult<T>
    where
        F: Future<Output = IngestResult<T>>,
    {
        match work.await {
            Ok(value) => {
                self.metrics.inc_pipeline_step(step.as_str(), "completed");
                self.publish(Event::StepCompleted {
                    key: key.to_string(),
                    step: step.as_str().to_string(),
                });
                Ok(value)
            }
            Err(ingest_error) => {
                self.metrics.inc_pipeline_step(step.as_str(), "failed");
                Err(ingest_error)
            }
        }
    }

    fn skip(
        &self,
        bucket: Option<String>,
        key: Option<String>,
        reason: SkipReason,
    ) -> RecordOutcome {
        self.metrics.inc_record("skipped");
        self.publish(Event::RecordSkipped {
            key: key.clone(),
            reason: reason.as_str().to_string(),
        });
        RecordOutcome::Skipped {
            bucket,
            key,
            reason,
        }
    }

    fn publish(&self, event: Event) {
        self.metrics.inc_event(event.kind());
        self.events.publish(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peakline_test_support::{MemoryStore, StubGenerator};
    use tempfile::TempDir;

    fn staging_dir() -> TempDir {
        tempfile::Builder::new()
            .prefix("peakline-ingest-")
            .tempdir()
            .expect("temp dir")
    }

    fn test_policy(staging: &TempDir) -> PipelinePolicy {
        PipelinePolicy {
            staging_dir: staging.path().display().to_string(),
            ..PipelinePolicy::default()
        }
    }

    fn service_with(
        store: &MemoryStore,
        generator: Arc<dyn WaveformGenerator>,
        staging: &TempDir,
    ) -> IngestService {
        IngestService::new(
            Arc::new(store.clone()),
            generator,
            test_policy(staging),
            8,
            EventBus::new(),
            Metrics::new().expect("metrics"),
        )
    }

    #[tokio::test]
    async fn non_storage_records_skip_without_store_calls() {
        let staging = staging_dir();
        let store = MemoryStore::new();
        let service = service_with(&store, Arc::new(StubGenerator::new(b"dat".to_vec())), &staging);

        let batch = NotificationBatch {
            records: vec![NotificationRecord::other()],
        };
        let outcomes = service.process(batch).await;

        assert_eq!(
            outcomes,
            vec![RecordOutcome::Skipped {
                bucket: None,
                key: None,
                reason: SkipReason::NotStorageEvent,
            }]
        );
        assert!(store.fetch_calls().is_empty());
        assert!(store.put_calls().is_empty());
    }

    #[tokio::test]
    async fn ineligible_suffix_skips_without_store_calls() {
        let staging = staging_dir();
        let store = MemoryStore::new();
        let service = service_with(&store, Arc::new(StubGenerator::new(b"dat".to_vec())), &staging);

        let batch = NotificationBatch {
            records: vec![NotificationRecord::storage_event("audio", "uploads/a.txt")],
        };
        let outcomes = service.process(batch).await;

        assert_eq!(
            outcomes,
            vec![RecordOutcome::Skipped {
                bucket: Some("audio".to_string()),
                key: Some("uploads/a.txt".to_string()),
                reason: SkipReason::NotEligibleAudio,
            }]
        );
        assert!(store.fetch_calls().is_empty());
    }

    #[tokio::test]
    async fn empty_batches_produce_empty_reports() {
        let staging = staging_dir();
        let store = MemoryStore::new();
        let service = service_with(&store, Arc::new(StubGenerator::new(b"dat".to_vec())), &staging);

        let outcomes = service.process(NotificationBatch::default()).await;
        assert!(outcomes.is_empty());
    }
}
