//! Prometheus-backed metrics registry and snapshot helpers.
//!
//! # Design
//! - Encapsulates collector registration to keep the public API small.
//! - Exposes a minimal set of counters relevant to the ingestion pipeline.

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use serde::Serialize;

use crate::error::{TelemetryError, TelemetryResult};

/// Prometheus-backed metrics registry shared across services.
#[derive(Clone)]
pub struct Metrics {
    inner: std::sync::Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    batches_total: IntCounter,
    records_total: IntCounterVec,
    pipeline_steps_total: IntCounterVec,
    events_emitted_total: IntCounterVec,
    staging_release_failures_total: IntCounter,
}

/// Snapshot of selected counters for health reporting.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Total notification batches accepted.
    pub batches_total: u64,
    /// Total staged files that could not be removed during release.
    pub staging_release_failures_total: u64,
}

impl Metrics {
    /// Construct a new metrics registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the Prometheus collectors cannot be
    /// registered.
    pub fn new() -> TelemetryResult<Self> {
        let registry = Registry::new();

        let batches_total = IntCounter::with_opts(Opts::new(
            "batches_total",
            "Notification batches accepted for processing",
        ))
        .map_err(|source| TelemetryError::Registration {
            collector: "batches_total",
            source,
        })?;
        let records_total = IntCounterVec::new(
            Opts::new("records_total", "Notification records by terminal outcome"),
            &["outcome"],
        )
        .map_err(|source| TelemetryError::Registration {
            collector: "records_total",
            source,
        })?;
        let pipeline_steps_total = IntCounterVec::new(
            Opts::new(
                "pipeline_steps_total",
                "Ingestion pipeline steps executed by status",
            ),
            &["step", "status"],
        )
        .map_err(|source| TelemetryError::Registration {
            collector: "pipeline_steps_total",
            source,
        })?;
        let events_emitted_total = IntCounterVec::new(
            Opts::new("events_emitted_total", "Domain events emitted by type"),
            &["type"],
        )
        .map_err(|source| TelemetryError::Registration {
            collector: "events_emitted_total",
            source,
        })?;
        let staging_release_failures_total = IntCounter::with_opts(Opts::new(
            "staging_release_failures_total",
            "Staged files that could not be removed during release",
        ))
        .map_err(|source| TelemetryError::Registration {
            collector: "staging_release_failures_total",
            source,
        })?;

        register(&registry, "batches_total", Box::new(batches_total.clone()))?;
        register(&registry, "records_total", Box::new(records_total.clone()))?;
        register(
            &registry,
            "pipeline_steps_total",
            Box::new(pipeline_steps_total.clone()),
        )?;
        register(
            &registry,
            "events_emitted_total",
            Box::new(events_emitted_total.clone()),
        )?;
        register(
            &registry,
            "staging_release_failures_total",
            Box::new(staging_release_failures_total.clone()),
        )?;

        Ok(Self {
            inner: std::sync::Arc::new(MetricsInner {
                registry,
                batches_total,
                records_total,
                pipeline_steps_total,
                events_emitted_total,
                staging_release_failures_total,
            }),
        })
    }

    /// Increment the batch counter.
    pub fn inc_batch(&self) {
        self.inner.batches_total.inc();
    }

    /// Increment the record counter for the given terminal outcome.
    pub fn inc_record(&self, outcome: &str) {
        self.inner
            .records_total
            .with_label_values(&[outcome])
            .inc();
    }

    /// Increment the pipeline step counter.
    pub fn inc_pipeline_step(&self, step: &str, status: &str) {
        self.inner
            .pipeline_steps_total
            .with_label_values(&[step, status])
            .inc();
    }

    /// Increment the emitted event counter for the specific event type.
    pub fn inc_event(&self, event_type: &str) {
        self.inner
            .events_emitted_total
            .with_label_values(&[event_type])
            .inc();
    }

    /// Increment the counter tracking staged files that survived release.
    pub fn inc_staging_release_failure(&self) {
        self.inner.staging_release_failures_total.inc();
    }

    /// Render the metrics registry using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be encoded or if the encoded
    /// buffer is not valid UTF-8.
    pub fn render(&self) -> TelemetryResult<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|source| TelemetryError::Encode { source })?;
        String::from_utf8(buffer).map_err(|source| TelemetryError::Utf8 { source })
    }

    /// Take a point-in-time snapshot of the scalar counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            batches_total: self.inner.batches_total.get(),
            staging_release_failures_total: self.inner.staging_release_failures_total.get(),
        }
    }
}

fn register(
    registry: &Registry,
    collector: &'static str,
    boxed: Box<dyn prometheus::core::Collector>,
) -> TelemetryResult<()> {
    registry
        .register(boxed)
        .map_err(|source| TelemetryError::Registration { collector, source })
}
