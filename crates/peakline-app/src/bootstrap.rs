//! Application bootstrap: CLI parsing, service wiring, and the batch report.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use peakline_config::load;
use peakline_events::{Event, EventBus};
use peakline_generator::{CommandGenerator, WaveformGenerator};
use peakline_ingest::{IngestService, NotificationBatch, RecordOutcome};
use peakline_store::{DirectoryStore, ObjectStore};
use peakline_telemetry::{LogFormat, LoggingConfig, Metrics, build_sha, init_logging};
use tokio::io::AsyncReadExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

#[derive(Debug, Parser)]
#[command(
    name = "peakline",
    about = "Convert uploaded audio objects into waveform-summary artifacts"
)]
struct Cli {
    /// Path to the JSON configuration document.
    #[arg(long, value_name = "PATH", env = "PEAKLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Notification batch document; `-` reads from stdin.
    #[arg(long, value_name = "PATH", default_value = "-")]
    batch: String,
}

/// Parse the command line, wire the services, and process one batch.
///
/// The invocation itself succeeds whenever aggregation completes; individual
/// record failures are visible in the report, not in the exit status.
///
/// # Errors
///
/// Returns an error if configuration, telemetry, or batch input handling
/// fails before the batch can be processed.
pub async fn run_app() -> AppResult<()> {
    run_with(Cli::parse()).await
}

async fn run_with(cli: Cli) -> AppResult<()> {
    let config = load(cli.config.as_deref()).map_err(|source| AppError::Config {
        operation: "bootstrap.load",
        source,
    })?;

    let logging = LoggingConfig {
        level: &config.logging.level,
        format: LogFormat::from_label(config.logging.format.as_deref()),
        build_sha: option_env!("BUILD_SHA").unwrap_or("dev"),
    };
    init_logging(&logging).map_err(|source| AppError::Telemetry {
        operation: "bootstrap.init_logging",
        source,
    })?;
    info!(build_sha = build_sha(), "peakline starting");

    let metrics = Metrics::new().map_err(|source| AppError::Telemetry {
        operation: "bootstrap.metrics",
        source,
    })?;
    let events = EventBus::new();
    let logger = spawn_event_logger(&events);

    let store: Arc<dyn ObjectStore> = Arc::new(DirectoryStore::new(&config.store.root));
    let generator: Arc<dyn WaveformGenerator> =
        Arc::new(CommandGenerator::new(&config.generator.binary));
    let service = IngestService::new(
        store,
        generator,
        config.pipeline.clone(),
        config.generator.bit_depth,
        events.clone(),
        metrics.clone(),
    );

    let batch = read_batch(&cli.batch).await?;
    info!(records = batch.len(), "processing notification batch");

    let outcomes = service.process(batch).await;
    let summary = OutcomeSummary::from_outcomes(&outcomes);
    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        skipped = summary.skipped,
        "batch complete"
    );
    let snapshot = metrics.snapshot();
    debug!(
        batches = snapshot.batches_total,
        release_failures = snapshot.staging_release_failures_total,
        "metrics counters"
    );

    let report =
        serde_json::to_string_pretty(&outcomes).map_err(|source| AppError::Report { source })?;
    println!("{report}");

    logger.abort();
    Ok(())
}

async fn read_batch(input: &str) -> AppResult<NotificationBatch> {
    let raw = if input == "-" {
        let mut raw = String::new();
        tokio::io::stdin()
            .read_to_string(&mut raw)
            .await
            .map_err(|source| AppError::BatchRead {
                path: PathBuf::from(input),
                source,
            })?;
        raw
    } else {
        tokio::fs::read_to_string(input)
            .await
            .map_err(|source| AppError::BatchRead {
                path: PathBuf::from(input),
                source,
            })?
    };
    serde_json::from_str(&raw).map_err(|source| AppError::BatchDecode {
        path: PathBuf::from(input),
        source,
    })
}

fn spawn_event_logger(events: &EventBus) -> JoinHandle<()> {
    let mut stream = events.subscribe();
    tokio::spawn(async move {
        while let Some(envelope) = stream.next().await {
            match envelope.event {
                Event::BatchReceived { records } => info!(records, "batch received"),
                Event::RecordSkipped { key, reason } => {
                    debug!(key = key.as_deref().unwrap_or("<none>"), %reason, "record skipped");
                }
                Event::StepCompleted { key, step } => debug!(%key, %step, "step completed"),
                Event::RecordSucceeded {
                    key,
                    destination_key,
                } => info!(%key, %destination_key, "record succeeded"),
                Event::RecordFailed { key, message } => {
                    warn!(%key, %message, "record failed");
                }
            }
        }
    })
}

#[derive(Debug, Default, PartialEq, Eq)]
struct OutcomeSummary {
    succeeded: usize,
    failed: usize,
    skipped: usize,
}

impl OutcomeSummary {
    fn from_outcomes(outcomes: &[RecordOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome.label() {
                "succeeded" => summary.succeeded += 1,
                "failed" => summary.failed += 1,
                _ => summary.skipped += 1,
            }
        }
        summary
    }
}
