//! Telemetry primitives shared across the Peakline workspace.
//!
//! This crate centralises logging and metrics so the pipeline and the binary
//! adopt a consistent observability story.

pub mod error;
pub mod init;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
pub use metrics::{Metrics, MetricsSnapshot};
