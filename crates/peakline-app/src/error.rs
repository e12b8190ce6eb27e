//! # Design
//!
//! - Centralize application-level errors for bootstrap and batch processing.
//! - Keep error messages constant while carrying context fields for debugging.
//! - Preserve source errors without re-logging at call sites.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration operations failed.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: peakline_config::ConfigError,
    },
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: peakline_telemetry::TelemetryError,
    },
    /// The notification batch document could not be read.
    #[error("batch input could not be read")]
    BatchRead {
        /// Path of the batch document (`-` for stdin).
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The notification batch document could not be decoded.
    #[error("batch input could not be decoded")]
    BatchDecode {
        /// Path of the batch document (`-` for stdin).
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// The outcome report could not be rendered.
    #[error("outcome report could not be rendered")]
    Report {
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn errors_preserve_sources() {
        let err = AppError::BatchRead {
            path: PathBuf::from("batch.json"),
            source: io::Error::other("io"),
        };
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "batch input could not be read");
    }
}
