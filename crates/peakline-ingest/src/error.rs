//! Structured, constant-message errors for the ingestion pipeline.
//!
//! # Design
//! - One variant per failure point of the per-record state machine.
//! - Capture operation context (bucket, key, paths) to make failures
//!   reproducible in tests.
//! - Preserve source errors without interpolating context into messages.

use std::io;
use std::path::PathBuf;

use peakline_generator::GeneratorError;
use peakline_store::StoreError;
use thiserror::Error;

use crate::outcome::FailureKind;

/// Result type for per-record pipeline operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors arising inside one record's pipeline.
///
/// Every variant is scoped to a single record and is converted into a
/// `Failed` outcome at the record boundary; it never crosses the batch join.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The source object could not be fetched.
    #[error("object fetch failed")]
    Fetch {
        /// Bucket that was queried.
        bucket: String,
        /// Key that was queried.
        key: String,
        /// Underlying store error.
        source: StoreError,
    },
    /// A staging read or write failed.
    #[error("staging io failure")]
    Staging {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The external waveform generator failed or produced no output.
    #[error("waveform generation failed")]
    Generation {
        /// Underlying generator error.
        source: GeneratorError,
    },
    /// The derived artifact could not be uploaded.
    #[error("artifact upload failed")]
    Upload {
        /// Bucket the artifact was destined for.
        bucket: String,
        /// Destination key the artifact was destined for.
        key: String,
        /// Underlying store error.
        source: StoreError,
    },
}

impl IngestError {
    /// Failure classification carried on the record's terminal outcome.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Fetch { .. } => FailureKind::Fetch,
            Self::Staging { .. } => FailureKind::StagingIo,
            Self::Generation { .. } => FailureKind::Generation,
            Self::Upload { .. } => FailureKind::Upload,
        }
    }

    /// Render the error with its source chain for reporting.
    #[must_use]
    pub fn detail(&self) -> String {
        use std::error::Error as _;

        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }
}
