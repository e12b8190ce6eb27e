//! Typed errors for waveform generator invocation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Errors produced while invoking the external waveform generator.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The generator binary could not be launched.
    #[error("generator could not be launched")]
    Spawn {
        /// Binary that failed to launch.
        binary: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The generator exited with a non-zero status.
    #[error("generator exited with failure")]
    Failed {
        /// Exit code when the process terminated normally.
        status: Option<i32>,
        /// Captured stderr, surfaced for operator visibility.
        stderr: String,
    },
    /// The generator reported success but produced no readable output file.
    #[error("generator produced no output")]
    MissingOutput {
        /// Output path that was expected to exist.
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn failed_carries_no_source() {
        let err = GeneratorError::Failed {
            status: Some(2),
            stderr: "unsupported codec".to_string(),
        };
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "generator exited with failure");
    }

    #[test]
    fn spawn_preserves_source() {
        let err = GeneratorError::Spawn {
            binary: PathBuf::from("audiowaveform"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.source().is_some());
    }
}
