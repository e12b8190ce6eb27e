//! Structured, constant-message errors for telemetry setup and rendering.

use thiserror::Error;

/// Result alias for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Errors produced while installing logging or handling metrics.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The global tracing subscriber could not be installed.
    #[error("failed to install tracing subscriber")]
    Subscriber {
        /// Underlying installation failure rendered as text.
        detail: String,
    },
    /// A Prometheus collector could not be registered.
    #[error("failed to register metrics collector")]
    Registration {
        /// Collector that failed to register.
        collector: &'static str,
        /// Underlying Prometheus error.
        source: prometheus::Error,
    },
    /// The metrics registry could not be encoded for exposition.
    #[error("failed to encode metrics")]
    Encode {
        /// Underlying Prometheus error.
        source: prometheus::Error,
    },
    /// The encoded metrics buffer was not valid UTF-8.
    #[error("metrics output was not valid UTF-8")]
    Utf8 {
        /// Underlying conversion error.
        source: std::string::FromUtf8Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn errors_preserve_sources() {
        let err = TelemetryError::Subscriber {
            detail: "already set".to_string(),
        };
        assert!(err.source().is_none());

        let err = TelemetryError::Encode {
            source: prometheus::Error::Msg("encode".to_string()),
        };
        assert!(err.source().is_some());
    }
}
