//! Typed configuration models.
//!
//! # Design
//! - Pure data carriers used by the loader and the application bootstrap.
//! - Every field has a baseline in [`crate::defaults`] so a missing document
//!   still yields a runnable configuration.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration.
    pub logging: LoggingSettings,
    /// Object store adapter configuration.
    pub store: StoreSettings,
    /// Waveform generator invocation configuration.
    pub generator: GeneratorSettings,
    /// Pipeline policy: key translation tokens, suffixes, staging.
    pub pipeline: PipelinePolicy,
}

/// Logging configuration surfaced to the telemetry layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level string (e.g. `info`, `debug`).
    pub level: String,
    /// Optional output format label (`json` or `pretty`).
    pub format: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            format: None,
        }
    }
}

/// Object store adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreSettings {
    /// Root directory the directory-backed adapter serves buckets from.
    pub root: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            root: defaults::STORE_ROOT.to_string(),
        }
    }
}

/// Waveform generator invocation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Generator binary; resolved through `PATH` unless absolute.
    pub binary: String,
    /// Output bit depth passed via `-b`; the external tool accepts 8 or 16.
    pub bit_depth: u8,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            binary: defaults::GENERATOR_BINARY.to_string(),
            bit_depth: defaults::BIT_DEPTH,
        }
    }
}

/// Pipeline policy: key translation tokens, eligibility suffix, staging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PipelinePolicy {
    /// Object-key folder segment replaced when deriving destination keys.
    pub source_folder_token: String,
    /// Folder segment substituted into destination keys.
    pub derived_folder_token: String,
    /// Case-sensitive suffix an object key must carry to be eligible.
    pub audio_suffix: String,
    /// Suffix appended to destination keys and staged output files.
    pub artifact_suffix: String,
    /// Directory used for per-record staging files.
    pub staging_dir: String,
    /// Character substituted for path separators in staged file names.
    pub separator_substitute: char,
}

impl Default for PipelinePolicy {
    fn default() -> Self {
        Self {
            source_folder_token: defaults::SOURCE_FOLDER_TOKEN.to_string(),
            derived_folder_token: defaults::DERIVED_FOLDER_TOKEN.to_string(),
            audio_suffix: defaults::AUDIO_SUFFIX.to_string(),
            artifact_suffix: defaults::ARTIFACT_SUFFIX.to_string(),
            staging_dir: defaults::STAGING_DIR.to_string(),
            separator_substitute: defaults::SEPARATOR_SUBSTITUTE,
        }
    }
}
