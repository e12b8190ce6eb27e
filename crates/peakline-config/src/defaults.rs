//! Baseline configuration values applied before file and environment overrides.

/// Object-key folder segment that marks an object as pipeline input.
pub const SOURCE_FOLDER_TOKEN: &str = "uploads";
/// Folder segment substituted into derived artifact keys.
pub const DERIVED_FOLDER_TOKEN: &str = "wave";
/// Case-sensitive suffix an object key must carry to be eligible.
pub const AUDIO_SUFFIX: &str = ".mp3";
/// Suffix appended to derived artifact keys and staged output files.
pub const ARTIFACT_SUFFIX: &str = ".dat";
/// Directory used for per-record staging files.
pub const STAGING_DIR: &str = "/tmp";
/// Character substituted for path separators in staged file names.
pub const SEPARATOR_SUBSTITUTE: char = '_';
/// Output bit depth passed to the waveform generator.
pub const BIT_DEPTH: u8 = 8;
/// Waveform generator binary resolved through `PATH` unless absolute.
pub const GENERATOR_BINARY: &str = "audiowaveform";
/// Root directory for the directory-backed object store adapter.
pub const STORE_ROOT: &str = "data/store";
/// Default logging level.
pub const LOG_LEVEL: &str = "info";
