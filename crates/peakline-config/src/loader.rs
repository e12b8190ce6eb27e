//! Configuration document loading and environment overrides.
//!
//! # Design
//! - Baseline defaults, then the optional JSON document, then `PEAKLINE_*`
//!   environment variables, strongest last.
//! - Environment lookup is injected so overrides stay testable without
//!   mutating process state.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::model::AppConfig;
use crate::validate::validate;

/// Load, override, and validate the application configuration.
///
/// # Errors
///
/// Returns an error if the document cannot be read or parsed, if an
/// environment override carries an unusable value, or if the resulting
/// configuration fails validation.
pub fn load(path: Option<&Path>) -> ConfigResult<AppConfig> {
    let mut config = match path {
        Some(path) => parse_document(path)?,
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    validate(&config)?;
    Ok(config)
}

fn parse_document(path: &Path) -> ConfigResult<AppConfig> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        operation: "load.read_document",
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "configuration document loaded");
    Ok(config)
}

fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> ConfigResult<()>
where
    F: Fn(&'static str) -> Option<String>,
{
    if let Some(value) = lookup("PEAKLINE_SOURCE_FOLDER_TOKEN") {
        config.pipeline.source_folder_token = value;
    }
    if let Some(value) = lookup("PEAKLINE_DERIVED_FOLDER_TOKEN") {
        config.pipeline.derived_folder_token = value;
    }
    if let Some(value) = lookup("PEAKLINE_AUDIO_SUFFIX") {
        config.pipeline.audio_suffix = value;
    }
    if let Some(value) = lookup("PEAKLINE_ARTIFACT_SUFFIX") {
        config.pipeline.artifact_suffix = value;
    }
    if let Some(value) = lookup("PEAKLINE_STAGING_DIR") {
        config.pipeline.staging_dir = value;
    }
    if let Some(value) = lookup("PEAKLINE_SEPARATOR_SUBSTITUTE") {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(substitute), None) => config.pipeline.separator_substitute = substitute,
            _ => {
                return Err(ConfigError::Env {
                    name: "PEAKLINE_SEPARATOR_SUBSTITUTE",
                    reason: "expected a single character",
                    value: Some(value),
                });
            }
        }
    }
    if let Some(value) = lookup("PEAKLINE_BIT_DEPTH") {
        config.generator.bit_depth = value.parse().map_err(|_| ConfigError::Env {
            name: "PEAKLINE_BIT_DEPTH",
            reason: "expected an unsigned integer",
            value: Some(value),
        })?;
    }
    if let Some(value) = lookup("PEAKLINE_GENERATOR_BINARY") {
        config.generator.binary = value;
    }
    if let Some(value) = lookup("PEAKLINE_STORE_ROOT") {
        config.store.root = value;
    }
    if let Some(value) = lookup("PEAKLINE_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Some(value) = lookup("PEAKLINE_LOG_FORMAT") {
        config.logging.format = Some(value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(map: &HashMap<&'static str, &str>) -> impl Fn(&'static str) -> Option<String> {
        let owned: HashMap<&'static str, String> = map
            .iter()
            .map(|(name, value)| (*name, (*value).to_string()))
            .collect();
        move |name| owned.get(name).cloned()
    }

    #[test]
    fn load_without_document_yields_defaults() -> ConfigResult<()> {
        let config = load(None)?;
        assert_eq!(config.pipeline.source_folder_token, "uploads");
        Ok(())
    }

    #[test]
    fn load_reads_document_values() -> ConfigResult<()> {
        let mut file = tempfile::Builder::new()
            .prefix("peakline-config-")
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        write!(
            file,
            r#"{{"pipeline": {{"source_folder_token": "incoming"}}, "generator": {{"bit_depth": 16}}}}"#
        )
        .expect("write document");

        let config = load(Some(file.path()))?;
        assert_eq!(config.pipeline.source_folder_token, "incoming");
        assert_eq!(config.generator.bit_depth, 16);
        assert_eq!(config.pipeline.derived_folder_token, "wave");
        Ok(())
    }

    #[test]
    fn env_overrides_take_precedence() -> ConfigResult<()> {
        let mut config = AppConfig::default();
        let env = HashMap::from([
            ("PEAKLINE_SOURCE_FOLDER_TOKEN", "drops"),
            ("PEAKLINE_BIT_DEPTH", "16"),
            ("PEAKLINE_SEPARATOR_SUBSTITUTE", "-"),
        ]);
        apply_env_overrides(&mut config, lookup_from(&env))?;
        assert_eq!(config.pipeline.source_folder_token, "drops");
        assert_eq!(config.generator.bit_depth, 16);
        assert_eq!(config.pipeline.separator_substitute, '-');
        Ok(())
    }

    #[test]
    fn env_override_rejects_multi_character_substitute() {
        let mut config = AppConfig::default();
        let env = HashMap::from([("PEAKLINE_SEPARATOR_SUBSTITUTE", "--")]);
        let err = apply_env_overrides(&mut config, lookup_from(&env))
            .expect_err("expected override rejection");
        assert!(matches!(
            err,
            ConfigError::Env {
                name: "PEAKLINE_SEPARATOR_SUBSTITUTE",
                ..
            }
        ));
    }

    #[test]
    fn env_override_rejects_unparseable_bit_depth() {
        let mut config = AppConfig::default();
        let env = HashMap::from([("PEAKLINE_BIT_DEPTH", "deep")]);
        let err = apply_env_overrides(&mut config, lookup_from(&env))
            .expect_err("expected override rejection");
        assert!(matches!(
            err,
            ConfigError::Env {
                name: "PEAKLINE_BIT_DEPTH",
                ..
            }
        ));
    }

    #[test]
    fn load_rejects_missing_document() {
        let err = load(Some(Path::new("/definitely/missing/peakline.json")))
            .expect_err("expected io failure");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
