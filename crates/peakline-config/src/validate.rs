//! Validation helpers applied after loading and overrides.

use crate::error::{ConfigError, ConfigResult};
use crate::model::AppConfig;

/// Bit depths the external waveform generator accepts via `-b`.
const SUPPORTED_BIT_DEPTHS: &[u8] = &[8, 16];

/// Validate a fully resolved configuration.
///
/// # Errors
///
/// Returns an error naming the first field that fails validation.
pub fn validate(config: &AppConfig) -> ConfigResult<()> {
    require_non_empty("pipeline.source_folder_token", &config.pipeline.source_folder_token)?;
    require_non_empty(
        "pipeline.derived_folder_token",
        &config.pipeline.derived_folder_token,
    )?;
    require_non_empty("pipeline.audio_suffix", &config.pipeline.audio_suffix)?;
    require_non_empty("pipeline.artifact_suffix", &config.pipeline.artifact_suffix)?;
    require_non_empty("pipeline.staging_dir", &config.pipeline.staging_dir)?;
    require_non_empty("generator.binary", &config.generator.binary)?;
    require_non_empty("store.root", &config.store.root)?;

    let substitute = config.pipeline.separator_substitute;
    if substitute == '/' || substitute == '\\' {
        return Err(ConfigError::Invalid {
            field: "pipeline.separator_substitute",
            reason: "must not be a path separator",
            value: Some(substitute.to_string()),
        });
    }

    if !SUPPORTED_BIT_DEPTHS.contains(&config.generator.bit_depth) {
        return Err(ConfigError::Invalid {
            field: "generator.bit_depth",
            reason: "unsupported",
            value: Some(config.generator.bit_depth.to_string()),
        });
    }

    Ok(())
}

fn require_non_empty(field: &'static str, value: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid {
            field,
            reason: "empty",
            value: Some(value.to_string()),
        });
    }
    Ok(())
}
