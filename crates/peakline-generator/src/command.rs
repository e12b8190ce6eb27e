//! Adapter that drives the external waveform generator binary.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{GeneratorError, GeneratorResult};
use crate::WaveformGenerator;

/// Waveform generator backed by a synchronous process invocation.
///
/// The external tool owns its flag surface, supported codecs, and output
/// binary layout; this adapter only maps paths and bit depth onto the
/// `-i/-o/-b` contract and surfaces the exit status.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    binary: PathBuf,
}

impl CommandGenerator {
    /// Construct an adapter around the given binary.
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl WaveformGenerator for CommandGenerator {
    async fn generate(&self, input: &Path, output: &Path, bit_depth: u8) -> GeneratorResult<()> {
        let result = Command::new(&self.binary)
            .arg("-i")
            .arg(input)
            .arg("-o")
            .arg(output)
            .arg("-b")
            .arg(bit_depth.to_string())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| GeneratorError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&result.stderr).into_owned();
        if !result.status.success() {
            warn!(
                binary = %self.binary.display(),
                status = ?result.status.code(),
                stderr = %stderr.trim(),
                "waveform generator failed"
            );
            return Err(GeneratorError::Failed {
                status: result.status.code(),
                stderr,
            });
        }

        if tokio::fs::metadata(output).await.is_err() {
            return Err(GeneratorError::MissingOutput {
                path: output.to_path_buf(),
            });
        }

        debug!(
            input = %input.display(),
            output = %output.display(),
            bit_depth,
            "waveform generated"
        );
        Ok(())
    }
}
