//! Scripted waveform generator doubles.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use peakline_generator::{GeneratorError, GeneratorResult, WaveformGenerator};

/// Generator double that writes a fixed payload to the output path.
///
/// Inputs whose path contains a configured marker can be made to fail or to
/// report success without writing output, letting batch tests scope a
/// generation or read failure to a single record.
#[derive(Clone)]
pub struct StubGenerator {
    payload: Vec<u8>,
    fail_marker: Option<String>,
    silent_marker: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl StubGenerator {
    /// Construct a stub that writes the given artifact payload.
    #[must_use]
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
            fail_marker: None,
            silent_marker: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fail generation for inputs whose path contains `marker`.
    #[must_use]
    pub fn failing_on(mut self, marker: impl Into<String>) -> Self {
        self.fail_marker = Some(marker.into());
        self
    }

    /// Report success without writing output for inputs whose path contains
    /// `marker`.
    #[must_use]
    pub fn silent_on(mut self, marker: impl Into<String>) -> Self {
        self.silent_marker = Some(marker.into());
        self
    }

    /// Number of generate calls observed.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WaveformGenerator for StubGenerator {
    async fn generate(&self, input: &Path, output: &Path, _bit_depth: u8) -> GeneratorResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let input_name = input.to_string_lossy();
        if let Some(marker) = &self.fail_marker
            && input_name.contains(marker.as_str())
        {
            return Err(GeneratorError::Failed {
                status: Some(1),
                stderr: format!("marked input rejected: {input_name}"),
            });
        }
        if let Some(marker) = &self.silent_marker
            && input_name.contains(marker.as_str())
        {
            return Ok(());
        }
        tokio::fs::write(output, &self.payload)
            .await
            .map_err(|source| GeneratorError::Spawn {
                binary: PathBuf::from("stub-generator"),
                source,
            })
    }
}

/// Generator double that always reports a non-zero exit.
#[derive(Clone)]
pub struct FailingGenerator {
    status: i32,
    stderr: String,
}

impl FailingGenerator {
    /// Construct a double failing with the given exit status and stderr.
    #[must_use]
    pub fn new(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            status,
            stderr: stderr.into(),
        }
    }
}

impl Default for FailingGenerator {
    fn default() -> Self {
        Self::new(1, "synthetic generator failure")
    }
}

#[async_trait]
impl WaveformGenerator for FailingGenerator {
    async fn generate(&self, _input: &Path, _output: &Path, _bit_depth: u8) -> GeneratorResult<()> {
        Err(GeneratorError::Failed {
            status: Some(self.status),
            stderr: self.stderr.clone(),
        })
    }
}

/// Generator double that reports success without writing any output.
///
/// Violates the trait contract on purpose so orchestrator tests can exercise
/// the read-after-generate failure path.
#[derive(Clone, Copy, Default)]
pub struct SilentGenerator;

#[async_trait]
impl WaveformGenerator for SilentGenerator {
    async fn generate(&self, _input: &Path, _output: &Path, _bit_depth: u8) -> GeneratorResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_writes_payload_and_counts_calls() -> GeneratorResult<()> {
        let dir = std::env::temp_dir();
        let output = dir.join("peakline-test-support-stub.dat");
        let stub = StubGenerator::new(b"artifact".to_vec());
        stub.generate(Path::new("in.mp3"), &output, 8).await?;
        assert_eq!(stub.calls(), 1);
        assert_eq!(std::fs::read(&output).expect("read output"), b"artifact");
        let _ = std::fs::remove_file(&output);
        Ok(())
    }

    #[tokio::test]
    async fn markers_scope_failures_to_matching_inputs() {
        let stub = StubGenerator::new(b"artifact".to_vec())
            .failing_on("corrupt")
            .silent_on("silent");

        let err = stub
            .generate(Path::new("uploads_corrupt.mp3"), Path::new("out.dat"), 8)
            .await
            .expect_err("marked input should fail");
        assert!(matches!(err, GeneratorError::Failed { .. }));

        stub.generate(Path::new("uploads_silent.mp3"), Path::new("out.dat"), 8)
            .await
            .expect("silent input should report success");
        assert!(!Path::new("out.dat").exists());
    }

    #[tokio::test]
    async fn failing_generator_reports_status() {
        let generator = FailingGenerator::new(3, "bad input");
        let err = generator
            .generate(Path::new("in.mp3"), Path::new("out.dat"), 8)
            .await
            .expect_err("expected failure");
        assert!(matches!(
            err,
            GeneratorError::Failed {
                status: Some(3),
                ..
            }
        ));
    }
}
