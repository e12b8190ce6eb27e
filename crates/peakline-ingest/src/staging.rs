//! Per-record staging lifecycle: write input bytes, read generated output,
//! guaranteed removal of both on every exit path.

use std::io;
use std::path::PathBuf;

use tokio::fs;
use tracing::warn;

use crate::error::{IngestError, IngestResult};
use crate::paths::staging_file_name;

/// Staged input and output paths owned by one record's processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedPaths {
    /// Local file the fetched audio payload is written to.
    pub input: PathBuf,
    /// Local file the generator writes the artifact to.
    pub output: PathBuf,
}

/// Flat, shared staging namespace with per-record file lifecycles.
///
/// Path uniqueness across concurrently processed records relies entirely on
/// [`staging_file_name`]; the area keeps no registry of in-use paths.
#[derive(Debug, Clone)]
pub struct StagingArea {
    root: PathBuf,
    substitute: char,
    output_suffix: String,
}

impl StagingArea {
    /// Construct a staging area rooted at the given directory.
    #[must_use]
    pub fn new(
        root: impl Into<PathBuf>,
        substitute: char,
        output_suffix: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            substitute,
            output_suffix: output_suffix.into(),
        }
    }

    /// Derive the staging paths for an object key. Pure; creates nothing.
    #[must_use]
    pub fn plan(&self, key: &str) -> StagedPaths {
        let name = staging_file_name(key, self.substitute);
        StagedPaths {
            input: self.root.join(&name),
            output: self.root.join(format!("{name}{}", self.output_suffix)),
        }
    }

    /// Write the fetched payload to the staged input path.
    ///
    /// # Errors
    ///
    /// Returns a staging error if the filesystem write fails.
    pub async fn stage(&self, paths: &StagedPaths, bytes: &[u8]) -> IngestResult<()> {
        fs::write(&paths.input, bytes)
            .await
            .map_err(|source| IngestError::Staging {
                operation: "stage.write_input",
                path: paths.input.clone(),
                source,
            })
    }

    /// Read the generated artifact from the staged output path.
    ///
    /// # Errors
    ///
    /// Returns a staging error if the filesystem read fails.
    pub async fn read_artifact(&self, paths: &StagedPaths) -> IngestResult<Vec<u8>> {
        fs::read(&paths.output)
            .await
            .map_err(|source| IngestError::Staging {
                operation: "read.artifact",
                path: paths.output.clone(),
                source,
            })
    }

    /// Remove both staged files, best effort.
    ///
    /// Files that were never created are not a failure; any other removal
    /// error is logged and counted, never escalated, since releasing
    /// temporary files is not part of the record's observable contract.
    pub async fn release(&self, paths: &StagedPaths) -> u32 {
        let mut failures = 0;
        for path in [&paths.input, &paths.output] {
            match fs::remove_file(path).await {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "failed to remove staged file");
                    failures += 1;
                }
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_area() -> (TempDir, StagingArea) {
        let dir = tempfile::Builder::new()
            .prefix("peakline-staging-")
            .tempdir()
            .expect("temp dir");
        let area = StagingArea::new(dir.path(), '_', ".dat");
        (dir, area)
    }

    #[test]
    fn plan_keeps_nested_keys_inside_the_root() {
        let (dir, area) = temp_area();
        let paths = area.plan("uploads/2024/song.mp3");
        assert_eq!(paths.input, dir.path().join("uploads_2024_song.mp3"));
        assert_eq!(paths.output, dir.path().join("uploads_2024_song.mp3.dat"));
    }

    #[tokio::test]
    async fn stage_read_release_round_trips() -> IngestResult<()> {
        let (_dir, area) = temp_area();
        let paths = area.plan("uploads/a.mp3");

        area.stage(&paths, b"payload").await?;
        fs::write(&paths.output, b"artifact")
            .await
            .expect("write artifact");
        assert_eq!(area.read_artifact(&paths).await?, b"artifact");

        assert_eq!(area.release(&paths).await, 0);
        assert!(!paths.input.exists());
        assert!(!paths.output.exists());
        Ok(())
    }

    #[tokio::test]
    async fn release_tolerates_files_that_were_never_created() {
        let (_dir, area) = temp_area();
        let paths = area.plan("uploads/never-staged.mp3");
        assert_eq!(area.release(&paths).await, 0);
    }

    #[tokio::test]
    async fn stage_into_missing_root_reports_staging_error() {
        let area = StagingArea::new("/definitely/missing/staging", '_', ".dat");
        let paths = area.plan("uploads/a.mp3");
        let err = area
            .stage(&paths, b"payload")
            .await
            .expect_err("expected staging failure");
        assert!(matches!(
            err,
            IngestError::Staging {
                operation: "stage.write_input",
                ..
            }
        ));
    }
}
