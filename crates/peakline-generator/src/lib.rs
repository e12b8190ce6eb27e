//! Generator-agnostic waveform interfaces.
//!
//! The pipeline treats waveform generation as an opaque external collaborator:
//! given a staged input file and a desired output path and bit depth, it either
//! produces a waveform data file or fails. `command.rs` holds the adapter that
//! drives the external native binary.

pub mod command;
pub mod error;

use std::path::Path;

use async_trait::async_trait;

pub use command::CommandGenerator;
pub use error::{GeneratorError, GeneratorResult};

/// Waveform generation seam implemented by adapters and test doubles.
#[async_trait]
pub trait WaveformGenerator: Send + Sync {
    /// Produce a waveform data file at `output` from the audio at `input`.
    ///
    /// Implementations must not return `Ok` unless a readable file exists at
    /// `output` when the call completes.
    async fn generate(&self, input: &Path, output: &Path, bit_depth: u8) -> GeneratorResult<()>;
}
