//! Shared test doubles for the Peakline workspace.
//!
//! Layout: `store.rs` (in-memory object store with failure injection),
//! `generator.rs` (scripted waveform generator doubles).

pub mod generator;
pub mod store;

pub use generator::{FailingGenerator, SilentGenerator, StubGenerator};
pub use store::MemoryStore;
