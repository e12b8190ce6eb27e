#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! File-backed configuration for the Peakline pipeline.
//!
//! Layout: `model.rs` (typed config models), `defaults.rs` (baseline values),
//! `loader.rs` (JSON document loading and environment overrides),
//! `validate.rs` (validation helpers).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::load;
pub use model::{AppConfig, GeneratorSettings, LoggingSettings, PipelinePolicy, StoreSettings};
pub use validate::validate;
