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

//! Ingestion pipeline for storage-change notification batches.
//!
//! Each eligible record is fetched from the object store, staged locally,
//! run through the external waveform generator, and its artifact uploaded
//! under a derived key. Records are processed concurrently; one record's
//! failure never disturbs its siblings, and staged files are released on
//! every exit path.
//!
//! Layout: `notification.rs` (trigger payload model), `paths.rs` (pure key
//! translation), `staging.rs` (per-record staging lifecycle), `outcome.rs`
//! (per-record terminal outcomes), `service.rs` (the batch orchestrator).

pub mod error;
pub mod notification;
pub mod outcome;
pub mod paths;
pub mod service;
pub mod staging;

pub use error::{IngestError, IngestResult};
pub use notification::{NotificationBatch, NotificationRecord, StorageChange};
pub use outcome::{FailureKind, RecordOutcome, SkipReason};
pub use paths::{destination_key, staging_file_name};
pub use service::IngestService;
pub use staging::{StagedPaths, StagingArea};
