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
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions)]

//! Binary entrypoint that wires the Peakline services together and processes
//! one notification batch.

use peakline_app::{AppResult, run_app};

/// Bootstraps the pipeline and blocks until the batch report is written.
#[tokio::main]
async fn main() -> AppResult<()> {
    run_app().await
}
