//! # Dataset Dedup
//!
//! Finds images in a labeling dataset folder whose decoded pixels are
//! identical, and optionally removes all but one copy of each.
//!
//! ## Core Philosophy
//! - **Pixels, not bytes** - re-encoded or re-tagged copies still match
//! - **Predictable keeper** - the surviving copy follows an explicit policy
//! - **Never stop halfway silently** - every skip and failed removal is reported
//!
//! ## Architecture
//! - `core` - Scanning, fingerprinting, grouping, reporting and cleaning
//! - `events` - Progress events for the presentation layer
//! - `error` - Error types
//! - `cli` (binary only) - Command-line interface

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{DuplicateFinderError, Result};

/// Initialize tracing for the binary.
///
/// Logs go to stderr so stdout carries only the report. `RUST_LOG` wins
/// over `default_directive` when set.
pub fn init_tracing(default_directive: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
