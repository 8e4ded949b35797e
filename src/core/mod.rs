//! # Core Module
//!
//! The terminal-agnostic duplicate detection engine.
//!
//! ## Modules
//! - `scanner` - Lists images in a folder
//! - `hasher` - Computes content fingerprints
//! - `grouper` - Groups images sharing a fingerprint
//! - `reporter` - Picks the keeper of each group
//! - `cleaner` - Removes everything but the keepers
//! - `pipeline` - Orchestrates the full workflow

pub mod cleaner;
pub mod grouper;
pub mod hasher;
pub mod pipeline;
pub mod reporter;
pub mod scanner;

// Re-export commonly used types
pub use cleaner::{CleanResult, Mode};
pub use grouper::{DuplicateGroup, FingerprintIndex};
pub use hasher::{DigestKind, Fingerprint};
pub use reporter::{KeepPolicy, Report};
pub use scanner::ImageFile;
