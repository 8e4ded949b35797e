//! # Error Module
//!
//! Error types for the identical image finder.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - every error names the path involved
//! - **Separate stages** - scanning, hashing and cleaning fail differently

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum DuplicateFinderError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Cleaning error: {0}")]
    Clean(#[from] CleanError),

    #[error("Output error: {0}")]
    Output(String),
}

/// Errors that occur while listing the image folder
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("\"{path}\" does not exist or is a file")]
    InvalidFolder { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while fingerprinting a single image
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to decode image {path}: {reason}")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Failed to open image file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Path of the image that could not be fingerprinted
    pub fn path(&self) -> &PathBuf {
        match self {
            HashError::DecodeError { path, .. } | HashError::IoError { path, .. } => path,
        }
    }
}

/// Errors that occur while removing duplicates
#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Failed to remove {path}: {source}")]
    DeletionFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to remove {path}: not inside the scanned folder")]
    OutsideFolder { path: PathBuf },

    #[error("Refusing to remove {path}: the kept copy {keeper} resolves to it")]
    KeeperTarget { path: PathBuf, keeper: PathBuf },

    #[error("{failed} of {attempted} removals failed")]
    PartialFailure { failed: usize, attempted: usize },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DuplicateFinderError>;
