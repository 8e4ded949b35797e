//! # Scanner Module
//!
//! Lists the images directly inside a dataset folder.
//!
//! ## Supported Formats
//! - JPEG (`.jpg`, `.jpeg`, `.JPG`, `.JPEG`)
//! - PNG (`.png`, `.PNG`)
//!
//! Sub-directories are not descended into, and anything without one of the
//! suffixes above (label `.txt` sidecars included) is left alone.
//!
//! ## Example
//! ```rust,ignore
//! use dataset_dedup::core::scanner::{FolderScanner, ScanConfig};
//!
//! let scanner = FolderScanner::new(ScanConfig::default());
//! let result = scanner.scan(Path::new("/data/cats"))?;
//! ```

mod filter;
mod walker;

pub use filter::{ImageFilter, RECOGNIZED_SUFFIXES};
pub use walker::{FolderScanner, ScanConfig};

use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

/// An image discovered in the scanned folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFile {
    /// File name, unique within the scanned folder
    pub name: String,
    /// Full path to the file
    pub path: PathBuf,
    /// Extension exactly as it appears on disk, without the dot
    pub suffix: String,
    /// Format implied by the suffix
    pub format: ImageFormat,
    /// File size in bytes
    pub size: u64,
    /// Last modified time
    pub modified: SystemTime,
}

/// Recognized image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Detect format from a recognized suffix.
    ///
    /// Only the all-lowercase and all-uppercase spellings are recognized.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "jpg" | "jpeg" | "JPG" | "JPEG" => Some(ImageFormat::Jpeg),
            "png" | "PNG" => Some(ImageFormat::Png),
            _ => None,
        }
    }
}

/// Result of a scan operation
#[derive(Debug)]
pub struct ScanResult {
    /// Images found, sorted by file name
    pub images: Vec<ImageFile>,
    /// Entries that could not be inspected (non-fatal)
    pub errors: Vec<ScanError>,
}
