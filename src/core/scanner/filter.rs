//! File filtering logic for the scanner.

use super::ImageFormat;
use std::path::Path;

/// Extensions accepted by the scanner, matched exactly.
pub const RECOGNIZED_SUFFIXES: [&str; 6] = ["jpeg", "jpg", "png", "JPEG", "PNG", "JPG"];

/// Decides which directory entries are images worth fingerprinting
pub struct ImageFilter {
    suffixes: Vec<String>,
}

impl ImageFilter {
    /// Create a filter accepting the recognized image suffixes
    pub fn new() -> Self {
        Self {
            suffixes: RECOGNIZED_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Returns the suffix of `path` if it is one of the accepted ones
    pub fn accepted_suffix<'a>(&self, path: &'a Path) -> Option<&'a str> {
        let ext = path.extension()?.to_str()?;
        self.suffixes.iter().any(|s| s == ext).then_some(ext)
    }

    /// Get the image format for a path
    pub fn get_format(&self, path: &Path) -> Option<ImageFormat> {
        self.accepted_suffix(path).and_then(ImageFormat::from_suffix)
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}
