//! Trait definitions for content fingerprinting.

use super::decode::decode_canonical;
use crate::error::HashError;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Available digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestKind {
    /// SHA-256 (default)
    #[default]
    Sha256,
    /// BLAKE3, faster on large images
    Blake3,
}

impl std::fmt::Display for DigestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigestKind::Sha256 => write!(f, "sha256"),
            DigestKind::Blake3 => write!(f, "blake3"),
        }
    }
}

/// Hex-encoded content digest of one image.
///
/// Equal fingerprints mean equal canonical pixel content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Build a fingerprint from raw digest bytes
    pub fn from_digest(bytes: &[u8]) -> Self {
        Self(bytes.iter().map(|b| format!("{:02x}", b)).collect())
    }

    /// The lowercase hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for terminal output
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for fingerprint implementations
pub trait Fingerprinter: Send + Sync {
    /// Digest canonical pixels.
    ///
    /// The width and height are digested ahead of the row-major pixel bytes
    /// so that equal byte runs with different shapes do not collide.
    fn fingerprint_pixels(&self, pixels: &RgbImage) -> Fingerprint;

    /// Decode `path` to canonical RGB and digest it
    fn fingerprint_file(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let pixels = decode_canonical(path)?;
        Ok(self.fingerprint_pixels(&pixels))
    }

    /// Get the digest kind
    fn kind(&self) -> DigestKind;
}

/// Header digested before the pixel bytes
pub(super) fn shape_header(pixels: &RgbImage) -> [u8; 8] {
    let (width, height) = pixels.dimensions();
    let mut header = [0u8; 8];
    header[..4].copy_from_slice(&width.to_be_bytes());
    header[4..].copy_from_slice(&height.to_be_bytes());
    header
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_digest_produces_lowercase_hex() {
        let fp = Fingerprint::from_digest(&[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(fp.as_str(), "deadbeef");
        assert_eq!(fp.to_string(), "deadbeef");
    }

    #[test]
    fn short_form_is_a_prefix() {
        let fp = Fingerprint::from_digest(&[0xAB; 32]);
        assert_eq!(fp.short().len(), 12);
        assert!(fp.as_str().starts_with(fp.short()));
    }

    #[test]
    fn fingerprint_serializes_as_plain_string() {
        let fp = Fingerprint::from_digest(&[0x01, 0x02]);
        assert_eq!(serde_json::to_string(&fp).unwrap(), "\"0102\"");
    }

    #[test]
    fn shape_header_encodes_dimensions() {
        let pixels = RgbImage::new(2, 3);
        assert_eq!(shape_header(&pixels), [0, 0, 0, 2, 0, 0, 0, 3]);
    }

    #[test]
    fn digest_kind_display() {
        assert_eq!(DigestKind::Sha256.to_string(), "sha256");
        assert_eq!(DigestKind::Blake3.to_string(), "blake3");
        assert_eq!(DigestKind::default(), DigestKind::Sha256);
    }
}
