//! Digest implementations.

use super::traits::{shape_header, DigestKind, Fingerprint, Fingerprinter};
use image::RgbImage;
use sha2::{Digest, Sha256};

/// SHA-256 fingerprinter
#[derive(Debug, Clone, Default)]
pub struct Sha256Fingerprinter;

impl Fingerprinter for Sha256Fingerprinter {
    fn fingerprint_pixels(&self, pixels: &RgbImage) -> Fingerprint {
        let mut hasher = Sha256::new();
        hasher.update(shape_header(pixels));
        hasher.update(pixels.as_raw());
        Fingerprint::from_digest(&hasher.finalize())
    }

    fn kind(&self) -> DigestKind {
        DigestKind::Sha256
    }
}

/// BLAKE3 fingerprinter
#[derive(Debug, Clone, Default)]
pub struct Blake3Fingerprinter;

impl Fingerprinter for Blake3Fingerprinter {
    fn fingerprint_pixels(&self, pixels: &RgbImage) -> Fingerprint {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&shape_header(pixels));
        hasher.update(pixels.as_raw());
        Fingerprint::from_digest(hasher.finalize().as_bytes())
    }

    fn kind(&self) -> DigestKind {
        DigestKind::Blake3
    }
}
