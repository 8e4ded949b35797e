//! # Hasher Module
//!
//! Computes content fingerprints for images.
//!
//! ## How It Works
//! 1. Decode the file (format sniffed from content)
//! 2. Convert to canonical 8-bit RGB
//! 3. Digest the dimensions followed by the row-major pixel bytes
//! 4. Hex-encode the digest
//!
//! File name, modification time and embedded metadata (EXIF, text chunks)
//! never reach the digest, so they cannot make two copies look different.
//!
//! ## Example
//! ```rust,ignore
//! use dataset_dedup::core::hasher::{DigestKind, HasherConfig};
//!
//! let hasher = HasherConfig::new().digest(DigestKind::Sha256).build();
//! let fingerprint = hasher.fingerprint_file(&path)?;
//! ```

mod algorithms;
pub mod decode;
mod traits;

pub use algorithms::{Blake3Fingerprinter, Sha256Fingerprinter};
pub use traits::{DigestKind, Fingerprint, Fingerprinter};

/// Configuration builder for fingerprinters
#[derive(Debug, Clone, Default)]
pub struct HasherConfig {
    digest: DigestKind,
}

impl HasherConfig {
    /// Create a new configuration with the default digest
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the digest algorithm
    pub fn digest(mut self, digest: DigestKind) -> Self {
        self.digest = digest;
        self
    }

    /// Build the fingerprinter
    pub fn build(self) -> Box<dyn Fingerprinter> {
        match self.digest {
            DigestKind::Sha256 => Box::new(Sha256Fingerprinter),
            DigestKind::Blake3 => Box::new(Blake3Fingerprinter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_sha256() {
        let hasher = HasherConfig::new().build();
        assert_eq!(hasher.kind(), DigestKind::Sha256);
    }

    #[test]
    fn config_builder_selects_digest() {
        let hasher = HasherConfig::new().digest(DigestKind::Blake3).build();
        assert_eq!(hasher.kind(), DigestKind::Blake3);
    }
}
