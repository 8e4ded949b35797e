//! Name-to-fingerprint index built by the fingerprint phase.

use crate::core::hasher::Fingerprint;
use std::collections::HashMap;

/// Mapping from image name to fingerprint, kept in insertion order.
///
/// Only images that decoded successfully are ever inserted.
#[derive(Debug, Clone, Default)]
pub struct FingerprintIndex {
    entries: Vec<(String, Fingerprint)>,
    positions: HashMap<String, usize>,
}

impl FingerprintIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the fingerprint for `name`.
    ///
    /// A replaced entry keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, fingerprint: Fingerprint) {
        let name = name.into();
        match self.positions.get(&name) {
            Some(&pos) => self.entries[pos].1 = fingerprint,
            None => {
                self.positions.insert(name.clone(), self.entries.len());
                self.entries.push((name, fingerprint));
            }
        }
    }

    /// Look up the fingerprint for `name`
    pub fn get(&self, name: &str) -> Option<&Fingerprint> {
        self.positions.get(name).map(|&pos| &self.entries[pos].1)
    }

    /// Number of indexed images
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Fingerprint)> {
        self.entries.iter().map(|(name, fp)| (name.as_str(), fp))
    }
}

impl<S: Into<String>> FromIterator<(S, Fingerprint)> for FingerprintIndex {
    fn from_iter<I: IntoIterator<Item = (S, Fingerprint)>>(iter: I) -> Self {
        let mut index = FingerprintIndex::new();
        for (name, fingerprint) in iter {
            index.insert(name, fingerprint);
        }
        index
    }
}
