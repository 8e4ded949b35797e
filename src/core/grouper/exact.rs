//! Groups images that share a fingerprint.
//!
//! Fingerprint equality is an equivalence relation, so inverting the index
//! (fingerprint -> names) partitions the images directly; no pairwise
//! comparison or union-find is needed.

use super::{DuplicateGroup, FingerprintIndex};
use crate::core::hasher::Fingerprint;
use std::collections::HashMap;

/// Groups images with identical fingerprints
pub struct ExactGrouper;

impl ExactGrouper {
    /// Create a new grouper
    pub fn new() -> Self {
        Self
    }

    /// Build one group per fingerprint shared by two or more names.
    ///
    /// Groups come out in order of their fingerprint's first appearance in
    /// the index, and members in index order.
    pub fn group(&self, index: &FingerprintIndex) -> Vec<DuplicateGroup> {
        let mut slots: HashMap<&Fingerprint, usize> = HashMap::new();
        let mut buckets: Vec<(&Fingerprint, Vec<String>)> = Vec::new();

        for (name, fingerprint) in index.iter() {
            let slot = *slots.entry(fingerprint).or_insert_with(|| {
                buckets.push((fingerprint, Vec::new()));
                buckets.len() - 1
            });
            buckets[slot].1.push(name.to_string());
        }

        buckets
            .into_iter()
            .filter(|(_, members)| members.len() >= 2)
            .map(|(fingerprint, members)| DuplicateGroup::new(fingerprint.clone(), members))
            .collect()
    }
}

impl Default for ExactGrouper {
    fn default() -> Self {
        Self::new()
    }
}
