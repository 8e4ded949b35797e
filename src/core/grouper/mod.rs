//! # Grouper Module
//!
//! Turns a fingerprint index into duplicate groups.
//!
//! ## How It Works
//! 1. Walk the index in insertion order
//! 2. Collect names per fingerprint
//! 3. Keep every fingerprint shared by two or more names
//!
//! Groups are disjoint and, together with the unique images, cover the
//! whole index.

mod exact;
mod index;

pub use exact::ExactGrouper;
pub use index::FingerprintIndex;

use crate::core::hasher::Fingerprint;
use serde::{Deserialize, Serialize};

/// Names of images sharing one fingerprint (always at least two)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// The shared fingerprint
    pub fingerprint: Fingerprint,
    /// Member names in index order
    pub members: Vec<String>,
}

impl DuplicateGroup {
    /// Create a new duplicate group
    pub fn new(fingerprint: Fingerprint, members: Vec<String>) -> Self {
        Self {
            fingerprint,
            members,
        }
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of redundant copies (members beyond the keeper)
    pub fn duplicate_count(&self) -> usize {
        self.members.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_membership() {
        let group = DuplicateGroup::new(
            Fingerprint::from_digest(&[1]),
            vec!["a.png".to_string(), "b.png".to_string()],
        );

        assert_eq!(group.len(), 2);
        assert_eq!(group.duplicate_count(), 1);
    }
}
