//! # Reporter Module
//!
//! Decides which member of each duplicate group is kept and lists the rest.
//!
//! The keeper choice is the only destructive decision the tool makes, so it
//! is driven by an explicit [`KeepPolicy`] and recorded with a
//! [`KeepReason`] in every [`GroupReport`].

use crate::core::grouper::DuplicateGroup;
use crate::core::hasher::Fingerprint;
use crate::core::scanner::ImageFile;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::SystemTime;

/// Which member of a group survives a clean run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeepPolicy {
    /// First member in group order (scan order, i.e. by file name)
    #[default]
    First,
    /// Earliest modification time
    Oldest,
    /// Latest modification time
    Newest,
}

impl std::fmt::Display for KeepPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeepPolicy::First => write!(f, "first"),
            KeepPolicy::Oldest => write!(f, "oldest"),
            KeepPolicy::Newest => write!(f, "newest"),
        }
    }
}

/// Reason a specific member was kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeepReason {
    /// First in group order
    FirstInOrder,
    /// Oldest modification time
    OldestTimestamp,
    /// Newest modification time
    NewestTimestamp,
}

impl std::fmt::Display for KeepReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeepReason::FirstInOrder => write!(f, "First in folder order"),
            KeepReason::OldestTimestamp => write!(f, "Oldest file"),
            KeepReason::NewestTimestamp => write!(f, "Newest file"),
        }
    }
}

/// Keeper decision for one duplicate group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReport {
    /// The shared fingerprint
    pub fingerprint: Fingerprint,
    /// All members in group order
    pub members: Vec<String>,
    /// The member that is kept
    pub keeper: String,
    /// Why that member is kept
    pub keep_reason: KeepReason,
    /// Members a clean run removes, in group order
    pub redundant: Vec<String>,
}

/// Keeper decisions for every group of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub groups: Vec<GroupReport>,
}

impl Report {
    /// Number of duplicate groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of files a clean run removes
    pub fn redundant_count(&self) -> usize {
        self.groups.iter().map(|g| g.redundant.len()).sum()
    }

    /// Every file a clean run removes, group by group
    pub fn redundant_names(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.redundant.iter().map(String::as_str))
    }
}

/// Builds [`Report`]s from duplicate groups
pub struct Reporter {
    policy: KeepPolicy,
}

impl Reporter {
    /// Create a reporter applying `policy`
    pub fn new(policy: KeepPolicy) -> Self {
        Self { policy }
    }

    /// Decide the keeper of every group.
    ///
    /// `images` supplies modification times; members missing from it are
    /// treated as having no timestamp and never win a timestamp policy.
    pub fn report(&self, groups: &[DuplicateGroup], images: &[ImageFile]) -> Report {
        let modified: HashMap<&str, SystemTime> = images
            .iter()
            .map(|image| (image.name.as_str(), image.modified))
            .collect();

        let groups = groups
            .iter()
            .filter(|group| !group.is_empty())
            .map(|group| {
                let times: Vec<Option<SystemTime>> = group
                    .members
                    .iter()
                    .map(|name| modified.get(name.as_str()).copied())
                    .collect();
                let (keeper_idx, keep_reason) = select_keeper(&times, self.policy);

                GroupReport {
                    fingerprint: group.fingerprint.clone(),
                    members: group.members.clone(),
                    keeper: group.members[keeper_idx].clone(),
                    keep_reason,
                    redundant: group
                        .members
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i != keeper_idx)
                        .map(|(_, name)| name.clone())
                        .collect(),
                }
            })
            .collect();

        Report { groups }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(KeepPolicy::default())
    }
}

/// Pick the index of the member to keep.
///
/// Ties, and groups where no member has a timestamp, resolve to the earliest
/// position so the choice is stable for a given scan order.
pub fn select_keeper(modified: &[Option<SystemTime>], policy: KeepPolicy) -> (usize, KeepReason) {
    let pick = |newer_wins: bool| {
        let mut best: Option<(usize, SystemTime)> = None;
        for (idx, time) in modified.iter().enumerate() {
            let Some(time) = *time else { continue };
            let better = match best {
                None => true,
                Some((_, current)) if newer_wins => time > current,
                Some((_, current)) => time < current,
            };
            if better {
                best = Some((idx, time));
            }
        }
        best.map(|(idx, _)| idx)
    };

    match policy {
        KeepPolicy::First => (0, KeepReason::FirstInOrder),
        KeepPolicy::Oldest => pick(false)
            .map(|idx| (idx, KeepReason::OldestTimestamp))
            .unwrap_or((0, KeepReason::FirstInOrder)),
        KeepPolicy::Newest => pick(true)
            .map(|idx| (idx, KeepReason::NewestTimestamp))
            .unwrap_or((0, KeepReason::FirstInOrder)),
    }
}
