//! # Cleaner Module
//!
//! Applies a [`Report`] to the scanned folder.
//!
//! In [`Mode::Report`] nothing on disk is touched. In [`Mode::Clean`] every
//! redundant member of every group is removed from the folder and the
//! keeper is left alone. A member the keeper resolves to through a symlink
//! is never removed. A failed removal is logged and recorded, and the
//! remaining groups are still processed.

use crate::core::reporter::Report;
use crate::error::CleanError;
use crate::events::{null_sender, CleanEvent, Event, EventSender};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// What to do with the duplicate groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// List groups only
    #[default]
    Report,
    /// Remove every member except the keeper
    Clean,
}

/// Outcome of a clean run
#[derive(Debug, Default)]
pub struct CleanResult {
    /// Files removed, in removal order
    pub removed: Vec<PathBuf>,
    /// Removals that failed
    pub failures: Vec<CleanError>,
}

impl CleanResult {
    /// Number of removals attempted
    pub fn attempted(&self) -> usize {
        self.removed.len() + self.failures.len()
    }

    /// Check if all removals succeeded
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Summary error when at least one removal failed
    pub fn partial_failure(&self) -> Option<CleanError> {
        (!self.all_succeeded()).then(|| CleanError::PartialFailure {
            failed: self.failures.len(),
            attempted: self.attempted(),
        })
    }
}

/// Removes redundant duplicates from one folder
pub struct Cleaner {
    folder: PathBuf,
}

impl Cleaner {
    /// Create a cleaner operating on `folder`
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    /// Remove every redundant member listed in `report`
    pub fn execute(&self, report: &Report) -> CleanResult {
        self.execute_with_events(report, &null_sender())
    }

    /// Remove every redundant member listed in `report`, emitting events
    pub fn execute_with_events(&self, report: &Report, events: &EventSender) -> CleanResult {
        let mut result = CleanResult::default();

        events.send(Event::Clean(CleanEvent::Started {
            total_to_remove: report.redundant_count(),
        }));

        for group in &report.groups {
            let keeper_target = fs::canonicalize(self.folder.join(&group.keeper)).ok();

            for name in &group.redundant {
                match self.remove(name, keeper_target.as_deref()) {
                    Ok(path) => {
                        tracing::info!(path = %path.display(), "Removed duplicate");
                        events.send(Event::Clean(CleanEvent::Removed { path: path.clone() }));
                        result.removed.push(path);
                    }
                    Err(error) => {
                        tracing::error!(name = name.as_str(), %error, "Failed to remove duplicate");
                        events.send(Event::Clean(CleanEvent::Failed {
                            path: self.folder.join(name),
                            message: error.to_string(),
                        }));
                        result.failures.push(error);
                    }
                }
            }
        }

        events.send(Event::Clean(CleanEvent::Completed {
            removed: result.removed.len(),
            failed: result.failures.len(),
        }));

        result
    }

    /// Remove `name` unless the keeper resolves to the same file
    fn remove(&self, name: &str, keeper_target: Option<&Path>) -> Result<PathBuf, CleanError> {
        let path = self.resolve(name)?;
        if let Some(keeper) = keeper_target {
            if fs::canonicalize(&path).is_ok_and(|target| target == keeper) {
                return Err(CleanError::KeeperTarget {
                    path,
                    keeper: keeper.to_path_buf(),
                });
            }
        }
        fs::remove_file(&path).map_err(|source| CleanError::DeletionFailed {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Join `name` onto the folder, refusing anything but a plain file name
    fn resolve(&self, name: &str) -> Result<PathBuf, CleanError> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.folder.join(name)),
            _ => Err(CleanError::OutsideFolder {
                path: self.folder.join(name),
            }),
        }
    }
}

/// Apply `report` according to `mode`.
///
/// Returns `None` in report mode, where the filesystem is never touched.
pub fn process(
    report: &Report,
    mode: Mode,
    folder: &Path,
    events: &EventSender,
) -> Option<CleanResult> {
    match mode {
        Mode::Report => None,
        Mode::Clean => Some(Cleaner::new(folder).execute_with_events(report, events)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hasher::Fingerprint;
    use crate::core::reporter::{GroupReport, KeepReason};
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, b"pixels").unwrap();
        path
    }

    fn report(groups: &[(&str, &[&str])]) -> Report {
        Report {
            groups: groups
                .iter()
                .enumerate()
                .map(|(i, (keeper, redundant))| {
                    let mut members = vec![keeper.to_string()];
                    members.extend(redundant.iter().map(|s| s.to_string()));
                    GroupReport {
                        fingerprint: Fingerprint::from_digest(&[i as u8]),
                        members,
                        keeper: keeper.to_string(),
                        keep_reason: KeepReason::FirstInOrder,
                        redundant: redundant.iter().map(|s| s.to_string()).collect(),
                    }
                })
                .collect(),
        }
    }

    #[test]
    fn clean_removes_redundant_and_keeps_keeper() {
        let dir = TempDir::new().unwrap();
        let a = touch(&dir, "a.png");
        let b = touch(&dir, "b.png");
        let c = touch(&dir, "c.png");

        let result = Cleaner::new(dir.path()).execute(&report(&[("a.png", &["b.png"])]));

        assert!(result.all_succeeded());
        assert_eq!(result.removed, vec![b.clone()]);
        assert!(a.exists());
        assert!(!b.exists());
        assert!(c.exists());
    }

    #[test]
    fn missing_file_is_recorded_and_processing_continues() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.png");
        touch(&dir, "c.png");
        let d = touch(&dir, "d.png");

        let result = Cleaner::new(dir.path()).execute(&report(&[
            ("a.png", &["gone.png"]),
            ("c.png", &["d.png"]),
        ]));

        assert_eq!(result.removed, vec![d.clone()]);
        assert_eq!(result.failures.len(), 1);
        assert!(matches!(
            result.failures[0],
            CleanError::DeletionFailed { .. }
        ));
        assert!(!d.exists());
        assert!(matches!(
            result.partial_failure(),
            Some(CleanError::PartialFailure {
                failed: 1,
                attempted: 2
            })
        ));
    }

    #[test]
    fn names_with_separators_are_refused() {
        let dir = TempDir::new().unwrap();
        let inner = dir.path().join("inner");
        fs::create_dir(&inner).unwrap();
        touch(&dir, "keep.png");
        let outside = touch(&dir, "victim.png");

        let result = Cleaner::new(&inner).execute(&report(&[(
            "keep.png",
            &["../victim.png", "/etc/passwd"],
        )]));

        assert!(result.removed.is_empty());
        assert_eq!(result.failures.len(), 2);
        assert!(result
            .failures
            .iter()
            .all(|f| matches!(f, CleanError::OutsideFolder { .. })));
        assert!(outside.exists());
    }

    #[cfg(unix)]
    #[test]
    fn keeper_symlink_target_is_never_removed() {
        let dir = TempDir::new().unwrap();
        let b = touch(&dir, "b.png");
        let a = dir.path().join("a.png");
        std::os::unix::fs::symlink(&b, &a).unwrap();

        let result = Cleaner::new(dir.path()).execute(&report(&[("a.png", &["b.png"])]));

        assert!(result.removed.is_empty());
        assert!(matches!(
            result.failures.as_slice(),
            [CleanError::KeeperTarget { .. }]
        ));
        assert!(b.exists());
        assert_eq!(fs::read(&a).unwrap(), b"pixels");
    }

    #[test]
    fn report_mode_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let a = touch(&dir, "a.png");
        let b = touch(&dir, "b.png");

        let outcome = process(
            &report(&[("a.png", &["b.png"])]),
            Mode::Report,
            dir.path(),
            &null_sender(),
        );

        assert!(outcome.is_none());
        assert!(a.exists());
        assert!(b.exists());
    }

    #[test]
    fn clean_events_are_emitted() {
        use crate::events::EventChannel;

        let dir = TempDir::new().unwrap();
        touch(&dir, "a.png");
        touch(&dir, "b.png");
        let (sender, receiver) = EventChannel::new();

        process(
            &report(&[("a.png", &["b.png"])]),
            Mode::Clean,
            dir.path(),
            &sender,
        );
        drop(sender);

        let events: Vec<_> = receiver.iter().collect();
        assert!(matches!(
            events.first(),
            Some(Event::Clean(CleanEvent::Started { total_to_remove: 1 }))
        ));
        assert!(matches!(
            events.last(),
            Some(Event::Clean(CleanEvent::Completed {
                removed: 1,
                failed: 0
            }))
        ));
    }
}
