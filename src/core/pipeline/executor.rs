//! Pipeline execution implementation.

use crate::core::cleaner::{self, CleanResult, Mode};
use crate::core::grouper::{DuplicateGroup, ExactGrouper, FingerprintIndex};
use crate::core::hasher::{DigestKind, Fingerprint, Fingerprinter, HasherConfig};
use crate::core::reporter::{KeepPolicy, Report, Reporter};
use crate::core::scanner::{FolderScanner, ImageFile, ScanConfig};
use crate::error::{DuplicateFinderError, HashError};
use crate::events::{
    null_sender, Event, EventSender, HashEvent, HashProgress, PipelineEvent, PipelinePhase,
    PipelineSummary,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// An image left out of the index because it could not be fingerprinted
#[derive(Debug, Clone, Serialize)]
pub struct SkippedImage {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of pipeline execution
#[derive(Debug)]
pub struct PipelineResult {
    /// Images with a recognized suffix
    pub total_images: usize,
    /// Name-to-fingerprint index of every decodable image
    pub index: FingerprintIndex,
    /// Duplicate groups, in first-seen order
    pub groups: Vec<DuplicateGroup>,
    /// Keeper decisions for each group
    pub report: Report,
    /// Removal outcome, present in clean mode only
    pub clean: Option<CleanResult>,
    /// Images that failed to decode
    pub skipped: Vec<SkippedImage>,
    /// Folder entries that could not be inspected
    pub scan_errors: Vec<String>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Folder to scan
    pub folder: PathBuf,
    /// Report or clean
    pub mode: Mode,
    /// Which group member survives a clean run
    pub keep: KeepPolicy,
    /// Digest used for fingerprints
    pub digest: DigestKind,
    /// Fingerprint on the rayon pool
    pub parallel: bool,
    /// Scanner configuration
    pub scan_config: ScanConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::new(),
            mode: Mode::Report,
            keep: KeepPolicy::First,
            digest: DigestKind::Sha256,
            parallel: true,
            scan_config: ScanConfig::default(),
        }
    }
}

/// Builder for pipeline configuration
#[derive(Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the folder to scan
    pub fn folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.config.folder = folder.into();
        self
    }

    /// Set report or clean mode
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the keep policy
    pub fn keep(mut self, keep: KeepPolicy) -> Self {
        self.config.keep = keep;
        self
    }

    /// Set the digest algorithm
    pub fn digest(mut self, digest: DigestKind) -> Self {
        self.config.digest = digest;
        self
    }

    /// Enable or disable parallel fingerprinting
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            config: self.config,
        }
    }
}

/// Scan, fingerprint, group, then report or clean
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// The configuration this pipeline runs with
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline without events
    pub fn run(&self) -> Result<PipelineResult, DuplicateFinderError> {
        self.run_with_events(&null_sender())
    }

    /// Run the pipeline with event reporting.
    ///
    /// Only an invalid folder is fatal. Undecodable images are skipped and
    /// failed removals are recorded in [`PipelineResult::clean`].
    pub fn run_with_events(
        &self,
        events: &EventSender,
    ) -> Result<PipelineResult, DuplicateFinderError> {
        let start_time = Instant::now();
        let folder = &self.config.folder;

        events.send(Event::Pipeline(PipelineEvent::Started));

        // Phase 1: Scanning
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Scanning,
        }));

        let scanner = FolderScanner::new(self.config.scan_config.clone());
        let scan_result = scanner.scan_with_events(folder, events)?;
        let scan_errors: Vec<String> = scan_result.errors.iter().map(|e| e.to_string()).collect();
        let images = scan_result.images;
        let total_images = images.len();

        // Phase 2: Fingerprinting
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Fingerprinting,
        }));

        let hasher = HasherConfig::new().digest(self.config.digest).build();
        let (index, skipped) = self.fingerprint_all(&images, hasher.as_ref(), events);

        // Phase 3: Grouping
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Grouping,
        }));

        let groups = ExactGrouper::new().group(&index);
        let report = Reporter::new(self.config.keep).report(&groups, &images);

        tracing::info!(
            images = total_images,
            skipped = skipped.len(),
            groups = groups.len(),
            "Grouping complete"
        );

        // Phase 4: Reporting or cleaning
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: match self.config.mode {
                Mode::Report => PipelinePhase::Reporting,
                Mode::Clean => PipelinePhase::Cleaning,
            },
        }));

        let clean = cleaner::process(&report, self.config.mode, folder, events);

        let duration_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                total_images,
                skipped: skipped.len(),
                duplicate_groups: groups.len(),
                duplicate_count: report.redundant_count(),
                duration_ms,
            },
        }));

        Ok(PipelineResult {
            total_images,
            index,
            groups,
            report,
            clean,
            skipped,
            scan_errors,
            duration_ms,
        })
    }

    /// Fingerprint every image, keeping scan order in the resulting index
    fn fingerprint_all(
        &self,
        images: &[ImageFile],
        hasher: &dyn Fingerprinter,
        events: &EventSender,
    ) -> (FingerprintIndex, Vec<SkippedImage>) {
        let total = images.len();
        let completed = AtomicUsize::new(0);

        events.send(Event::Hash(HashEvent::Started {
            total_images: total,
        }));

        let fingerprint_one = |image: &ImageFile| -> Result<Fingerprint, HashError> {
            let result = hasher.fingerprint_file(&image.path);
            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            events.send(Event::Hash(HashEvent::Progress(HashProgress {
                completed: done,
                total,
                current_path: image.path.clone(),
            })));
            result
        };

        let results: Vec<Result<Fingerprint, HashError>> = if self.config.parallel {
            images.par_iter().map(fingerprint_one).collect()
        } else {
            images.iter().map(fingerprint_one).collect()
        };

        let mut index = FingerprintIndex::new();
        let mut skipped = Vec::new();

        for (image, result) in images.iter().zip(results) {
            match result {
                Ok(fingerprint) => {
                    tracing::debug!(name = %image.name, %fingerprint, "Fingerprinted");
                    index.insert(image.name.clone(), fingerprint);
                }
                Err(error) => {
                    tracing::warn!(path = %error.path().display(), %error, "Skipping image");
                    events.send(Event::Hash(HashEvent::Skipped {
                        path: image.path.clone(),
                        message: error.to_string(),
                    }));
                    skipped.push(SkippedImage {
                        path: image.path.clone(),
                        reason: error.to_string(),
                    });
                }
            }
        }

        events.send(Event::Hash(HashEvent::Completed {
            total_hashed: index.len(),
            skipped: skipped.len(),
        }));

        (index, skipped)
    }
}
