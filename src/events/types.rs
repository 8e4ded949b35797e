//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the duplicate finder pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Folder scanning events
    Scan(ScanEvent),
    /// Fingerprinting events
    Hash(HashEvent),
    /// Duplicate removal events
    Clean(CleanEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events during the scanning phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Scanning has started
    Started { folder: PathBuf },
    /// An image with a recognized extension was found
    ImageFound { path: PathBuf },
    /// Scanning completed
    Completed { total_images: usize },
}

/// Events during the fingerprinting phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HashEvent {
    /// Fingerprinting has started
    Started { total_images: usize },
    /// Progress update during fingerprinting
    Progress(HashProgress),
    /// An image could not be decoded and was skipped
    Skipped { path: PathBuf, message: String },
    /// Fingerprinting completed
    Completed { total_hashed: usize, skipped: usize },
}

/// Progress information during fingerprinting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashProgress {
    /// Number of images processed so far
    pub completed: usize,
    /// Total number of images to process
    pub total: usize,
    /// Image that was just processed
    pub current_path: PathBuf,
}

/// Events during the clean phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CleanEvent {
    /// Removal has started
    Started { total_to_remove: usize },
    /// A duplicate was removed
    Removed { path: PathBuf },
    /// A duplicate could not be removed
    Failed { path: PathBuf, message: String },
    /// Removal completed
    Completed { removed: usize, failed: usize },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Pipeline has started
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// Pipeline completed successfully
    Completed { summary: PipelineSummary },
}

/// Phases of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Scanning,
    Fingerprinting,
    Grouping,
    Reporting,
    Cleaning,
}

/// Summary of pipeline results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Images with a recognized extension
    pub total_images: usize,
    /// Images skipped because they could not be decoded
    pub skipped: usize,
    /// Number of duplicate groups found
    pub duplicate_groups: usize,
    /// Number of redundant copies (group members beyond the keeper)
    pub duplicate_count: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Scanning => write!(f, "Scanning"),
            PipelinePhase::Fingerprinting => write!(f, "Computing hashes"),
            PipelinePhase::Grouping => write!(f, "Grouping"),
            PipelinePhase::Reporting => write!(f, "Reporting"),
            PipelinePhase::Cleaning => write!(f, "Removing duplicates"),
        }
    }
}
