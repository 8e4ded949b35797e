//! # CLI Module
//!
//! Command-line interface for the identical image finder.
//!
//! ## Usage
//! ```bash
//! # List sets of identical images
//! find-identical --folder ~/datasets/cats
//!
//! # Remove all but the oldest copy of each set
//! find-identical --folder ~/datasets/cats --clean --keep oldest
//!
//! # JSON output
//! find-identical --folder ~/datasets/cats --output json
//! ```

use clap::{Parser, ValueEnum};
use console::{style, Term};
use dataset_dedup::core::cleaner::{CleanResult, Mode};
use dataset_dedup::core::hasher::DigestKind;
use dataset_dedup::core::pipeline::{Pipeline, PipelineResult};
use dataset_dedup::core::reporter::KeepPolicy;
use dataset_dedup::error::{DuplicateFinderError, Result};
use dataset_dedup::events::{Event, EventChannel, HashEvent, PipelineEvent, ScanEvent};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;

/// Exit status when at least one duplicate could not be removed
const EXIT_PARTIAL_CLEAN: u8 = 3;

/// Identical Images Finder - find pixel-identical images in a dataset folder
#[derive(Parser, Debug)]
#[command(name = "find-identical")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder containing the images
    #[arg(short, long)]
    folder: PathBuf,

    /// Remove every copy except the keeper of each set
    #[arg(short, long)]
    clean: bool,

    /// Which copy of each set is kept
    #[arg(short, long, default_value = "first")]
    keep: Keep,

    /// Digest used to fingerprint pixels
    #[arg(short, long, default_value = "sha256")]
    digest: Digest,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    output: OutputFormat,

    /// Fingerprint one image at a time
    #[arg(long)]
    sequential: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Keep {
    /// First file of the set by name
    First,
    /// File with the oldest modification time
    Oldest,
    /// File with the newest modification time
    Newest,
}

impl From<Keep> for KeepPolicy {
    fn from(keep: Keep) -> Self {
        match keep {
            Keep::First => KeepPolicy::First,
            Keep::Oldest => KeepPolicy::Oldest,
            Keep::Newest => KeepPolicy::Newest,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Digest {
    /// SHA-256
    Sha256,
    /// BLAKE3
    Blake3,
}

impl From<Digest> for DigestKind {
    fn from(digest: Digest) -> Self {
        match digest {
            Digest::Sha256 => DigestKind::Sha256,
            Digest::Blake3 => DigestKind::Blake3,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Pretty,
    /// JSON output for scripting
    Json,
    /// Paths only
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    dataset_dedup::init_tracing(if cli.verbose { "debug" } else { "warn" });

    let mode = if cli.clean { Mode::Clean } else { Mode::Report };
    let pipeline = Pipeline::builder()
        .folder(cli.folder.clone())
        .mode(mode)
        .keep(cli.keep.into())
        .digest(cli.digest.into())
        .parallel(!cli.sequential)
        .build();

    let (sender, receiver) = EventChannel::new();

    let progress = if matches!(cli.output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let verbose = cli.verbose;

    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };
            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    pb.set_message(phase.to_string());
                }
                Event::Scan(ScanEvent::Completed { total_images }) => {
                    pb.set_length(total_images as u64);
                }
                Event::Hash(HashEvent::Progress(p)) => {
                    pb.set_position(p.completed as u64);
                    if verbose {
                        pb.set_message(
                            p.current_path
                                .file_name()
                                .unwrap_or_default()
                                .to_string_lossy()
                                .to_string(),
                        );
                    }
                }
                Event::Pipeline(PipelineEvent::Completed { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = pipeline.run_with_events(&sender);

    drop(sender);
    event_thread.join().ok();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let result = result?;

    match cli.output {
        OutputFormat::Pretty => print_pretty_results(&cli.folder, &result),
        OutputFormat::Json => print_json_results(&cli, &result)?,
        OutputFormat::Minimal => print_minimal_results(&cli.folder, &result),
    }

    Ok(exit_code(result.clean.as_ref()))
}

fn exit_code(clean: Option<&CleanResult>) -> ExitCode {
    match clean.and_then(CleanResult::partial_failure) {
        Some(error) => {
            eprintln!("{}", style(error).red());
            ExitCode::from(EXIT_PARTIAL_CLEAN)
        }
        None => ExitCode::SUCCESS,
    }
}

/// Stderr lines for everything left out of the run
fn problem_lines(result: &PipelineResult) -> Vec<String> {
    let mut lines = Vec::new();
    if !result.scan_errors.is_empty() {
        lines.push(format!(
            "{} {} folder entr{} could not be read",
            style("!").yellow().bold(),
            result.scan_errors.len(),
            if result.scan_errors.len() == 1 { "y" } else { "ies" }
        ));
    }
    if !result.skipped.is_empty() {
        lines.push(format!(
            "{} {} image(s) could not be decoded and were skipped",
            style("!").yellow().bold(),
            result.skipped.len()
        ));
    }
    lines
}

fn print_pretty_results(folder: &Path, result: &PipelineResult) {
    let term = Term::stderr();

    for line in problem_lines(result) {
        term.write_line(&line).ok();
    }

    println!(
        "Found {} sets of identical images!",
        result.report.group_count()
    );

    match &result.clean {
        None => {
            for (i, group) in result.report.groups.iter().enumerate() {
                println!(
                    "{} {} ({} images)",
                    style(format!("Set {}:", i + 1)).bold(),
                    style(group.fingerprint.short()).dim(),
                    group.members.len()
                );
                for member in &group.members {
                    let marker = if member == &group.keeper {
                        style("★").green().to_string()
                    } else {
                        style("○").dim().to_string()
                    };
                    println!("  {} {}", marker, member);
                }
            }
        }
        Some(clean) => {
            for group in &result.report.groups {
                println!("{} Kept {}", style("★").green(), group.keeper);
            }
            for path in &clean.removed {
                println!("Removed {}", path.display());
            }
            for failure in &clean.failures {
                term.write_line(&format!("{} {}", style("✗").red().bold(), failure))
                    .ok();
            }
            if result.report.group_count() > 0 {
                term.write_line(&format!(
                    "{}",
                    style(format!(
                        "Kept one file per set ({} removed from {})",
                        clean.removed.len(),
                        folder.display()
                    ))
                    .dim()
                ))
                .ok();
            }
        }
    }

    println!("Done!");
}

fn print_json_results(cli: &Cli, result: &PipelineResult) -> Result<()> {
    let mode = if cli.clean { Mode::Clean } else { Mode::Report };
    let output = serde_json::json!({
        "folder": cli.folder,
        "mode": mode,
        "keep": KeepPolicy::from(cli.keep),
        "digest": DigestKind::from(cli.digest),
        "total_images": result.total_images,
        "duplicate_groups": result.report.group_count(),
        "duplicate_count": result.report.redundant_count(),
        "duration_ms": result.duration_ms,
        "groups": result.report.groups,
        "skipped": result.skipped,
        "scan_errors": result.scan_errors,
        "removed": result.clean.as_ref().map(|c| &c.removed),
        "failures": result
            .clean
            .as_ref()
            .map(|c| c.failures.iter().map(|f| f.to_string()).collect::<Vec<_>>()),
    });

    let text = serde_json::to_string_pretty(&output)
        .map_err(|e| DuplicateFinderError::Output(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn print_minimal_results(folder: &Path, result: &PipelineResult) {
    match &result.clean {
        None => {
            for name in result.report.redundant_names() {
                println!("{}", folder.join(name).display());
            }
        }
        Some(clean) => {
            for path in &clean.removed {
                println!("{}", path.display());
            }
        }
    }
}
