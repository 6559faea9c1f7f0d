//! SimDupe - Exact and Near-Duplicate File Finder
//!
//! Walks a directory tree, groups byte-identical files by BLAKE3
//! fingerprint, and optionally groups near-duplicates: images by
//! difference hash, audio by numbered-copy names, documents and archives
//! by size and name heuristics (with optional external comparers).

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io::Write;

use anyhow::{anyhow, Context, Result};
use bytesize::ByteSize;

use cli::Cli;
use config::Config;
use duplicates::{CategoryMatcher, GroupingEngine};
use error::ExitCode;
use output::ReportOutput;
use progress::{Progress, ProgressCallback};
use scanner::{PerceptualHasher, Walker};

const USAGE: &str = "Usage: simdupe [OPTIONS] <DIRECTORY> [--similar]";

/// Run the application against stdout.
///
/// # Errors
///
/// See [`run`].
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    run(cli, &mut handle)
}

/// Run the application, writing the group report to `out`.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the directory
/// argument is missing, or the report cannot be written. A root that does
/// not exist or is not a directory is logged and scanned as empty.
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if cli.print_config {
        write!(out, "{}", config.to_toml()?)?;
        return Ok(ExitCode::Success);
    }

    let root = cli
        .path
        .ok_or_else(|| anyhow!("missing DIRECTORY argument\n\n{}", USAGE))?;

    let records = match Walker::new(&root, config.walker_config()).catalog() {
        Ok(records) => records,
        Err(e) => {
            log::warn!("{}", e);
            Vec::new()
        }
    };
    if records.is_empty() {
        log::info!("No files to compare in {}", root.display());
        return Ok(ExitCode::Success);
    }

    let total_size: u64 = records.iter().map(|r| r.size).sum();
    log::info!(
        "Found {} files ({}) in {}",
        records.len(),
        ByteSize(total_size),
        root.display()
    );

    let matcher = CategoryMatcher::new(PerceptualHasher::default(), config.comparers.build());
    let progress = (!cli.quiet && !cli.no_progress).then(Progress::new);

    let mut engine = GroupingEngine::new(&matcher).with_progress_interval(config.progress_interval);
    if let Some(progress) = progress.as_ref() {
        engine = engine.with_progress(progress as &dyn ProgressCallback);
    }

    let outcome = engine.run(records, cli.similar);
    ReportOutput::new(&outcome)
        .write_to(&mut *out)
        .context("Failed to write report")?;

    let reclaimable: u64 = outcome
        .exact
        .iter()
        .map(|group| group.total_size() - group.anchor().size)
        .sum();
    log::info!(
        "{} exact groups ({} reclaimable), {} similar groups",
        outcome.exact.len(),
        ByteSize(reclaimable),
        outcome.similar.len()
    );

    Ok(ExitCode::Success)
}
