//! Command-line interface definitions for SimDupe.
//!
//! # Example
//!
//! ```bash
//! # Exact duplicates only
//! simdupe ~/Downloads
//!
//! # Exact duplicates, then near-duplicates
//! simdupe ~/Downloads --similar
//!
//! # Debug logging with a specific config file
//! simdupe -v --config ./simdupe.toml ~/Downloads --similar
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Exact and near-duplicate file finder.
///
/// Groups byte-identical files, and with --similar also groups images,
/// audio, documents and archives that look like copies of each other.
#[derive(Debug, Parser)]
#[command(name = "simdupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan recursively
    #[arg(value_name = "DIRECTORY")]
    pub path: Option<PathBuf>,

    /// Also run the near-duplicate pass
    #[arg(long)]
    pub similar: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Additional configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not display progress
    #[arg(long)]
    pub no_progress: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}
