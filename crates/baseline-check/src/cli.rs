//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// Checks CSS properties against web-features baseline status.
#[derive(Debug, Parser)]
#[command(name = "baseline-check")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Files or directories to check (defaults to the workspace)
    pub paths: Vec<Utf8PathBuf>,

    /// Working directory for the check
    #[arg(long, default_value = ".")]
    pub workspace: Utf8PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Path to the web-features data.json (overrides discovery)
    #[arg(long = "features-db")]
    pub features_db: Option<Utf8PathBuf>,

    /// Path to a config file (defaults to .baselinerc.json in the workspace)
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// Glob patterns to ignore
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Minimum severity threshold
    #[arg(long, value_enum, default_value = "warning")]
    pub threshold: Threshold,

    /// Exit with error on warnings
    #[arg(long = "fail-on-warnings")]
    pub fail_on_warnings: bool,

    /// Print run statistics
    #[arg(long)]
    pub stats: bool,

    /// Report stylesheet structure errors
    #[arg(long = "parse-errors")]
    pub parse_errors: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// Human-readable with code snippets
    HumanVerbose,
    /// JSON output
    Json,
    /// Machine-readable (one line per diagnostic)
    Machine,
}

/// Severity threshold.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum Threshold {
    /// Only show errors
    Error,
    /// Show errors and warnings (default)
    #[default]
    Warning,
}
