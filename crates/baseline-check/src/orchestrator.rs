//! Main orchestration logic.

use crate::cli::{Args, OutputFormat, Threshold};
use crate::config::{BaselineConfig, ConfigError};
use crate::output::{
    format_stats, CheckSummary, FormattedDiagnostic, FormattedFile, Formatter, JsonReport,
};
use baseline_diagnostics::{check, CheckOptions, Severity, Stats, PROPERTIES_TRACKED_STAT};
use baseline_index::{DatabaseLocator, DatasetState, LoadedIndex};
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use std::fs;
use thiserror::Error;
use walkdir::WalkDir;

/// Directories that are never checked.
const DEFAULT_IGNORES: [&str; 3] = ["**/node_modules/**", "**/dist/**", "**/target/**"];

const CSS_EXTENSION: &str = "css";

/// Orchestration errors.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// A path given on the command line does not exist.
    #[error("path not found: {0}")]
    MissingPath(Utf8PathBuf),
}

/// Runs the check on all files.
pub fn run(args: &Args) -> Result<CheckSummary, CheckError> {
    let workspace = resolve_workspace(&args.workspace);

    let config = BaselineConfig::load(&workspace, args.config.as_deref())?;

    let locator = DatabaseLocator::new(workspace.clone())
        .with_explicit(
            args.features_db
                .as_ref()
                .map(|path| workspace.join(path))
                .or_else(|| config.features_db(&workspace)),
        )
        .with_process_env();
    let loaded = LoadedIndex::load(&locator);
    match &loaded.state {
        DatasetState::Loaded { path, features } => {
            tracing::info!(%path, features, properties = loaded.index.len(), "Using feature database");
        }
        DatasetState::Missing => tracing::info!("Running without a feature database"),
        DatasetState::Invalid { path, .. } => {
            tracing::info!(%path, "Running without a feature database")
        }
    }

    let ignore_set = build_ignore_set(args.ignore.iter().chain(&config.ignore))?;
    let files = collect_files(&workspace, &args.paths, &ignore_set)?;
    tracing::debug!(files = files.len(), "Collected stylesheets");

    let options = CheckOptions {
        baseline: config.baseline_severity(),
        parse_errors: args.parse_errors,
    };

    let formatter = Formatter::new(args.output);
    let output_json = args.output == OutputFormat::Json;

    struct FileOutput {
        text: Option<String>,
        json: Vec<FormattedDiagnostic>,
        errors: usize,
        warnings: usize,
        stats: Stats,
    }

    let outputs: Vec<FileOutput> = files
        .par_iter()
        .filter_map(|file_path| {
            let source = match fs::read_to_string(file_path) {
                Ok(s) => s,
                Err(error) => {
                    tracing::warn!(path = %file_path, %error, "Failed to read stylesheet");
                    return None;
                }
            };

            let mut result = check(&source, &loaded.index, &options);
            result
                .diagnostics
                .retain(|diag| include_severity(diag.severity, args.threshold));

            let errors = result
                .diagnostics
                .iter()
                .filter(|d| d.severity == Severity::Error)
                .count();
            let warnings = result.diagnostics.len() - errors;

            let relative_path = file_path.strip_prefix(&workspace).unwrap_or(file_path);
            let (text, json) = if result.diagnostics.is_empty() {
                (None, Vec::new())
            } else {
                match formatter.format(&result.diagnostics, relative_path, &source) {
                    FormattedFile::Text(text) => (Some(text), Vec::new()),
                    FormattedFile::Json(json) => (None, json),
                }
            };

            Some(FileOutput {
                text,
                json,
                errors,
                warnings,
                stats: result.stats,
            })
        })
        .collect();

    let mut stats = Stats::default();
    if options.baseline.is_some() {
        stats.record(PROPERTIES_TRACKED_STAT, loaded.index.len());
    }

    let mut summary = CheckSummary {
        file_count: files.len(),
        fail_on_warnings: args.fail_on_warnings,
        ..Default::default()
    };
    let mut json_output = Vec::new();

    for output in outputs {
        summary.error_count += output.errors;
        summary.warning_count += output.warnings;
        stats.merge(output.stats);
        if let Some(text) = output.text {
            print!("{}", text);
        }
        json_output.extend(output.json);
    }

    if output_json {
        let report = JsonReport::new(json_output, &stats);
        let json = serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string());
        println!("{}", json);
    } else {
        if args.stats {
            print!("{}", format_stats(&stats));
        }
        println!("{}", summary.format());
    }

    Ok(summary)
}

fn resolve_workspace(workspace: &Utf8Path) -> Utf8PathBuf {
    if workspace.is_relative() {
        std::env::current_dir()
            .ok()
            .and_then(|p| Utf8PathBuf::try_from(p).ok())
            .unwrap_or_default()
            .join(workspace)
    } else {
        workspace.to_owned()
    }
}

/// Builds the ignore set from user patterns plus the defaults.
fn build_ignore_set<'a>(
    patterns: impl IntoIterator<Item = &'a String>,
) -> Result<GlobSet, CheckError> {
    let mut ignore_builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| CheckError::InvalidGlob(e.to_string()))?;
        ignore_builder.add(glob);
    }

    for pattern in DEFAULT_IGNORES {
        if let Ok(glob) = Glob::new(pattern) {
            ignore_builder.add(glob);
        }
    }

    ignore_builder
        .build()
        .map_err(|e| CheckError::InvalidGlob(e.to_string()))
}

/// Collects the stylesheets to check, sorted by path.
///
/// Directories are walked for `.css` files outside the ignore set. Files named
/// explicitly are always checked.
fn collect_files(
    workspace: &Utf8Path,
    paths: &[Utf8PathBuf],
    ignore_set: &GlobSet,
) -> Result<Vec<Utf8PathBuf>, CheckError> {
    let roots: Vec<Utf8PathBuf> = if paths.is_empty() {
        vec![workspace.to_owned()]
    } else {
        paths.iter().map(|path| workspace.join(path)).collect()
    };

    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root);
        } else if root.is_dir() {
            files.extend(
                WalkDir::new(&root)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .filter_map(|e| Utf8PathBuf::try_from(e.into_path()).ok())
                    .filter(|p| p.extension() == Some(CSS_EXTENSION))
                    .filter(|p| {
                        let relative = p.strip_prefix(workspace).unwrap_or(p);
                        !ignore_set.is_match(relative.as_str())
                    }),
            );
        } else {
            return Err(CheckError::MissingPath(root));
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn include_severity(severity: Severity, threshold: Threshold) -> bool {
    match threshold {
        Threshold::Error => matches!(severity, Severity::Error),
        Threshold::Warning => true,
    }
}
