//! Output formatting.

use crate::cli::OutputFormat;
use baseline_diagnostics::{Diagnostic, Severity, Stats};
use camino::Utf8Path;
use css_parser::LineIndex;
use serde::Serialize;
use std::collections::BTreeMap;

/// A formatted diagnostic for output.
#[derive(Debug, Serialize)]
pub struct FormattedDiagnostic {
    /// The diagnostic type (Error or Warning).
    #[serde(rename = "type")]
    pub diagnostic_type: String,
    /// The file path.
    pub filename: String,
    /// The start position.
    pub start: Position,
    /// The end position.
    pub end: Position,
    /// The message.
    pub message: String,
    /// The rule or diagnostic code.
    pub code: String,
}

/// A position in the source.
#[derive(Debug, Serialize)]
pub struct Position {
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number.
    pub column: u32,
    /// Byte offset.
    pub offset: u32,
}

/// The document printed for `--output json`.
#[derive(Debug, Default, Serialize)]
pub struct JsonReport {
    /// Diagnostics from every checked file, in file order.
    pub diagnostics: Vec<FormattedDiagnostic>,
    /// Run statistics keyed by name.
    pub stats: BTreeMap<String, usize>,
}

impl JsonReport {
    /// Creates a report from collected diagnostics and run statistics.
    pub fn new(diagnostics: Vec<FormattedDiagnostic>, stats: &Stats) -> Self {
        Self {
            diagnostics,
            stats: stats
                .iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }
}

/// One file's diagnostics, ready to print or to collect into a [`JsonReport`].
#[derive(Debug)]
pub enum FormattedFile {
    /// Text for the human, human-verbose and machine formats.
    Text(String),
    /// Diagnostics for the JSON report.
    Json(Vec<FormattedDiagnostic>),
}

/// Formats diagnostics for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a collection of diagnostics.
    pub fn format(
        &self,
        diagnostics: &[Diagnostic],
        file_path: &Utf8Path,
        source: &str,
    ) -> FormattedFile {
        match self.format {
            OutputFormat::Human => FormattedFile::Text(self.format_human(diagnostics, file_path)),
            OutputFormat::HumanVerbose => {
                FormattedFile::Text(self.format_human_verbose(diagnostics, file_path, source))
            }
            OutputFormat::Json => {
                FormattedFile::Json(Self::format_json_diagnostics(diagnostics, file_path, source))
            }
            OutputFormat::Machine => {
                FormattedFile::Text(self.format_machine(diagnostics, file_path))
            }
        }
    }

    fn format_human(&self, diagnostics: &[Diagnostic], file_path: &Utf8Path) -> String {
        let mut output = String::new();

        for diag in diagnostics {
            output.push_str(&format!(
                "{}:{}:{}\n{}: {} ({})\n\n",
                file_path,
                diag.line,
                diag.column,
                diag.severity.as_str(),
                diag.message,
                diag.code
            ));
        }

        output
    }

    /// Formats as human-readable output with code snippets.
    fn format_human_verbose(
        &self,
        diagnostics: &[Diagnostic],
        file_path: &Utf8Path,
        source: &str,
    ) -> String {
        let line_index = LineIndex::new(source);
        let mut output = String::new();

        for diag in diagnostics {
            output.push_str(&format!(
                "{}:{}:{}\n{}: {} ({})\n",
                file_path,
                diag.line,
                diag.column,
                diag.severity.as_str(),
                diag.message,
                diag.code
            ));

            if let Some(text) = line_index.line_text(diag.line) {
                let gutter = diag.line.to_string();
                output.push_str(&format!("  {} | {}\n", gutter, text));

                // Columns count characters, so pad with one space per character
                let padding = " ".repeat(diag.column.saturating_sub(1) as usize);
                output.push_str(&format!(
                    "  {} | {}^\n",
                    " ".repeat(gutter.len()),
                    padding
                ));
            }

            if let Some(rule) = diag.code.rule() {
                output.push_str(&format!("  = {}: {}\n", rule.name, rule.url));
            }

            output.push('\n');
        }

        output
    }

    /// Formats diagnostics into JSON-ready structs.
    fn format_json_diagnostics(
        diagnostics: &[Diagnostic],
        file_path: &Utf8Path,
        source: &str,
    ) -> Vec<FormattedDiagnostic> {
        let line_index = LineIndex::new(source);
        diagnostics
            .iter()
            .map(|diag| {
                let end = line_index
                    .position(diag.span.end)
                    .map_or((diag.line, diag.column), |pos| (pos.line, pos.column));

                FormattedDiagnostic {
                    diagnostic_type: diag.severity.as_str().to_string(),
                    filename: file_path.to_string(),
                    start: Position {
                        line: diag.line,
                        column: diag.column,
                        offset: u32::from(diag.span.start),
                    },
                    end: Position {
                        line: end.0,
                        column: end.1,
                        offset: u32::from(diag.span.end),
                    },
                    message: diag.message.clone(),
                    code: diag.code.to_string(),
                }
            })
            .collect()
    }

    /// Formats as machine-readable output.
    fn format_machine(&self, diagnostics: &[Diagnostic], file_path: &Utf8Path) -> String {
        let mut output = String::new();

        for diag in diagnostics {
            let severity = match diag.severity {
                Severity::Error => "ERROR",
                Severity::Warning => "WARNING",
            };

            output.push_str(&format!(
                "{} {}:{}:{} {} ({})\n",
                severity, file_path, diag.line, diag.column, diag.message, diag.code
            ));
        }

        output
    }
}

/// Formats run statistics as `name: value` lines.
pub fn format_stats(stats: &Stats) -> String {
    stats
        .iter()
        .map(|(name, value)| format!("{}: {}\n", name, value))
        .collect()
}

/// Summary of a check run.
#[derive(Debug, Default)]
pub struct CheckSummary {
    /// Number of files checked.
    pub file_count: usize,
    /// Number of errors.
    pub error_count: usize,
    /// Number of warnings.
    pub warning_count: usize,
    /// Whether to fail on warnings.
    pub fail_on_warnings: bool,
}

impl CheckSummary {
    /// Formats the summary line.
    pub fn format(&self) -> String {
        let error_word = if self.error_count == 1 {
            "error"
        } else {
            "errors"
        };
        let warning_word = if self.warning_count == 1 {
            "warning"
        } else {
            "warnings"
        };
        let file_word = if self.file_count == 1 {
            "file"
        } else {
            "files"
        };

        format!(
            "====================================\nbaseline-check found {} {} and {} {} in {} {}",
            self.error_count,
            error_word,
            self.warning_count,
            warning_word,
            self.file_count,
            file_word
        )
    }

    /// Returns true if the run should exit with a failure status.
    pub fn should_fail(&self) -> bool {
        self.error_count > 0 || (self.warning_count > 0 && self.fail_on_warnings)
    }
}
