//! Baseline diagnostics for CSS stylesheets.
//!
//! This crate wires the declaration scanner to the compatibility index:
//! - `baseline-check`: properties with low or no baseline support
//! - `parse-error`: structural stylesheet problems (opt-in)
//!
//! # Example
//!
//! ```
//! use baseline_diagnostics::{check, CheckOptions};
//! use baseline_index::{CompatibilityIndex, FeatureDatabase};
//!
//! let db = FeatureDatabase::from_json(r#"{"features": {"ac": {
//!     "name": "Animation Composition",
//!     "status": {"baseline": "low"},
//!     "compat_features": ["css.properties.animation-composition"]
//! }}}"#).unwrap();
//! let index = CompatibilityIndex::build(&db);
//!
//! let result = check(".foo { animation-composition: add; }", &index, &CheckOptions::default());
//! for diagnostic in &result.diagnostics {
//!     println!("{}:{} {} ({})", diagnostic.line, diagnostic.column, diagnostic.message, diagnostic.code);
//! }
//! assert_eq!(result.diagnostics.len(), 1);
//! ```

mod diagnostic;
pub mod rule;
mod stats;

pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use rule::{BaselineCheck, RuleInfo, BASELINE_CHECK};
pub use stats::{Stats, PROPERTIES_TRACKED_STAT};

use baseline_index::CompatibilityIndex;
use css_parser::LineIndex;

/// Options for checking a stylesheet.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Severity of baseline diagnostics; `None` turns the rule off.
    pub baseline: Option<Severity>,
    /// Whether to report structural parse errors.
    pub parse_errors: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            baseline: Some(Severity::Warning),
            parse_errors: false,
        }
    }
}

/// Diagnostics and statistics for one stylesheet.
#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    /// Diagnostics sorted by position.
    pub diagnostics: Vec<Diagnostic>,
    /// Statistics reported by enabled rules.
    pub stats: Stats,
}

/// Runs all enabled checks on a stylesheet.
pub fn check(source: &str, index: &CompatibilityIndex, options: &CheckOptions) -> CheckResult {
    let parsed = css_parser::parse(source);
    let mut result = CheckResult::default();

    if options.parse_errors {
        let line_index = LineIndex::new(source);
        for error in &parsed.errors {
            let position = line_index.position(error.span.start);
            result.diagnostics.push(Diagnostic::new(
                DiagnosticCode::ParseError,
                error.to_string(),
                error.span,
                position.map_or(1, |pos| pos.line),
                position.map_or(1, |pos| pos.column),
            ));
        }
    }

    if let Some(severity) = options.baseline {
        let mut rule = BaselineCheck::new(index, severity);
        parsed.stylesheet.walk(&mut rule);
        let (diagnostics, stats) = rule.finish();
        result.diagnostics.extend(diagnostics);
        result.stats.merge(stats);
    }

    // Sort by position
    result.diagnostics.sort_by_key(|d| d.span.start);

    result
}
