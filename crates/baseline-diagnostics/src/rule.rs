//! The `baseline-check` rule.
//!
//! Translates property events from the scanner into resolver queries and turns
//! low or missing baseline support into diagnostics.

use crate::stats::{Stats, PROPERTIES_TRACKED_STAT};
use crate::{Diagnostic, DiagnosticCode, Severity};
use baseline_index::{BaselineResolver, BaselineStatus, CompatibilityIndex, Verdict};
use css_parser::{Declaration, StylesheetListener};

/// Descriptive metadata for a lint rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    /// Rule identifier used in config and output.
    pub id: &'static str,
    /// Short human-readable name.
    pub name: &'static str,
    /// One-sentence description.
    pub description: &'static str,
    /// Documentation URL.
    pub url: &'static str,
    /// Browsers the rule applies to.
    pub browsers: &'static str,
}

/// Metadata for the baseline rule.
pub const BASELINE_CHECK: RuleInfo = RuleInfo {
    id: "baseline-check",
    name: "Baseline feature check",
    description: "Check CSS properties against web-features baseline status.",
    url: "https://github.com/CSSLint/csslint/wiki/Baseline-feature-check",
    browsers: "All",
};

/// Builds the diagnostic message for a verdict, or `None` if it passes.
pub fn baseline_message(property: &str, verdict: &Verdict<'_>) -> Option<String> {
    match verdict.status {
        BaselineStatus::NoBaseline => Some(format!(
            "Property '{property}' has no baseline support ({}). Browser support is very limited.",
            verdict.feature_names()
        )),
        BaselineStatus::Low => Some(format!(
            "Property '{property}' has low baseline status ({}). Consider providing fallbacks.",
            verdict.feature_names()
        )),
        BaselineStatus::High | BaselineStatus::Unknown => None,
    }
}

/// Listener that checks each property against the compatibility index.
pub struct BaselineCheck<'a> {
    index: &'a CompatibilityIndex,
    resolver: BaselineResolver<'a>,
    severity: Severity,
    diagnostics: Vec<Diagnostic>,
    stats: Stats,
}

impl<'a> BaselineCheck<'a> {
    /// Creates the rule over an index, reporting at the given severity.
    pub fn new(index: &'a CompatibilityIndex, severity: Severity) -> Self {
        Self {
            index,
            resolver: index.resolver(),
            severity,
            diagnostics: Vec::new(),
            stats: Stats::default(),
        }
    }

    /// Consumes the rule, returning its diagnostics and statistics.
    pub fn finish(self) -> (Vec<Diagnostic>, Stats) {
        (self.diagnostics, self.stats)
    }
}

impl StylesheetListener for BaselineCheck<'_> {
    fn property(&mut self, declaration: &Declaration) {
        let property = declaration.property.to_lowercase();
        let verdict = self.resolver.resolve(&property);
        tracing::trace!(%property, status = ?verdict.status, "Resolved property");

        let Some(message) = baseline_message(&property, &verdict) else {
            return;
        };
        self.diagnostics.push(
            Diagnostic::new(
                DiagnosticCode::BaselineCheck,
                message,
                declaration.span,
                declaration.line,
                declaration.column,
            )
            .with_severity(self.severity),
        );
    }

    fn end_stylesheet(&mut self) {
        self.stats.record(PROPERTIES_TRACKED_STAT, self.index.len());
    }
}
