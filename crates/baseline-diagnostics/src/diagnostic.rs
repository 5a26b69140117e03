//! Diagnostic types.

use crate::rule::{RuleInfo, BASELINE_CHECK};
use css_parser::Span;

/// A diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The diagnostic code.
    pub code: DiagnosticCode,
    /// The severity level.
    pub severity: Severity,
    /// The diagnostic message.
    pub message: String,
    /// The source location.
    pub span: Span,
    /// 1-based line of `span.start`.
    pub line: u32,
    /// 1-based column of `span.start`.
    pub column: u32,
}

impl Diagnostic {
    /// Creates a new diagnostic with the code's default severity.
    pub fn new(
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Span,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            severity: code.default_severity(),
            code,
            message: message.into(),
            span,
            line,
            column,
        }
    }

    /// Overrides the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// The severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// A warning that doesn't fail the run by default.
    Warning,
    /// An error that should be fixed.
    Error,
}

impl Severity {
    /// Returns the severity as a display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// Diagnostic codes for all checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// `baseline-check`: property with low or no baseline support
    BaselineCheck,
    /// `parse-error`: structural problem in the stylesheet
    ParseError,
}

impl DiagnosticCode {
    /// Returns the default severity for this diagnostic code.
    pub fn default_severity(&self) -> Severity {
        match self {
            DiagnosticCode::BaselineCheck => Severity::Warning,
            DiagnosticCode::ParseError => Severity::Error,
        }
    }

    /// Returns the diagnostic code as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::BaselineCheck => BASELINE_CHECK.id,
            DiagnosticCode::ParseError => "parse-error",
        }
    }

    /// Returns the rule metadata, for codes produced by a rule.
    pub fn rule(&self) -> Option<&'static RuleInfo> {
        match self {
            DiagnosticCode::BaselineCheck => Some(&BASELINE_CHECK),
            DiagnosticCode::ParseError => None,
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
