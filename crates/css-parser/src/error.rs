//! Scan error types.

use crate::Span;
use thiserror::Error;

/// A structural problem found while scanning a stylesheet.
///
/// Scanning always continues past these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// The location in the source where the error occurred.
    pub span: Span,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A `{` with no matching `}` before the end of the stylesheet.
    #[error("unclosed block")]
    UnclosedBlock,

    /// A `}` with no open block.
    #[error("unexpected `}}`")]
    UnexpectedCloseBrace,
}
