//! Declaration scanner.
//!
//! This is not a validating CSS parser. It tracks block nesting and statement
//! boundaries, and records every `ident :` that starts a statement inside a
//! block and is terminated by `;` or `}` before any `{`.

use crate::lexer::{Lexer, TokenKind};
use crate::{
    Declaration, LineIndex, ParseError, ParseErrorKind, ParseResult, Position, Span, Stylesheet,
};
use smol_str::SmolStr;

pub(crate) struct Parser<'src> {
    source: &'src str,
    line_index: LineIndex<'src>,
    declarations: Vec<Declaration>,
    errors: Vec<ParseError>,
    /// Spans of the `{` tokens of currently open blocks.
    open_blocks: Vec<Span>,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Self {
            source,
            line_index: LineIndex::new(source),
            declarations: Vec::new(),
            errors: Vec::new(),
            open_blocks: Vec::new(),
        }
    }

    pub(crate) fn parse(mut self) -> ParseResult {
        let mut at_statement_start = true;
        // Identifier that started a statement, waiting for its colon.
        let mut candidate: Option<Span> = None;
        // Property name whose declaration has not been terminated yet.
        let mut pending: Option<Span> = None;

        for token in Lexer::new(self.source) {
            match token.kind {
                TokenKind::Comment => continue,
                TokenKind::Ident if at_statement_start && !self.open_blocks.is_empty() => {
                    at_statement_start = false;
                    candidate = Some(token.span);
                    continue;
                }
                TokenKind::Colon if candidate.is_some() => {
                    pending = candidate.take();
                    continue;
                }
                TokenKind::LBrace => {
                    // `a:hover {` is a nested rule, not a declaration.
                    pending = None;
                    self.open_blocks.push(token.span);
                    at_statement_start = true;
                }
                TokenKind::Semicolon => {
                    self.flush(pending.take());
                    at_statement_start = true;
                }
                TokenKind::RBrace => {
                    self.flush(pending.take());
                    if self.open_blocks.pop().is_none() {
                        self.errors.push(ParseError::new(
                            ParseErrorKind::UnexpectedCloseBrace,
                            token.span,
                        ));
                    }
                    at_statement_start = true;
                }
                TokenKind::Eof => {
                    self.flush(pending.take());
                    for span in std::mem::take(&mut self.open_blocks) {
                        self.errors
                            .push(ParseError::new(ParseErrorKind::UnclosedBlock, span));
                    }
                }
                _ => at_statement_start = false,
            }
            candidate = None;
        }

        ParseResult {
            stylesheet: Stylesheet {
                declarations: self.declarations,
            },
            errors: self.errors,
        }
    }

    fn flush(&mut self, property: Option<Span>) {
        let Some(span) = property else {
            return;
        };
        let position = self
            .line_index
            .position(span.start)
            .unwrap_or(Position::new(1, 1));

        self.declarations.push(Declaration {
            property: SmolStr::new(span.text(self.source)),
            span,
            line: position.line,
            column: position.column,
        });
    }
}
