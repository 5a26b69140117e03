//! Tolerant CSS declaration scanner.
//!
//! This crate finds property declarations in a stylesheet and replays them as
//! events to a [`StylesheetListener`]:
//! - Lexer (tokenizer) using `logos`
//! - Block and statement tracking with error recovery
//! - 1-based line/column positions for every declaration
//!
//! Property values are never validated.
//!
//! # Example
//!
//! ```
//! use css_parser::{parse, Declaration, StylesheetListener};
//!
//! struct Names(Vec<String>);
//!
//! impl StylesheetListener for Names {
//!     fn property(&mut self, declaration: &Declaration) {
//!         self.0.push(declaration.property.to_string());
//!     }
//! }
//!
//! let result = parse(".foo { display: flex; gap: 1rem }");
//! let mut names = Names(Vec::new());
//! result.stylesheet.walk(&mut names);
//! assert_eq!(names.0, ["display", "gap"]);
//! ```

mod error;
mod lexer;
mod line_index;
mod parser;
mod span;

pub use error::{ParseError, ParseErrorKind};
pub use lexer::{Lexer, Token, TokenKind};
pub use line_index::{LineIndex, Position};
pub use span::{ByteOffset, Span};

use smol_str::SmolStr;

/// One property declaration, with the property name as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Raw property text, case preserved.
    pub property: SmolStr,
    /// Span of the property name.
    pub span: Span,
    /// 1-based line of the property name.
    pub line: u32,
    /// 1-based column of the property name.
    pub column: u32,
}

/// The declarations of a stylesheet, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// All declarations found.
    pub declarations: Vec<Declaration>,
}

impl Stylesheet {
    /// Replays the stylesheet as listener events: one `property` call per
    /// declaration, then a single `end_stylesheet`.
    pub fn walk<L: StylesheetListener + ?Sized>(&self, listener: &mut L) {
        for declaration in &self.declarations {
            listener.property(declaration);
        }
        listener.end_stylesheet();
    }
}

/// Receives events while a stylesheet is walked.
pub trait StylesheetListener {
    /// Called for every property declaration.
    fn property(&mut self, declaration: &Declaration);

    /// Called once after the last declaration.
    fn end_stylesheet(&mut self) {}
}

/// The result of scanning a stylesheet.
#[derive(Debug)]
pub struct ParseResult {
    /// The scanned stylesheet.
    pub stylesheet: Stylesheet,
    /// Structural errors encountered while scanning.
    pub errors: Vec<ParseError>,
}

/// Scans a stylesheet for property declarations.
///
/// Scanning never fails; structural problems are returned alongside whatever
/// declarations could be recovered.
pub fn parse(source: &str) -> ParseResult {
    parser::Parser::new(source).parse()
}
