//! CSS lexer using logos.
//!
//! Only the tokens that matter for finding declarations are distinguished;
//! everything else is a single-character `Delim`.

use crate::Span;
use logos::Logos;
use text_size::TextSize;

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span of the token in the source.
    pub span: Span,
}

/// Token kinds for CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos, Default)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    /// `/* ... */`
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    Comment,

    /// A quoted string.
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    String,

    /// An unquoted `url(...)`, which may contain `;` and `:`.
    #[regex(r#"[uU][rR][lL]\([^)"']*\)"#)]
    Url,

    /// An identifier, including vendor-prefixed and custom property names.
    #[regex(r"-?[a-zA-Z_][a-zA-Z0-9_\-]*")]
    #[regex(r"--[a-zA-Z0-9_\-]+")]
    Ident,

    /// `@media`, `@font-face`, ...
    #[regex(r"@-?[a-zA-Z_][a-zA-Z0-9_\-]*")]
    AtKeyword,

    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `:`
    #[token(":")]
    Colon,

    /// Any other single character.
    #[regex(r"[^ \t\r\n\f]", priority = 0)]
    Delim,

    /// Input the lexer could not match.
    #[default]
    Error,

    /// End of input.
    Eof,
}

/// A lexer over stylesheet source that ends with a single [`TokenKind::Eof`].
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: &'src str,
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
            finished: false,
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.inner.next() {
            Some(result) => Some(Token {
                kind: result.unwrap_or(TokenKind::Error),
                span: Span::from_range(self.inner.span()),
            }),
            None => {
                self.finished = true;
                Some(Token {
                    kind: TokenKind::Eof,
                    span: Span::empty(TextSize::from(self.source.len() as u32)),
                })
            }
        }
    }
}
