//! Offset → line/column conversion.

use crate::ByteOffset;
use text_size::TextSize;

/// A 1-based line and column. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Line start table for a source string.
#[derive(Debug, Clone)]
pub struct LineIndex<'src> {
    text: &'src str,
    /// `line_starts[i]` is the offset where line `i` (0-based) begins.
    line_starts: Vec<ByteOffset>,
}

impl<'src> LineIndex<'src> {
    /// Creates a new line index from source text.
    pub fn new(text: &'src str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        line_starts.extend(
            text.match_indices('\n')
                .map(|(offset, _)| TextSize::from((offset + 1) as u32)),
        );
        Self { text, line_starts }
    }

    /// Returns the number of lines in the source.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset to a 1-based position.
    ///
    /// Returns `None` if the offset is past the end of the text or not on a
    /// character boundary.
    pub fn position(&self, offset: ByteOffset) -> Option<Position> {
        let offset_usize = usize::from(offset);
        if offset_usize > self.text.len() {
            return None;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };
        let line_start = usize::from(self.line_starts[line]);
        let column = self.text.get(line_start..offset_usize)?.chars().count();

        Some(Position::new(line as u32 + 1, column as u32 + 1))
    }

    /// Returns the text of a 1-based line, without its line terminator.
    pub fn line_text(&self, line: u32) -> Option<&'src str> {
        let index = (line as usize).checked_sub(1)?;
        let start = usize::from(*self.line_starts.get(index)?);
        let end = self
            .line_starts
            .get(index + 1)
            .map_or(self.text.len(), |next| usize::from(*next) - 1);
        let text = &self.text[start..end];
        Some(text.strip_suffix('\r').unwrap_or(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let index = LineIndex::new(".a { color: red }");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.position(TextSize::from(0)), Some(Position::new(1, 1)));
        assert_eq!(index.position(TextSize::from(5)), Some(Position::new(1, 6)));
    }

    #[test]
    fn test_multiple_lines() {
        let index = LineIndex::new(".a {\n  color: red;\n}\n");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.position(TextSize::from(7)), Some(Position::new(2, 3)));
        assert_eq!(index.position(TextSize::from(19)), Some(Position::new(3, 1)));
    }

    #[test]
    fn test_columns_count_characters() {
        let index = LineIndex::new("/* ünï */ a { b: c }");
        // `a` starts at byte 12 but is the 11th character.
        assert_eq!(index.position(TextSize::from(12)), Some(Position::new(1, 11)));
    }

    #[test]
    fn test_out_of_bounds() {
        let index = LineIndex::new("abc");
        assert_eq!(index.position(TextSize::from(3)), Some(Position::new(1, 4)));
        assert_eq!(index.position(TextSize::from(4)), None);
    }

    #[test]
    fn test_line_text() {
        let index = LineIndex::new("first\r\nsecond\nthird");
        assert_eq!(index.line_text(1), Some("first"));
        assert_eq!(index.line_text(2), Some("second"));
        assert_eq!(index.line_text(3), Some("third"));
        assert_eq!(index.line_text(0), None);
        assert_eq!(index.line_text(4), None);
    }
}
