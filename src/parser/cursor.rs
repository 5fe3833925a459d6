//! Position-tracking view over template source.

use crate::ast::position::{Position, Range};

/// Immutable source text with a movable byte index.
///
/// The cursor never inspects grammar; parsers use [`index`](Cursor::index)
/// and [`seek`](Cursor::seek) to rewind and [`position_at`](Cursor::position_at)
/// to resolve byte offsets into line/column pairs for nodes and errors.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    index: usize,
    /// Byte offset at which each line begins. Always starts with `0`.
    line_starts: Vec<usize>,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            index: 0,
            line_starts,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to `index`, clamped to the end of the source.
    pub fn seek(&mut self, index: usize) {
        self.index = index.min(self.source.len());
    }

    pub fn advance(&mut self, n: usize) {
        self.seek(self.index + n);
    }

    /// The unconsumed tail of the source.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.index..]
    }

    pub fn is_eof(&self) -> bool {
        self.index >= self.source.len()
    }

    pub fn peek_prefix(&self, prefix: &str) -> bool {
        self.remaining().starts_with(prefix)
    }

    pub fn consume_prefix(&mut self, prefix: &str) -> bool {
        if self.peek_prefix(prefix) {
            self.advance(prefix.len());
            true
        } else {
            false
        }
    }

    /// Skip any Unicode whitespace, line breaks included. Returns the number
    /// of bytes skipped.
    pub fn skip_whitespace(&mut self) -> usize {
        self.skip_while(char::is_whitespace)
    }

    /// Skip spaces and tabs only.
    pub fn skip_spaces(&mut self) -> usize {
        self.skip_while(|ch| matches!(ch, ' ' | '\t'))
    }

    /// Consume a single `\n` or `\r\n`.
    pub fn consume_newline(&mut self) -> bool {
        self.consume_prefix("\n") || self.consume_prefix("\r\n")
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let rest = self.remaining();
        let len = rest.find(|ch: char| !pred(ch)).unwrap_or(rest.len());
        self.advance(len);
        len
    }

    pub fn position(&self) -> Position {
        self.position_at(self.index)
    }

    /// Resolve a byte offset into a 1-based line and character column.
    pub fn position_at(&self, index: usize) -> Position {
        let index = index.min(self.source.len());
        let line = match self.line_starts.binary_search(&index) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let col = self.source[line_start..index].chars().count() + 1;
        Position::new(index, line + 1, col)
    }

    pub fn range(&self, from: usize, to: usize) -> Range {
        Range::new(self.position_at(from), self.position_at(to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_across_lines() {
        let cursor = Cursor::new("ab\ncd\n\nx");
        assert_eq!(cursor.position_at(0), Position::new(0, 1, 1));
        assert_eq!(cursor.position_at(2), Position::new(2, 1, 3));
        assert_eq!(cursor.position_at(3), Position::new(3, 2, 1));
        assert_eq!(cursor.position_at(4), Position::new(4, 2, 2));
        assert_eq!(cursor.position_at(6), Position::new(6, 3, 1));
        assert_eq!(cursor.position_at(7), Position::new(7, 4, 1));
    }

    #[test]
    fn test_columns_count_characters() {
        // 'é' is two bytes but one column.
        let cursor = Cursor::new("é{ x }");
        assert_eq!(cursor.position_at(2), Position::new(2, 1, 2));
    }

    #[test]
    fn test_position_past_end_is_clamped() {
        let cursor = Cursor::new("abc");
        assert_eq!(cursor.position_at(10), Position::new(3, 1, 4));
    }

    #[test]
    fn test_seek_and_prefixes() {
        let mut cursor = Cursor::new("  \n\tcase 1:");
        assert_eq!(cursor.skip_whitespace(), 4);
        assert!(cursor.peek_prefix("case "));
        let mark = cursor.index();
        assert!(cursor.consume_prefix("case "));
        assert_eq!(cursor.remaining(), "1:");
        cursor.seek(mark);
        assert_eq!(cursor.remaining(), "case 1:");
    }

    #[test]
    fn test_skip_unicode_whitespace() {
        let mut cursor = Cursor::new("\u{a0}\u{c}\u{2003}\nx");
        assert_eq!(cursor.skip_whitespace(), "\u{a0}\u{c}\u{2003}\n".len());
        assert_eq!(cursor.remaining(), "x");
    }

    #[test]
    fn test_newlines() {
        let mut cursor = Cursor::new("\r\n\nx");
        assert!(cursor.consume_newline());
        assert!(cursor.consume_newline());
        assert!(!cursor.consume_newline());
        assert_eq!(cursor.remaining(), "x");
        assert!(!cursor.is_eof());
    }
}
