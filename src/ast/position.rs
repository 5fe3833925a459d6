use std::fmt;

/// A resolved location in template source.
///
/// `index` is a byte offset; `line` and `col` are 1-based, with columns
/// counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub index: usize,
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(index: usize, line: usize, col: usize) -> Self {
        Self { index, line, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, col {}", self.line, self.col)
    }
}

/// Half-open source range between two resolved positions.
///
/// Carried by every expression so that error messages can point back to
/// the exact piece of source that caused a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
    pub from: Position,
    pub to: Position,
}

impl Range {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// Byte length of the range.
    pub fn len(&self) -> usize {
        self.to.index - self.from.index
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
