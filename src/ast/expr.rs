use super::position::Range;

/// An embedded Go expression, carried verbatim.
///
/// The parser never interprets the text; it only records what was written
/// and where. Values are immutable once the parser has produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub value: String,
    pub range: Range,
}

impl Expression {
    pub fn new(value: impl Into<String>, range: Range) -> Self {
        Self {
            value: value.into(),
            range,
        }
    }
}
