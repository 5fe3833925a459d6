use super::expr::Expression;
use super::position::Range;

/// A template is the top-level AST unit: the ordered sequence of nodes
/// found in one source buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub nodes: Vec<Node>,
}

/// The kinds of content that can appear in a template or a case body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Raw markup up to the end of the line or the next brace.
    /// For example, `<p>` in `<p>{ name }</p>`.
    Text(Text),

    /// A Go expression in output position: `{ name }`.
    StringExpression(StringExpression),

    /// Switch block: `switch x {` ... `}`
    Switch(SwitchExpression),

    /// `fallthrough` as the final statement of a case body.
    Fallthrough(FallthroughExpression),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub value: String,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringExpression {
    pub expression: Expression,
}

/// A `switch <tag> {` ... `}` block.
///
/// `cases` keeps source order and may be empty. No fallthrough can be the
/// last child of the last case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchExpression {
    /// The switch tag, without the `switch` keyword. Empty for a tagless
    /// switch.
    pub expression: Expression,
    pub cases: Vec<CaseExpression>,
    /// From the `switch` keyword up to and including the closing brace.
    pub range: Range,
}

/// One `case <list>:` or `default:` clause and its body.
///
/// At most one fallthrough appears in `children`, and only as the last
/// element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseExpression {
    pub expression: CaseHeader,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseHeader {
    /// `case a, b:`. The expression holds the list without the keyword
    /// or colon.
    Case(Expression),
    /// `default:`, with the range of the keyword.
    Default(Range),
}

impl CaseHeader {
    pub fn is_default(&self) -> bool {
        matches!(self, CaseHeader::Default(_))
    }

    pub fn range(&self) -> Range {
        match self {
            CaseHeader::Case(expression) => expression.range,
            CaseHeader::Default(range) => *range,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallthroughExpression {
    /// Covers the `fallthrough` keyword.
    pub expression: Expression,
}
