//! Template parser.
//!
//! Use [`parse`] to convert source text into a [`Template`] AST. The
//! switch/case/fallthrough constructs are parsed by hand over a [`Cursor`];
//! embedded Go expressions are delimited by a pest grammar (see `go.pest`).
//!
//! Optional constructs report "no match" as `Ok(None)` and leave the cursor
//! where they found it. Once a construct's prefix has matched, any further
//! problem is a fatal [`ParseError`] that aborts the whole parse.

mod cursor;
mod goexpr;
mod nodes;
mod switch;

pub use cursor::Cursor;
pub use goexpr::{ExpressionContext, extract};

use crate::ast::template::Template;
use crate::error::{ParseError, ParseResult};

/// Parse source text into a [`Template`] AST with default options.
///
/// ```rust
/// use tmpl_switch::{parse, Node};
///
/// let template = parse("switch x {\n\tcase 1:\n\t\t<p>one</p>\n}\n").unwrap();
/// let Node::Switch(switch) = &template.nodes[0] else { panic!("expected switch") };
/// assert_eq!(switch.expression.value, "x");
/// assert_eq!(switch.cases.len(), 1);
/// ```
pub fn parse(source: &str) -> Result<Template, ParseError> {
    parse_with_options(source, ParseOptions::default())
}

/// Parse source text with custom [`ParseOptions`].
///
/// ```rust
/// use tmpl_switch::{parse_with_options, ParseOptions};
///
/// let source = "switch a {\n\tcase 1:\n\t\tswitch b {\n\t\t}\n}\n";
/// let err = parse_with_options(source, ParseOptions::new().max_depth(1)).unwrap_err();
/// assert_eq!(err.message, "switch: maximum nesting depth of 1 exceeded");
/// ```
pub fn parse_with_options(source: &str, options: ParseOptions) -> Result<Template, ParseError> {
    let mut parser = Parser::new(source, options);
    let nodes = parser.parse_template()?;
    Ok(Template { nodes })
}

// ── Parse options ───────────────────────────────────────────────────────

/// Configuration for the parser.
///
/// ```rust
/// use tmpl_switch::ParseOptions;
///
/// let opts = ParseOptions::new().max_depth(16);
/// assert_eq!(opts.max_depth, Some(16));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Maximum number of nested switch blocks. `None` means the nesting of
    /// the source is the only bound.
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    /// Create a new `ParseOptions` with all defaults (no limits).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum switch nesting depth.
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }
}

// ── Parser state ────────────────────────────────────────────────────────

/// Cursor plus the options and nesting depth of the parse in progress.
///
/// The node, switch, case and fallthrough parsers are `impl` blocks on this
/// type spread over the submodules.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str, options: ParseOptions) -> Self {
        Self {
            cursor: Cursor::new(source),
            options,
            depth: 0,
        }
    }

    /// Run an optional sub-parser, rewinding the cursor if it reports no
    /// match. Fatal errors are passed through without rewinding.
    fn attempt<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<Option<T>>,
    ) -> ParseResult<Option<T>> {
        let start = self.cursor.index();
        let result = f(self);
        if let Ok(None) = result {
            if self.cursor.index() != start {
                tracing::trace!(from = self.cursor.index(), to = start, "rewinding cursor");
            }
            self.cursor.seek(start);
        }
        result
    }

    fn error_at(&self, index: usize, message: impl Into<String>) -> ParseError {
        ParseError::new(self.cursor.position_at(index), message)
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.cursor.position(), message)
    }
}
