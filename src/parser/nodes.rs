//! Generic template content: text runs, `{ expr }` output expressions, and
//! the dispatch into switch and fallthrough parsing.

use super::Parser;
use super::goexpr::{self, ExpressionContext};
use super::switch::CLAUSE_PREFIXES;
use crate::ast::template::*;
use crate::error::ParseResult;

/// Where a sequence of nodes lives, which decides how it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Body {
    /// Top level. Ends at end of input only.
    Template,
    /// A case clause body. Ends before the next `case`/`default` header or
    /// the switch's closing brace, neither of which is consumed.
    Case,
}

impl Parser<'_> {
    pub(crate) fn parse_template(&mut self) -> ParseResult<Vec<Node>> {
        Ok(self.parse_nodes_until(Body::Template)?.unwrap_or_default())
    }

    /// Parse nodes until the end of `body`.
    ///
    /// Keywords (`switch`, `fallthrough` and the clause headers that end a
    /// case body) are only recognised at the start of the body or of a
    /// line. Elsewhere they are plain text.
    ///
    /// Returns `Ok(None)` when a case body runs into the end of input
    /// without finding a single node.
    pub(crate) fn parse_nodes_until(&mut self, body: Body) -> ParseResult<Option<Vec<Node>>> {
        let mut nodes = Vec::new();
        let mut line_start = true;
        loop {
            let from = self.cursor.index();
            self.cursor.skip_whitespace();
            if self.cursor.source()[from..self.cursor.index()].contains('\n') {
                line_start = true;
            }
            if body == Body::Case && self.at_case_body_end(line_start) {
                return Ok(Some(nodes));
            }
            if self.cursor.is_eof() {
                if body == Body::Case && nodes.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(nodes));
            }
            match self.parse_node(body, line_start)? {
                Some(node) => nodes.push(node),
                None => {
                    let ch = self.cursor.remaining().chars().next().unwrap_or_default();
                    return Err(self.error_here(format!("unexpected '{ch}'")));
                }
            }
            line_start = false;
        }
    }

    /// Peek for the closing brace, or the start of another clause when at
    /// the start of a line.
    fn at_case_body_end(&self, line_start: bool) -> bool {
        self.cursor.peek_prefix("}")
            || (line_start && CLAUSE_PREFIXES.iter().any(|p| self.cursor.peek_prefix(p)))
    }

    fn parse_node(&mut self, body: Body, line_start: bool) -> ParseResult<Option<Node>> {
        if line_start && let Some(node) = self.parse_statement(body)? {
            return Ok(Some(node));
        }
        if let Some(expression) = self.parse_string_expression()? {
            return Ok(Some(Node::StringExpression(expression)));
        }
        Ok(self.parse_text().map(Node::Text))
    }

    /// `fallthrough` or a nested `switch`.
    fn parse_statement(&mut self, body: Body) -> ParseResult<Option<Node>> {
        if let Some(fallthrough) = self.parse_fallthrough()? {
            if body != Body::Case {
                return Err(self.error_at(
                    fallthrough.expression.range.from.index,
                    "fallthrough: only permitted as the last statement of a case",
                ));
            }
            return Ok(Some(Node::Fallthrough(fallthrough)));
        }
        Ok(self.parse_switch()?.map(Node::Switch))
    }

    fn parse_string_expression(&mut self) -> ParseResult<Option<StringExpression>> {
        self.attempt(|p| {
            if !p.cursor.peek_prefix("{") {
                return Ok(None);
            }
            let expression = goexpr::extract(&mut p.cursor, ExpressionContext::StringExpression)?;
            Ok(Some(StringExpression { expression }))
        })
    }

    /// Markup up to the end of the line or the next brace, with trailing
    /// whitespace trimmed.
    fn parse_text(&mut self) -> Option<Text> {
        let start = self.cursor.index();
        let rest = self.cursor.remaining();
        let len = rest.find(['{', '}', '\n']).unwrap_or(rest.len());
        let value = rest[..len].trim_end();
        if value.is_empty() {
            return None;
        }
        self.cursor.advance(len);
        Some(Text {
            value: value.to_string(),
            range: self.cursor.range(start, start + value.len()),
        })
    }
}
