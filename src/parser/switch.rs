//! `switch`, `case`/`default` and `fallthrough`.
//!
//! ```text
//! switch <tag> {
//!     case <list>:
//!         <nodes>
//!         fallthrough
//!     default:
//!         <nodes>
//! }
//! ```
//!
//! Only the identifying prefixes (`switch `, `case `, `default`,
//! `fallthrough`) may fail softly. Everything after them is committed.

use super::Parser;
use super::goexpr::{self, ExpressionContext};
use super::nodes::Body;
use crate::ast::template::*;
use crate::error::{ParseError, ParseResult};

/// Prefixes that open a case clause. Also used to peek for the end of the
/// previous clause's body.
pub(crate) const CLAUSE_PREFIXES: [&str; 2] = ["case ", "default"];

impl Parser<'_> {
    pub(crate) fn parse_switch(&mut self) -> ParseResult<Option<SwitchExpression>> {
        self.attempt(|p| {
            let start = p.cursor.index();
            if !p.cursor.peek_prefix("switch ") {
                return Ok(None);
            }

            let expression = goexpr::extract(&mut p.cursor, ExpressionContext::Switch)?;

            // ` {` then the end of the header line.
            p.cursor.skip_spaces();
            let opened = p.cursor.consume_prefix("{") && {
                p.cursor.skip_spaces();
                p.cursor.consume_newline()
            };
            if !opened {
                return Err(p.error_at(start, "switch: unterminated (missing '{' at end of line)"));
            }

            // From here on the block must be closed.
            p.depth += 1;
            let cases = p.parse_cases(start);
            p.depth -= 1;
            let cases = cases?;

            check_final_case(&cases)?;

            p.cursor.skip_whitespace();
            if !p.cursor.consume_prefix("}") {
                return Err(p.error_here("switch: missing end (expected '}')"));
            }

            tracing::debug!(
                tag = %expression.value,
                cases = cases.len(),
                depth = p.depth,
                "parsed switch"
            );
            Ok(Some(SwitchExpression {
                expression,
                cases,
                range: p.cursor.range(start, p.cursor.index()),
            }))
        })
    }

    fn parse_cases(&mut self, switch_start: usize) -> ParseResult<Vec<CaseExpression>> {
        if let Some(max) = self.options.max_depth
            && self.depth > max
        {
            return Err(self.error_at(
                switch_start,
                format!("switch: maximum nesting depth of {max} exceeded"),
            ));
        }

        let mut cases = Vec::new();
        while let Some(case) = self.parse_case()? {
            cases.push(case);
        }
        Ok(cases)
    }

    fn parse_case(&mut self) -> ParseResult<Option<CaseExpression>> {
        self.attempt(|p| {
            let Some(expression) = p.parse_case_header()? else {
                return Ok(None);
            };

            let Some(children) = p.parse_nodes_until(Body::Case)? else {
                return Err(p.error_here("case: expected nodes, but none were found"));
            };
            check_fallthrough_is_last(&children)?;

            p.cursor.skip_whitespace();
            Ok(Some(CaseExpression {
                expression,
                children,
            }))
        })
    }

    fn parse_case_header(&mut self) -> ParseResult<Option<CaseHeader>> {
        self.attempt(|p| {
            p.cursor.skip_whitespace();
            let is_default = p.cursor.peek_prefix("default");
            if !is_default && !p.cursor.peek_prefix("case ") {
                return Ok(None);
            }

            let expression = goexpr::extract(&mut p.cursor, ExpressionContext::Case)?;

            // Eat the rest of the header line.
            p.cursor.skip_spaces();
            p.cursor.consume_newline();

            Ok(Some(if is_default {
                CaseHeader::Default(expression.range)
            } else {
                CaseHeader::Case(expression)
            }))
        })
    }

    pub(crate) fn parse_fallthrough(&mut self) -> ParseResult<Option<FallthroughExpression>> {
        self.attempt(|p| {
            if !p.cursor.peek_prefix("fallthrough") {
                return Ok(None);
            }
            let expression = goexpr::extract(&mut p.cursor, ExpressionContext::Fallthrough)?;
            Ok(Some(FallthroughExpression { expression }))
        })
    }
}

/// A fallthrough may only be the final statement of its case.
fn check_fallthrough_is_last(children: &[Node]) -> ParseResult<()> {
    let last = children.len().saturating_sub(1);
    for (i, child) in children.iter().enumerate() {
        match child {
            Node::Fallthrough(f) if i != last => {
                return Err(ParseError::new(
                    f.expression.range.from,
                    "case: fallthrough must be the last statement in a case",
                ));
            }
            Node::Fallthrough(_) | Node::Text(_) | Node::StringExpression(_) | Node::Switch(_) => {}
        }
    }
    Ok(())
}

/// The last case has no successor to fall into.
fn check_final_case(cases: &[CaseExpression]) -> ParseResult<()> {
    match cases.last().and_then(|case| case.children.last()) {
        Some(Node::Fallthrough(f)) => Err(ParseError::new(
            f.expression.range.from,
            "switch: cannot fallthrough final case in switch",
        )),
        Some(Node::Text(_) | Node::StringExpression(_) | Node::Switch(_)) | None => Ok(()),
    }
}
