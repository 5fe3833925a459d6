//! Host-expression extraction, built on [pest](https://pest.rs/).
//!
//! The grammar is defined in `go.pest`. It knows just enough Go to find
//! where an embedded expression ends; nothing is type-checked. Use
//! [`extract`] with the [`ExpressionContext`] of the keyword the cursor is
//! sitting on.

use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest_derive::Parser;

use super::cursor::Cursor;
use crate::ast::expr::Expression;
use crate::error::{ParseError, ParseResult};

#[derive(Parser)]
#[grammar = "parser/go.pest"]
struct GoParser;

/// Selects the termination grammar used by [`extract`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionContext {
    /// `switch <tag>`, ending before the block's `{`.
    Switch,
    /// `case <list>:` or `default:`, including the colon.
    Case,
    /// `fallthrough`, which must end its line.
    Fallthrough,
    /// `{ <expr> }` in output position.
    StringExpression,
}

impl ExpressionContext {
    /// Name used as the prefix of error messages.
    pub fn name(self) -> &'static str {
        match self {
            ExpressionContext::Switch => "switch",
            ExpressionContext::Case => "case",
            ExpressionContext::Fallthrough => "fallthrough",
            ExpressionContext::StringExpression => "string expression",
        }
    }

    fn rule(self) -> Rule {
        match self {
            ExpressionContext::Switch => Rule::switch_header,
            ExpressionContext::Case => Rule::clause_header,
            ExpressionContext::Fallthrough => Rule::fallthrough_stmt,
            ExpressionContext::StringExpression => Rule::string_expression,
        }
    }
}

/// Extract the expression that starts at the cursor.
///
/// The cursor must sit on the construct's keyword (or on `{` for a string
/// expression). On success it is left immediately after the consumed text;
/// on failure it does not move.
pub fn extract(cursor: &mut Cursor<'_>, context: ExpressionContext) -> ParseResult<Expression> {
    let base = cursor.index();
    let mut pairs = GoParser::parse(context.rule(), cursor.remaining())
        .map_err(|e| grammar_error(cursor, base, context, e))?;
    let Some(header) = pairs.next() else {
        return Err(expected_expression(cursor, base, context));
    };
    let end = base + header.as_span().end();

    let pair = value_pair(header);
    let text = match pair.as_rule() {
        Rule::default_clause => "default",
        _ => pair.as_str(),
    };
    let leading = text.len() - text.trim_start().len();
    let value = text.trim();
    if value.is_empty() && context == ExpressionContext::StringExpression {
        return Err(expected_expression(cursor, base, context));
    }

    let start = base + pair.as_span().start() + leading;
    let expression = Expression::new(value, cursor.range(start, start + value.len()));
    cursor.seek(end);
    Ok(expression)
}

/// Descend from the entry rule to the pair holding the expression text.
fn value_pair(pair: Pair<'_, Rule>) -> Pair<'_, Rule> {
    match pair.as_rule() {
        Rule::switch_header
        | Rule::clause_header
        | Rule::case_clause
        | Rule::fallthrough_stmt
        | Rule::string_expression => match pair.clone().into_inner().next() {
            Some(inner) => value_pair(inner),
            None => pair,
        },
        _ => pair,
    }
}

fn expected_expression(cursor: &Cursor<'_>, base: usize, context: ExpressionContext) -> ParseError {
    ParseError::new(
        cursor.position_at(base),
        format!("{}: expected Go expression", context.name()),
    )
}

fn grammar_error(
    cursor: &Cursor<'_>,
    base: usize,
    context: ExpressionContext,
    e: pest::error::Error<Rule>,
) -> ParseError {
    let offset = match &e.location {
        InputLocation::Pos(p) => *p,
        InputLocation::Span((s, _)) => *s,
    };
    let e = e.renamed_rules(describe_rule);
    ParseError::new(
        cursor.position_at(base + offset),
        format!("{}: invalid Go expression", context.name()),
    )
    .with_hint(e.variant.message())
}

fn describe_rule(rule: &Rule) -> String {
    let name = match rule {
        Rule::switch_header => "`switch <tag> {`",
        Rule::switch_tag => "switch tag",
        Rule::clause_header => "`case <expression>:` or `default:`",
        Rule::case_clause => "`case <expression>:`",
        Rule::case_list => "case expression list",
        Rule::default_clause => "`default:`",
        Rule::fallthrough_stmt | Rule::fallthrough_keyword => "`fallthrough` on its own line",
        Rule::string_expression => "`{ <expression> }`",
        Rule::string_body => "Go expression",
        Rule::EOI => "end of line",
        other => return format!("{other:?}"),
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::position::Position;

    fn extract_str(source: &str, context: ExpressionContext) -> (ParseResult<Expression>, usize) {
        let mut cursor = Cursor::new(source);
        let result = extract(&mut cursor, context);
        (result, cursor.index())
    }

    #[test]
    fn test_switch_tag() {
        let mut cursor = Cursor::new("switch input {\n");
        let expr = extract(&mut cursor, ExpressionContext::Switch).unwrap();
        assert_eq!(expr.value, "input");
        assert_eq!(expr.range.from, Position::new(7, 1, 8));
        assert_eq!(expr.range.to, Position::new(12, 1, 13));
        assert_eq!(cursor.remaining(), "{\n");
    }

    #[test]
    fn test_tagless_switch() {
        let mut cursor = Cursor::new("switch {\n");
        let expr = extract(&mut cursor, ExpressionContext::Switch).unwrap();
        assert_eq!(expr.value, "");
        assert_eq!(cursor.remaining(), "{\n");
    }

    #[test]
    fn test_switch_tag_with_composite_literal() {
        let (expr, _) = extract_str(
            r#"switch (T{a: "}"}).Kind {"#,
            ExpressionContext::Switch,
        );
        assert_eq!(expr.unwrap().value, r#"(T{a: "}"}).Kind"#);
    }

    #[test]
    fn test_switch_tag_without_brace_still_extracts() {
        // The missing brace is the caller's error to report.
        let mut cursor = Cursor::new("switch x\n");
        let expr = extract(&mut cursor, ExpressionContext::Switch).unwrap();
        assert_eq!(expr.value, "x");
        assert_eq!(cursor.remaining(), "\n");
    }

    #[test]
    fn test_switch_unbalanced_paren() {
        let (result, index) = extract_str("switch f(x {\n}", ExpressionContext::Switch);
        let err = result.unwrap_err();
        assert_eq!(err.message, "switch: invalid Go expression");
        assert!(err.hint.is_some());
        assert_eq!(index, 0);
    }

    #[test]
    fn test_case_list() {
        let mut cursor = Cursor::new("case \"a\", \"b\" :\n");
        let expr = extract(&mut cursor, ExpressionContext::Case).unwrap();
        assert_eq!(expr.value, r#""a", "b""#);
        assert_eq!(expr.range.from.index, 5);
        assert_eq!(cursor.remaining(), "\n");
    }

    #[test]
    fn test_case_with_slice_expression() {
        let (expr, _) = extract_str("case x[1:2]:\n", ExpressionContext::Case);
        assert_eq!(expr.unwrap().value, "x[1:2]");
    }

    #[test]
    fn test_default() {
        let mut cursor = Cursor::new("default :\n");
        let expr = extract(&mut cursor, ExpressionContext::Case).unwrap();
        assert_eq!(expr.value, "default");
        assert_eq!(expr.range.len(), 7);
        assert_eq!(cursor.remaining(), "\n");
    }

    #[test]
    fn test_case_unterminated_string() {
        let (result, index) = extract_str("case \"a:\n", ExpressionContext::Case);
        assert_eq!(result.unwrap_err().message, "case: invalid Go expression");
        assert_eq!(index, 0);
    }

    #[test]
    fn test_case_missing_colon() {
        let (result, _) = extract_str("case 1\n\t\t<p>one</p>\n", ExpressionContext::Case);
        let err = result.unwrap_err();
        assert_eq!(err.message, "case: invalid Go expression");
        assert_eq!(err.position.line, 1);
    }

    #[test]
    fn test_fallthrough() {
        let mut cursor = Cursor::new("fallthrough  \n\tcase 2:");
        let expr = extract(&mut cursor, ExpressionContext::Fallthrough).unwrap();
        assert_eq!(expr.value, "fallthrough");
        assert_eq!(expr.range.len(), "fallthrough".len());
        assert_eq!(cursor.remaining(), "\n\tcase 2:");
    }

    #[test]
    fn test_fallthrough_at_end_of_input() {
        let (expr, index) = extract_str("fallthrough", ExpressionContext::Fallthrough);
        assert_eq!(expr.unwrap().value, "fallthrough");
        assert_eq!(index, "fallthrough".len());
    }

    #[test]
    fn test_fallthrough_with_trailing_content() {
        let (result, _) = extract_str("fallthrough x\n", ExpressionContext::Fallthrough);
        let err = result.unwrap_err();
        assert_eq!(err.message, "fallthrough: invalid Go expression");
        let hint = err.hint.unwrap_or_default();
        assert!(hint.contains("end of line"), "hint: {hint}");
        assert!(!hint.contains("EOI"), "hint: {hint}");
    }

    #[test]
    fn test_string_expression() {
        let mut cursor = Cursor::new(r#"{ fmt.Sprintf("%d}", n) }</p>"#);
        let expr = extract(&mut cursor, ExpressionContext::StringExpression).unwrap();
        assert_eq!(expr.value, r#"fmt.Sprintf("%d}", n)"#);
        assert_eq!(expr.range.from.index, 2);
        assert_eq!(cursor.remaining(), "</p>");
    }

    #[test]
    fn test_empty_string_expression() {
        let (result, index) = extract_str("{  }", ExpressionContext::StringExpression);
        assert_eq!(
            result.unwrap_err().message,
            "string expression: expected Go expression"
        );
        assert_eq!(index, 0);
    }

    #[test]
    fn test_unterminated_string_expression() {
        let (result, _) = extract_str("{ user.Name(", ExpressionContext::StringExpression);
        assert!(result.is_err());
    }
}
