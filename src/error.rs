//! Parse errors.
//!
//! [`ParseError`] is the single fatal error produced once a construct's
//! prefix has committed the parser to its grammar. It carries the resolved
//! source [`Position`] of the offending token for diagnostic formatting.

use crate::ast::position::Position;
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}: {position}")]
pub struct ParseError {
    pub position: Position,
    pub message: String,
    pub hint: Option<String>,
}

impl ParseError {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Format the error with source context for display
    pub fn format_with_source(&self, source: &str, entry_name: Option<&str>) -> String {
        let Position { line, col, .. } = self.position;
        let source_line = source.lines().nth(line.saturating_sub(1)).unwrap_or("");

        let location = if let Some(name) = entry_name {
            format!(" --> {name}:{line}:{col}")
        } else {
            format!(" --> {line}:{col}")
        };

        // Tabs keep their width so the caret lines up under the token.
        let indent: String = source_line
            .chars()
            .take(col.saturating_sub(1))
            .map(|ch| if ch == '\t' { '\t' } else { ' ' })
            .collect();

        let mut output = format!(
            "Error: {}\n{location}\n  |\n{line:>3} | {source_line}\n    | {indent}^",
            self.message
        );

        if let Some(hint) = &self.hint {
            output.push_str(&format!("\n  = hint: {hint}"));
        }

        output
    }
}
