//! # tmpl-switch
//!
//! Parser and structural validator for `switch`/`case`/`fallthrough`
//! blocks in templates that mix markup with embedded Go expressions.
//!
//! The crate turns source text into a [`Template`] AST and rejects source
//! that is well-formed but illegal for the construct: a `fallthrough` that
//! is not the final statement of its case, or one in the last case of a
//! switch where there is nothing to fall into.
//!
//! ## Quick start
//!
//! ```rust
//! use tmpl_switch::{parse, CaseHeader, Node};
//!
//! let source = r#"switch input {
//! 	case "a":
//! 		<p>a</p>
//! 		fallthrough
//! 	default:
//! 		<p>{ input }</p>
//! }
//! "#;
//!
//! let template = parse(source).unwrap();
//! let Node::Switch(switch) = &template.nodes[0] else { panic!("expected switch") };
//! assert_eq!(switch.cases.len(), 2);
//! assert!(matches!(switch.cases[0].children.last(), Some(Node::Fallthrough(_))));
//! assert!(matches!(switch.cases[1].expression, CaseHeader::Default(_)));
//! ```
//!
//! ## Errors
//!
//! Every failure is a single [`ParseError`] with a resolved line and column:
//!
//! ```rust
//! let source = "switch x {\n\tcase 1:\n\t\t<p>one</p>\n\t\tfallthrough\n}\n";
//! let err = tmpl_switch::parse(source).unwrap_err();
//! assert_eq!(err.to_string(), "switch: cannot fallthrough final case in switch: line 4, col 3");
//! println!("{}", err.format_with_source(source, Some("page.templ")));
//! ```

pub mod ast;
pub mod error;
mod parser;
mod printer;

pub use ast::expr::Expression;
pub use ast::position::{Position, Range};
pub use ast::template::{
    CaseExpression, CaseHeader, FallthroughExpression, Node, StringExpression, SwitchExpression,
    Template, Text,
};
pub use error::{ParseError, ParseResult};
pub use parser::{Cursor, ExpressionContext, ParseOptions, extract, parse, parse_with_options};
