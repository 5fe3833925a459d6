//! Abstract syntax tree types for switch templates.
//!
//! - **Template layer** ([`template`]): the closed [`Node`] set and the
//!   switch/case/fallthrough constructs built from it.
//! - **Expression layer** ([`expr`]): verbatim Go expressions with their
//!   source ranges.
//! - **Positions** ([`position`]): resolved byte/line/column locations.

pub mod expr;
pub mod position;
pub mod template;

// Convenience re-exports
pub use expr::Expression;
pub use position::{Position, Range};
pub use template::*;
