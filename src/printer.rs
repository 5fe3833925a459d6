//! Canonical source output.
//!
//! Prints statements one per line with tab indentation, and keeps text and
//! `{ expr }` nodes that shared a line together. Spacing is not preserved,
//! but parsing the output gives back the same tree shape, so printing is
//! idempotent:
//!
//! ```rust
//! let source = "switch x {\n  case 1:   \n<p>{ name }</p>\n  fallthrough\n default:\n ok\n}";
//! let printed = tmpl_switch::parse(source).unwrap().to_string();
//! assert_eq!(
//!     printed,
//!     "switch x {\n\tcase 1:\n\t\t<p>{ name }</p>\n\t\tfallthrough\n\tdefault:\n\t\tok\n}\n"
//! );
//! assert_eq!(tmpl_switch::parse(&printed).unwrap().to_string(), printed);
//! ```

use std::fmt::{self, Write};

use crate::ast::template::*;

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nodes(f, &self.nodes, 0)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, 0)
    }
}

/// Text and output expressions that shared a line keep sharing one, so
/// markup such as `{ n } case study` is not printed as a clause header.
fn write_nodes(out: &mut impl Write, nodes: &[Node], depth: usize) -> fmt::Result {
    let mut prev: Option<&Node> = None;
    for node in nodes {
        let continues_line = matches!(
            (prev, node),
            (Some(Node::StringExpression(_)), Node::Text(_) | Node::StringExpression(_))
                | (Some(Node::Text(_)), Node::StringExpression(_))
        );
        if continues_line {
            write_inline(out, node)?;
        } else {
            if prev.is_some_and(is_inline) {
                writeln!(out)?;
            }
            write_node_start(out, node, depth)?;
        }
        prev = Some(node);
    }
    if prev.is_some_and(is_inline) {
        writeln!(out)?;
    }
    Ok(())
}

fn is_inline(node: &Node) -> bool {
    match node {
        Node::Text(_) | Node::StringExpression(_) => true,
        Node::Switch(_) | Node::Fallthrough(_) => false,
    }
}

fn write_node(out: &mut impl Write, node: &Node, depth: usize) -> fmt::Result {
    write_node_start(out, node, depth)?;
    if is_inline(node) {
        writeln!(out)?;
    }
    Ok(())
}

/// Indent and write `node`. Statements end their own line; inline nodes
/// leave it open.
fn write_node_start(out: &mut impl Write, node: &Node, depth: usize) -> fmt::Result {
    indent(out, depth)?;
    match node {
        Node::Text(_) | Node::StringExpression(_) => write_inline(out, node),
        Node::Fallthrough(_) => writeln!(out, "fallthrough"),
        Node::Switch(switch) => {
            if switch.expression.value.is_empty() {
                writeln!(out, "switch {{")?;
            } else {
                writeln!(out, "switch {} {{", switch.expression.value)?;
            }
            for case in &switch.cases {
                indent(out, depth + 1)?;
                match &case.expression {
                    CaseHeader::Case(expression) => writeln!(out, "case {}:", expression.value)?,
                    CaseHeader::Default(_) => writeln!(out, "default:")?,
                }
                write_nodes(out, &case.children, depth + 2)?;
            }
            indent(out, depth)?;
            writeln!(out, "}}")
        }
    }
}

fn write_inline(out: &mut impl Write, node: &Node) -> fmt::Result {
    match node {
        Node::Text(text) => write!(out, "{}", text.value),
        Node::StringExpression(s) => write!(out, "{{ {} }}", s.expression.value),
        Node::Switch(_) | Node::Fallthrough(_) => write_node(out, node, 0),
    }
}

fn indent(out: &mut impl Write, depth: usize) -> fmt::Result {
    (0..depth).try_for_each(|_| out.write_char('\t'))
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tagless_switch() {
        let printed = parse("switch {\ncase x > 1:\nbig\n}").unwrap().to_string();
        assert_eq!(printed, "switch {\n\tcase x > 1:\n\t\tbig\n}\n");
    }

    #[test]
    fn test_nested_indentation() {
        let printed = parse("switch a {\ncase 1:\nswitch b {\ndefault:\n{ b }\n}\n}")
            .unwrap()
            .to_string();
        assert_eq!(
            printed,
            "switch a {\n\tcase 1:\n\t\tswitch b {\n\t\t\tdefault:\n\t\t\t\t{ b }\n\t\t}\n}\n"
        );
    }

    #[test]
    fn test_text_after_expression_stays_on_its_line() {
        let source = "switch x {\ncase 1:\n<p>{ n } case study</p>\n<p>one</p>\ndefault:\n<p>{ n } default role</p>\n}";
        let printed = parse(source).unwrap().to_string();
        assert_eq!(
            printed,
            "switch x {\n\tcase 1:\n\t\t<p>{ n }case study</p>\n\t\t<p>one</p>\n\tdefault:\n\t\t<p>{ n }default role</p>\n}\n"
        );
        assert_eq!(parse(&printed).unwrap().to_string(), printed);
    }

    #[test]
    fn test_single_node() {
        let template = parse("<p>{ name }</p>").unwrap();
        assert_eq!(template.nodes[1].to_string(), "{ name }\n");
    }
}
