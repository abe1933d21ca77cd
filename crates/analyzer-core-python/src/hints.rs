//! Function declaration hints from a parse tree.

use crate::parser::text_of;
use analyzer_core::Hint;
use tree_sitter::{Node, Tree};

/// One [`Hint::function`] per `def` (nested and `async` ones included), in source order.
pub fn function_hints(tree: &Tree, source: &str) -> Vec<Hint> {
    let mut hints = Vec::new();
    collect(tree.root_node(), source.as_bytes(), &mut hints);
    hints
}

fn collect(node: Node<'_>, source: &[u8], hints: &mut Vec<Hint>) {
    if node.kind() == "function_definition"
        && let Some(name) = node.child_by_field_name("name")
    {
        hints.push(Hint::function(node.start_position().row, text_of(name, source)));
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect(child, source, hints);
    }
}
