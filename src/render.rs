//! Render a Huffman tree as Graphviz DOT text.
//!
//! Nodes are keyed by their arena index. Leaves are boxes labeled
//! `symbol:frequency`, internal nodes carry their frequency, and edges are
//! labeled with the bit they stand for.

use std::fmt::Display;

use crate::tree::{HuffmanTree, NodeId, TreeNode};

/// DOT source for `tree`. Pipe it to `dot -Tsvg` or similar to draw it.
pub fn to_dot<S: Display>(tree: &HuffmanTree<S>) -> String {
    let mut out = String::from("digraph huffman {\n");
    write_node(&mut out, tree, tree.root());
    out.push_str("}\n");
    out
}

fn write_node<S: Display>(out: &mut String, tree: &HuffmanTree<S>, id: NodeId) {
    match tree.node(id) {
        TreeNode::Leaf { symbol, weight } => {
            let label = escape(&format!("{}:{}", symbol, weight));
            out.push_str(&format!("    n{} [label=\"{}\", shape=box];\n", id, label));
        }
        TreeNode::Internal {
            weight,
            left,
            right,
        } => {
            out.push_str(&format!("    n{} [label=\"{}\"];\n", id, weight));
            out.push_str(&format!("    n{} -> n{} [label=\"0\"];\n", id, left));
            write_node(out, tree, *left);
            out.push_str(&format!("    n{} -> n{} [label=\"1\"];\n", id, right));
            write_node(out, tree, *right);
        }
    }
}

/// Escape a label for a double-quoted DOT string.
fn escape(label: &str) -> String {
    label
        .chars()
        .fold(String::with_capacity(label.len()), |mut acc, c| {
            match c {
                '"' => acc.push_str("\\\""),
                '\\' => acc.push_str("\\\\"),
                '\n' => acc.push_str("\\n"),
                '\r' => acc.push_str("\\r"),
                '\t' => acc.push_str("\\t"),
                _ => acc.push(c),
            }
            acc
        })
}
