use crate::TextIndex;
use crate::types::{NodeData, NodeRef};

/// Compact indented outline of a shadow subtree, capped at `cap` lines.
/// Intended for logs and test failure messages.
pub fn outline(index: &TextIndex, root: NodeRef, cap: usize) -> Vec<String> {
    fn walk(index: &TextIndex, node: NodeRef, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let indent = "  ".repeat(depth);
        match index.node_data(node) {
            NodeData::Element { tag } => {
                out.push(format!("{indent}<{tag}>"));
                for &child in index.children(node) {
                    walk(index, child, depth + 1, out, left);
                }
            }
            NodeData::Text { text } => {
                let t = text.replace('\n', " ");
                let show = if t.chars().count() > 40 {
                    let cut: String = t.chars().take(40).collect();
                    format!("{cut}…")
                } else {
                    t
                };
                out.push(format!("{indent}\"{show}\""));
            }
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    walk(index, root, 0, &mut out, &mut left);
    out
}
