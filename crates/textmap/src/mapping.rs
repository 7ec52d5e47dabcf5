//! Text mapper: ordered `(text, address)` pairs for every leaf text node.
//!
//! Entries are produced by a depth-first, children-in-order walk, so
//! concatenating the entry texts in order reconstructs the tree's full
//! visible text with no separators added. A mapping describes one tree
//! shape; any structural mutation invalidates it and requires a remap.

use crate::address;
use crate::tree::ShadowTree;
use crate::types::NodeData;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingEntry {
    pub text: String,
    pub address: String,
}

#[derive(Clone, Debug, Default)]
pub struct TextMapping {
    entries: Vec<MappingEntry>,
}

impl TextMapping {
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Concatenation of all entry texts, in mapping order.
    pub fn full_text(&self) -> String {
        self.entries.iter().map(|e| e.text.as_str()).collect()
    }

    /// Reverse lookup by exact address equality.
    pub fn text_at(&self, address: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.address == address)
            .map(|e| e.text.as_str())
    }
}

pub(crate) fn build_mapping(tree: &ShadowTree) -> TextMapping {
    let mut entries = Vec::new();
    let mut path = Vec::new();
    collect(tree, tree.root(), &mut path, &mut entries);
    TextMapping { entries }
}

fn collect(
    tree: &ShadowTree,
    node: crate::types::NodeRef,
    path: &mut Vec<usize>,
    out: &mut Vec<MappingEntry>,
) {
    for (i, &child) in tree.get(node).children.iter().enumerate() {
        match &tree.get(child).data {
            NodeData::Text { text } => {
                path.push(i);
                out.push(MappingEntry {
                    text: text.clone(),
                    address: address::encode(path),
                });
                path.pop();
            }
            NodeData::Element { .. } => {
                // empty elements contribute nothing
                if !tree.get(child).children.is_empty() {
                    path.push(i);
                    collect(tree, child, path, out);
                    path.pop();
                }
            }
        }
    }
}
