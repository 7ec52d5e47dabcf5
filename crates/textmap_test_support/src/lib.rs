//! Test collaborators for the `textmap` core: a plain value tree that
//! satisfies the host-tree contract, builder helpers, a reconciler that
//! materializes instruction logs against that tree, and JSON snapshots.

use serde::{Deserialize, Serialize};
use textmap::{ELEMENT_NODE, Reconciler, SourceNode, TEXT_NODE};

/// A minimal owned tree in the shape the core consumes: elements carry a tag
/// and children, text leaves carry a payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleNode {
    pub node_type: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<SimpleNode>,
}

impl SourceNode for SimpleNode {
    fn node_type(&self) -> u32 {
        self.node_type
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

pub fn element(tag: &str, children: Vec<SimpleNode>) -> SimpleNode {
    SimpleNode {
        node_type: ELEMENT_NODE,
        tag: Some(tag.to_string()),
        text: None,
        children,
    }
}

pub fn text(content: &str) -> SimpleNode {
    SimpleNode {
        node_type: TEXT_NODE,
        tag: None,
        text: Some(content.to_string()),
        children: Vec::new(),
    }
}

/// Concatenated text of every leaf, depth-first, no separators.
pub fn visible_text(node: &SimpleNode) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &SimpleNode, out: &mut String) {
    if let Some(text) = &node.text {
        out.push_str(text);
    }
    for child in &node.children {
        collect_text(child, out);
    }
}

/// JSON snapshot of a tree, for fixture assertions.
pub fn to_json(node: &SimpleNode) -> serde_json::Value {
    serde_json::to_value(node).unwrap_or_else(|err| panic!("tree does not serialize: {err}"))
}

/// Reconciler materializing instructions against an owned [`SimpleNode`]
/// tree. Handles are nodes by value: created nodes float until a replace
/// (or an append into another floating node) splices them in.
pub struct SimpleReconciler {
    pub root: SimpleNode,
}

impl SimpleReconciler {
    pub fn new(root: SimpleNode) -> Self {
        Self { root }
    }

    fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut SimpleNode> {
        let mut current = &mut self.root;
        for &index in path {
            current = current.children.get_mut(index)?;
        }
        Some(current)
    }
}

impl Reconciler for SimpleReconciler {
    type Handle = SimpleNode;

    fn on_create_text(&mut self, content: &str) -> SimpleNode {
        text(content)
    }

    fn on_create_element(&mut self, tag: &str) -> SimpleNode {
        element(tag, Vec::new())
    }

    fn on_append_child(&mut self, parent: &mut SimpleNode, child: SimpleNode) {
        parent.children.push(child);
    }

    fn on_replace_with(&mut self, target: &[usize], replacements: Vec<SimpleNode>) {
        let Some((&index, parent_path)) = target.split_last() else {
            panic!("cannot replace the real root");
        };
        let parent = self
            .node_at_mut(parent_path)
            .unwrap_or_else(|| panic!("no real node at parent path {parent_path:?}"));
        assert!(
            index < parent.children.len(),
            "replace target index {index} out of range at {target:?}"
        );
        parent.children.splice(index..=index, replacements);
    }
}

/// A paragraph adapted from the Wikipedia aracari article, with the
/// text-node boundaries that matter for addressing: "toucans" alone in a
/// link, ", make up the genus " as one leaf.
pub fn aracari_paragraph() -> SimpleNode {
    element(
        "div",
        vec![element(
            "p",
            vec![
                text("An "),
                element("b", vec![text("aracari")]),
                text(" or "),
                element("b", vec![text("araçari")]),
                text(" is any of the medium-sized "),
                element("a", vec![text("toucans")]),
                text(" that, together with the "),
                element("a", vec![text("saffron toucanet")]),
                text(", make up the genus "),
                element("i", vec![element("b", vec![text("Pteroglossus")])]),
                text("."),
            ],
        )],
    )
}

/// Full visible text of [`aracari_paragraph`].
pub const ARACARI_TEXT: &str = "An aracari or araçari is any of the medium-sized toucans that, \
     together with the saffron toucanet, make up the genus Pteroglossus.";
