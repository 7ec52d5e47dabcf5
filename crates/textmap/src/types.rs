use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// DOM-compatible discriminant for element nodes.
pub const ELEMENT_NODE: u32 = 1;
/// DOM-compatible discriminant for leaf text nodes.
pub const TEXT_NODE: u32 = 3;

/// Creation-order node identity. Monotonic per index, used only to correlate
/// instructions with the nodes a reconciler materializes for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id(pub u32);

/// Opaque handle to a shadow node. Handles stay valid for the lifetime of the
/// index they were issued by; replaced nodes keep their handle but detach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef(pub(crate) usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Element,
    Text,
}

/// Payload of a shadow node: elements carry a tag and (separately) children,
/// text leaves carry their literal content and never have children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    Element { tag: Arc<str> },
    Text { text: String },
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Element { .. } => NodeKind::Element,
            NodeData::Text { .. } => NodeKind::Text,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            NodeData::Text { text } => Some(text),
            NodeData::Element { .. } => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            NodeData::Element { tag } => Some(tag),
            NodeData::Text { .. } => None,
        }
    }
}

/// Capability contract for host trees being indexed. The core never sees the
/// host's node type directly; it reads kind, children, and text through this
/// trait while wrapping the tree, and never touches the host again afterwards.
pub trait SourceNode {
    /// Host discriminant for this node (e.g. DOM `nodeType` values).
    fn node_type(&self) -> u32;

    fn child_count(&self) -> usize;

    fn child(&self, index: usize) -> Option<&Self>;

    /// Text payload, present on leaf text nodes.
    fn text(&self) -> Option<&str>;

    /// Tag/kind descriptor, present on element nodes.
    fn tag(&self) -> Option<&str>;
}

/// Index construction options.
#[derive(Clone, Copy, Debug)]
pub struct IndexConfig {
    /// Which `SourceNode::node_type` value identifies leaf text nodes.
    pub text_node_type: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            text_node_type: TEXT_NODE,
        }
    }
}
