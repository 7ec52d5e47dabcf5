//! Shadow tree: an arena of generic nodes mirroring a host tree.
//!
//! Children are owned `NodeRef` lists on their parent; the parent link is a
//! non-owning back index, so the child/parent cycle never forms an ownership
//! cycle. Replaced nodes stay in the arena but detach (`parent == None`);
//! arena slots are never reused within an index lifetime.

use std::sync::Arc;

use crate::error::Error;
use crate::types::{Id, NodeData, NodeRef, SourceNode};

#[derive(Debug)]
pub(crate) struct ShadowNode {
    pub id: Id,
    pub data: NodeData,
    pub parent: Option<NodeRef>,
    pub children: Vec<NodeRef>,
}

#[derive(Debug)]
pub(crate) struct ShadowTree {
    nodes: Vec<ShadowNode>,
    next_id: u32,
    root: NodeRef,
}

/// Result of a 1-for-N child splice, captured before/after the mutation.
#[derive(Debug)]
pub(crate) struct Splice {
    /// The replaced node's path, resolved against the pre-splice tree shape.
    pub target_path: Vec<usize>,
    /// The parent's full post-splice child list.
    pub siblings: Vec<NodeRef>,
}

impl ShadowTree {
    pub fn from_source<N: SourceNode>(root: &N, text_node_type: u32) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            next_id: 0,
            root: NodeRef(0),
        };
        let root_ref = tree.wrap(root, None, text_node_type);
        tree.root = root_ref;
        tree
    }

    fn wrap<N: SourceNode>(
        &mut self,
        source: &N,
        parent: Option<NodeRef>,
        text_node_type: u32,
    ) -> NodeRef {
        let data = if source.node_type() == text_node_type {
            NodeData::Text {
                text: source.text().unwrap_or_default().to_string(),
            }
        } else {
            NodeData::Element {
                tag: Arc::from(source.tag().unwrap_or_default()),
            }
        };
        let node = self.alloc(data);
        self.nodes[node.0].parent = parent;
        let mut children = Vec::with_capacity(source.child_count());
        for i in 0..source.child_count() {
            if let Some(child) = source.child(i) {
                children.push(self.wrap(child, Some(node), text_node_type));
            }
        }
        self.nodes[node.0].children = children;
        node
    }

    /// Allocate a detached node and assign it the next creation-order id.
    pub fn alloc(&mut self, data: NodeData) -> NodeRef {
        let id = Id(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let node = NodeRef(self.nodes.len());
        self.nodes.push(ShadowNode {
            id,
            data,
            parent: None,
            children: Vec::new(),
        });
        node
    }

    pub fn root(&self) -> NodeRef {
        self.root
    }

    pub fn get(&self, node: NodeRef) -> &ShadowNode {
        &self.nodes[node.0]
    }

    pub fn get_mut(&mut self, node: NodeRef) -> &mut ShadowNode {
        &mut self.nodes[node.0]
    }

    /// Descend child indices from `from`. Out-of-range indices are absence,
    /// not an error.
    pub fn walk(&self, from: NodeRef, path: &[usize]) -> Option<NodeRef> {
        let mut current = from;
        for &index in path {
            current = *self.get(current).children.get(index)?;
        }
        Some(current)
    }

    /// Resolve a node's path by walking its parent chain up to the root.
    /// `None` for nodes not reachable from the root (detached subtrees).
    pub fn address_of(&self, node: NodeRef) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        let mut current = node;
        while current != self.root {
            let parent = self.get(current).parent?;
            let index = self
                .get(parent)
                .children
                .iter()
                .position(|&c| c == current)?;
            path.push(index);
            current = parent;
        }
        path.reverse();
        Some(path)
    }

    pub fn previous_sibling(&self, node: NodeRef) -> Option<NodeRef> {
        let parent = self.get(node).parent?;
        let siblings = &self.get(parent).children;
        let index = siblings.iter().position(|&c| c == node)?;
        index.checked_sub(1).map(|i| siblings[i])
    }

    pub fn next_sibling(&self, node: NodeRef) -> Option<NodeRef> {
        let parent = self.get(node).parent?;
        let siblings = &self.get(parent).children;
        let index = siblings.iter().position(|&c| c == node)?;
        siblings.get(index + 1).copied()
    }

    /// Replace `target` with `replacements` in its parent's child list.
    ///
    /// The target's address is resolved before anything mutates, so the
    /// reported path always describes the pre-splice shape. The splice itself
    /// re-parents every inserted node and detaches the target atomically.
    pub fn splice_replace(
        &mut self,
        target: NodeRef,
        replacements: &[NodeRef],
    ) -> Result<Splice, Error> {
        let parent = self.get(target).parent.ok_or(Error::NoParent)?;
        let index = self
            .get(parent)
            .children
            .iter()
            .position(|&c| c == target)
            .ok_or(Error::NotAChild)?;
        let target_path = self.address_of(target).ok_or(Error::NoParent)?;

        for &node in replacements {
            self.nodes[node.0].parent = Some(parent);
        }
        self.nodes[parent.0]
            .children
            .splice(index..=index, replacements.iter().copied());
        self.nodes[target.0].parent = None;

        log::trace!(
            target: "textmap.tree",
            "spliced {} node(s) in place of one at {:?}",
            replacements.len(),
            target_path
        );

        Ok(Splice {
            target_path,
            siblings: self.nodes[parent.0].children.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tree: &mut ShadowTree, text: &str) -> NodeRef {
        tree.alloc(NodeData::Text {
            text: text.to_string(),
        })
    }

    fn fixture() -> (ShadowTree, NodeRef, NodeRef) {
        // root > [a, b] with the splice target in the middle later
        let mut tree = ShadowTree {
            nodes: Vec::new(),
            next_id: 0,
            root: NodeRef(0),
        };
        let root = tree.alloc(NodeData::Element { tag: Arc::from("div") });
        tree.root = root;
        let a = leaf(&mut tree, "a");
        let b = leaf(&mut tree, "b");
        tree.get_mut(a).parent = Some(root);
        tree.get_mut(b).parent = Some(root);
        tree.get_mut(root).children = vec![a, b];
        (tree, a, b)
    }

    #[test]
    fn walk_returns_none_for_out_of_range_indices() {
        let (tree, a, _) = fixture();
        let root = tree.root();
        assert_eq!(tree.walk(root, &[0]), Some(a));
        assert_eq!(tree.walk(root, &[5]), None);
        assert_eq!(tree.walk(root, &[0, 0]), None);
        assert_eq!(tree.walk(root, &[]), Some(root));
    }

    #[test]
    fn address_of_walks_the_parent_chain() {
        let (tree, a, b) = fixture();
        assert_eq!(tree.address_of(tree.root()), Some(vec![]));
        assert_eq!(tree.address_of(a), Some(vec![0]));
        assert_eq!(tree.address_of(b), Some(vec![1]));
    }

    #[test]
    fn splice_replaces_one_node_with_many() {
        let (mut tree, a, b) = fixture();
        let x = leaf(&mut tree, "x");
        let y = leaf(&mut tree, "y");
        let splice = tree.splice_replace(a, &[x, y]).unwrap();
        assert_eq!(splice.target_path, vec![0]);
        assert_eq!(splice.siblings, vec![x, y, b]);
        assert_eq!(tree.get(x).parent, Some(tree.root()));
        assert_eq!(tree.get(a).parent, None);
        assert_eq!(tree.address_of(a), None);
    }

    #[test]
    fn splice_on_the_root_fails_with_no_parent() {
        let (mut tree, _, _) = fixture();
        let root = tree.root();
        let x = leaf(&mut tree, "x");
        assert_eq!(tree.splice_replace(root, &[x]).unwrap_err(), Error::NoParent);
    }

    #[test]
    fn siblings_resolve_in_order() {
        let (tree, a, b) = fixture();
        assert_eq!(tree.previous_sibling(a), None);
        assert_eq!(tree.next_sibling(a), Some(b));
        assert_eq!(tree.previous_sibling(b), Some(a));
        assert_eq!(tree.next_sibling(b), None);
    }
}
