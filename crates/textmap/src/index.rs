//! The index: shadow tree + mapping + instruction log behind one surface.

use std::sync::Arc;

use crate::address;
use crate::error::Error;
use crate::instruction::{ElementValue, Instruction, NodeDescriptor, TextValue};
use crate::mapping::{TextMapping, build_mapping};
use crate::matcher::{self, MatchOptions};
use crate::reconcile::{Reconciler, replay};
use crate::tree::ShadowTree;
use crate::types::{IndexConfig, NodeData, NodeRef, SourceNode};

/// Options for [`TextIndex::replace_text`].
#[derive(Clone, Debug, Default)]
pub struct ReplaceOptions {
    /// Explicit target address; when absent the target is the first search
    /// hit for the query.
    pub at: Option<String>,
    /// Bound the query with the boundary-character set (see
    /// [`matcher::is_boundary`]) instead of matching substrings.
    pub whole_word: bool,
    /// Zero-based occurrence to replace when the target text contains the
    /// query more than once.
    pub replacement_index: usize,
}

/// A stable, addressable index over the text content of a node tree.
///
/// Construction wraps the host tree into a shadow tree and builds the
/// mapping. Queries are read-only against whatever mapping is current;
/// mutations splice the shadow tree, append to the instruction log, and
/// rebuild the mapping. `commit` later drains the log through a
/// [`Reconciler`] to materialize the changes in a real tree.
pub struct TextIndex {
    tree: ShadowTree,
    mapping: TextMapping,
    instructions: Vec<Instruction>,
}

impl TextIndex {
    pub fn new<N: SourceNode>(root: &N) -> Self {
        Self::with_config(root, IndexConfig::default())
    }

    pub fn with_config<N: SourceNode>(root: &N, config: IndexConfig) -> Self {
        let tree = ShadowTree::from_source(root, config.text_node_type);
        let mapping = build_mapping(&tree);
        Self {
            tree,
            mapping,
            instructions: Vec::new(),
        }
    }

    // Queries -------------------------------------------------------------

    /// Full visible text: mapping entries concatenated in order.
    pub fn get_text(&self) -> String {
        self.mapping.full_text()
    }

    /// The current mapping. Invalidated by any structural mutation; re-fetch
    /// after every `replace_text` / `replace_with`.
    pub fn mapping(&self) -> &TextMapping {
        &self.mapping
    }

    /// Address of the first mapping entry matching the query, in mapping
    /// order.
    pub fn get_address_for_text(&self, query: &str, options: MatchOptions) -> Option<String> {
        self.mapping
            .entries()
            .iter()
            .find(|entry| matcher::matches(&entry.text, query, options))
            .map(|entry| entry.address.clone())
    }

    /// Addresses of every matching mapping entry, in mapping order.
    pub fn get_addresses_for_text(&self, query: &str, options: MatchOptions) -> Vec<String> {
        self.mapping
            .entries()
            .iter()
            .filter(|entry| matcher::matches(&entry.text, query, options))
            .map(|entry| entry.address.clone())
            .collect()
    }

    pub fn get_text_by_address(&self, address: &str) -> Option<&str> {
        self.mapping.text_at(address)
    }

    /// True iff exactly one mapping entry matches the query, i.e. the text
    /// lives inside a single node rather than spanning several (or many).
    pub fn is_in_single_node(&self, query: &str, options: MatchOptions) -> bool {
        self.mapping
            .entries()
            .iter()
            .filter(|entry| matcher::matches(&entry.text, query, options))
            .count()
            == 1
    }

    /// The text node behind the first matching mapping entry.
    pub fn get_text_node(&self, query: &str, options: MatchOptions) -> Option<NodeRef> {
        let address = self.get_address_for_text(query, options)?;
        self.get_node_by_address(&address).ok().flatten()
    }

    /// Walk an address against the shadow tree. Absence (an index out of
    /// range) is `None`; only a malformed address is an error.
    pub fn get_node_by_address(&self, address: &str) -> Result<Option<NodeRef>, Error> {
        let path = address::decode(address)?;
        Ok(self.tree.walk(self.tree.root(), &path))
    }

    /// Resolve a node's current address, or `None` for detached nodes.
    pub fn get_address_from_node(&self, node: NodeRef) -> Option<String> {
        self.tree.address_of(node).map(|path| address::encode(&path))
    }

    // Node accessors ------------------------------------------------------

    pub fn root(&self) -> NodeRef {
        self.tree.root()
    }

    pub fn node_data(&self, node: NodeRef) -> &NodeData {
        &self.tree.get(node).data
    }

    /// Text payload of a text node; `None` for elements.
    pub fn text_of(&self, node: NodeRef) -> Option<&str> {
        self.tree.get(node).data.text()
    }

    pub fn children(&self, node: NodeRef) -> &[NodeRef] {
        &self.tree.get(node).children
    }

    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.tree.get(node).parent
    }

    pub fn previous_sibling(&self, node: NodeRef) -> Option<NodeRef> {
        self.tree.previous_sibling(node)
    }

    pub fn next_sibling(&self, node: NodeRef) -> Option<NodeRef> {
        self.tree.next_sibling(node)
    }

    // Mutation ------------------------------------------------------------

    /// Create a detached element node and record the creation.
    pub fn create_element(&mut self, tag: &str) -> NodeRef {
        let node = self.tree.alloc(NodeData::Element { tag: Arc::from(tag) });
        let id = self.tree.get(node).id;
        self.instructions.push(Instruction::CreateElement {
            target: None,
            value: ElementValue {
                id,
                tag: tag.to_string(),
            },
        });
        node
    }

    /// Create a detached text node and record the creation.
    pub fn create_text_node(&mut self, text: &str) -> NodeRef {
        let node = self.tree.alloc(NodeData::Text {
            text: text.to_string(),
        });
        let id = self.tree.get(node).id;
        self.instructions.push(Instruction::CreateText {
            target: None,
            value: TextValue {
                id,
                text: text.to_string(),
            },
        });
        node
    }

    /// Set a node's text. On a text node this rewrites the payload. On an
    /// element it is sugar: a single text child is synthesized, re-parented
    /// under the element, and recorded as a `CreateText` targeting the
    /// element's id — elements never hold text directly.
    pub fn set_text(&mut self, node: NodeRef, text: &str) {
        match &self.tree.get(node).data {
            NodeData::Text { .. } => {
                self.tree.get_mut(node).data = NodeData::Text {
                    text: text.to_string(),
                };
            }
            NodeData::Element { .. } => {
                let element_id = self.tree.get(node).id;
                let child = self.tree.alloc(NodeData::Text {
                    text: text.to_string(),
                });
                let child_id = self.tree.get(child).id;
                self.tree.get_mut(child).parent = Some(node);
                self.tree.get_mut(node).children = vec![child];
                self.instructions.push(Instruction::CreateText {
                    target: Some(element_id),
                    value: TextValue {
                        id: child_id,
                        text: text.to_string(),
                    },
                });
            }
        }
    }

    /// Replace `target` with `nodes` in its parent's child list and record a
    /// single `ReplaceWith` carrying the target's pre-splice address and the
    /// parent's full post-splice child list. The mapping is rebuilt, so all
    /// previously issued addresses below the parent are stale afterwards.
    pub fn replace_with(&mut self, target: NodeRef, nodes: &[NodeRef]) -> Result<(), Error> {
        let splice = self.tree.splice_replace(target, nodes)?;
        let value = splice
            .siblings
            .iter()
            .map(|&sibling| {
                let node = self.tree.get(sibling);
                NodeDescriptor {
                    id: node.id,
                    kind: node.data.kind(),
                }
            })
            .collect();
        self.instructions.push(Instruction::ReplaceWith {
            target: address::encode(&splice.target_path),
            value,
        });
        self.remap();
        Ok(())
    }

    /// Replace one occurrence of `query` inside a single text node with
    /// `nodes`, preserving the surrounding text.
    ///
    /// The target is the node at `options.at` when given, otherwise the
    /// first search hit. The occurrence selected by
    /// `options.replacement_index` is cut out; non-empty text before and
    /// after it — including any other occurrences of the query — is rejoined
    /// verbatim into leading/trailing sibling text nodes. Fails with
    /// [`Error::TextNotFound`] (leaving tree, mapping, and log untouched)
    /// when the target's text has no such occurrence under the active mode.
    pub fn replace_text(
        &mut self,
        query: &str,
        nodes: &[NodeRef],
        options: ReplaceOptions,
    ) -> Result<(), Error> {
        let search = MatchOptions {
            case_sensitive: true,
            whole_word: options.whole_word,
        };
        let target = match &options.at {
            Some(at) => self.get_node_by_address(at)?.ok_or(Error::TextNotFound)?,
            None => self
                .get_text_node(query, search)
                .ok_or(Error::TextNotFound)?,
        };
        let text = match &self.tree.get(target).data {
            NodeData::Text { text } => text.clone(),
            NodeData::Element { .. } => return Err(Error::TextNotFound),
        };

        let spans = matcher::find_spans(&text, query, search);
        let span = spans
            .get(options.replacement_index)
            .cloned()
            .ok_or(Error::TextNotFound)?;

        // All failure paths are behind us before any instruction is emitted:
        // the fragment creations below must not be recorded for a replacement
        // that then fails to splice.
        if self.tree.get(target).parent.is_none() || self.tree.address_of(target).is_none() {
            return Err(Error::NoParent);
        }

        log::debug!(
            target: "textmap.index",
            "replace occurrence {} of {query:?} ({} replacement node(s))",
            options.replacement_index,
            nodes.len()
        );

        let leading = &text[..span.start];
        let trailing = &text[span.end..];
        let mut sequence = Vec::with_capacity(nodes.len() + 2);
        if !leading.is_empty() {
            sequence.push(self.create_text_node(leading));
        }
        sequence.extend_from_slice(nodes);
        if !trailing.is_empty() {
            sequence.push(self.create_text_node(trailing));
        }
        self.replace_with(target, &sequence)
    }

    /// Rebuild the mapping from the current tree shape. Called internally
    /// after every structural replacement; public so a caller holding stale
    /// addresses can refresh explicitly.
    pub fn remap(&mut self) {
        self.mapping = build_mapping(&self.tree);
    }

    // Instruction log -----------------------------------------------------

    /// Snapshot of the pending log.
    pub fn get_diff(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Replace the pending log wholesale, e.g. with one captured elsewhere.
    pub fn hydrate_diff(&mut self, instructions: Vec<Instruction>) {
        self.instructions = instructions;
    }

    /// Drain the log through `reconciler` in emission order, then clear it.
    /// With an empty log this is a no-op, so committing twice is safe.
    pub fn commit<R: Reconciler>(&mut self, reconciler: &mut R) -> Result<(), Error> {
        replay(&self.instructions, reconciler)?;
        self.instructions.clear();
        Ok(())
    }
}
