//! Structural mutation record and diff transport contract.
//!
//! Invariants:
//! - Instructions are appended in emission order and replayed in that order;
//!   replay is not commutative because `ReplaceWith` targets are addresses
//!   whose validity depends on earlier instructions having been applied.
//! - `ReplaceWith.value` is the parent's entire post-splice child list, not
//!   a delta, so a reconciler can replay without diffing logic of its own.
//! - The log is drained exactly once, by `commit`; instructions are never
//!   mutated in place.

use serde::{Deserialize, Serialize};

use crate::types::{Id, NodeKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextValue {
    pub id: Id,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementValue {
    pub id: Id,
    pub tag: String,
}

/// One slot of a post-splice sibling list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub id: Id,
    pub kind: NodeKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Instruction {
    /// A text node was created. `target`, when present, is the id of a
    /// previously created element the new node belongs under (the
    /// set-text-on-element sugar); detached creations carry no target.
    CreateText {
        target: Option<Id>,
        value: TextValue,
    },
    /// An element node was created, detached.
    CreateElement {
        target: Option<Id>,
        value: ElementValue,
    },
    /// The node at `target` (an address against the pre-splice tree shape)
    /// was replaced; `value` is its parent's full child list afterwards.
    ReplaceWith {
        target: String,
        value: Vec<NodeDescriptor>,
    },
}
