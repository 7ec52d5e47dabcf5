//! Addressable text indexing and boundary-preserving replacement over
//! generic node trees.
//!
//! Given any tree of element and text nodes (entered through the
//! [`SourceNode`] contract), the index builds an ordered mapping of
//! `(text, address)` pairs, answers text searches against it, and replaces a
//! matched span with arbitrary new nodes while keeping the untouched text on
//! either side intact. Every structural mutation is recorded as an ordered
//! [`Instruction`] log that a [`Reconciler`] can later replay against a real
//! tree — deciding what changed and applying it are decoupled, so a diff
//! computed in one process can be materialized in another.

pub mod address;
pub mod debug;
pub mod mapping;
pub mod matcher;

mod error;
mod index;
mod instruction;
mod reconcile;
mod tree;
mod types;

pub use crate::error::Error;
pub use crate::index::{ReplaceOptions, TextIndex};
pub use crate::instruction::{ElementValue, Instruction, NodeDescriptor, TextValue};
pub use crate::mapping::{MappingEntry, TextMapping};
pub use crate::matcher::MatchOptions;
pub use crate::reconcile::Reconciler;
pub use crate::types::{
    ELEMENT_NODE, Id, IndexConfig, NodeData, NodeKind, NodeRef, SourceNode, TEXT_NODE,
};
