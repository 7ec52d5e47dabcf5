use thiserror::Error;

/// Failures surfaced by index operations.
///
/// Absence is not an error: lookups that can legitimately miss
/// (`get_node_by_address`, `get_text_node`, the walk helpers) return `None`.
/// `NoParent` and `NotAChild` indicate a structural violation in caller use;
/// they are never recovered internally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The query does not occur in the resolved target node under the active
    /// match mode (or the selected occurrence index does not exist).
    #[error("text not found in target node")]
    TextNotFound,

    /// `replace_with` on a node with no parent (the root cannot be replaced).
    #[error("cannot replace a node that has no parent")]
    NoParent,

    /// A node's parent does not list it as a child.
    #[error("node is not present in its parent's child list")]
    NotAChild,

    /// An address segment failed to parse as a non-negative integer.
    #[error("malformed address segment `{0}`")]
    MalformedAddress(String),
}
