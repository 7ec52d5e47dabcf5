//! Reconciler protocol: materializing a drained instruction log against a
//! real tree the core never touches directly.

use std::collections::HashMap;

use crate::address;
use crate::error::Error;
use crate::instruction::Instruction;
use crate::types::Id;

/// Capability contract for the external collaborator that owns the real
/// tree. The core calls out through this trait and nothing else; `Handle` is
/// whatever the host uses to refer to a real node (an owned value, an `Rc`,
/// a JS reference, ...).
///
/// `on_replace_with` receives the target as a decoded child-index path
/// because only the reconciler can walk its own tree; the path must be
/// resolved against the real root as it stands when the instruction is
/// replayed, which is why replay order is strict.
pub trait Reconciler {
    type Handle;

    fn on_create_text(&mut self, text: &str) -> Self::Handle;

    fn on_create_element(&mut self, tag: &str) -> Self::Handle;

    /// Attach a created node under another created (not yet attached) node.
    fn on_append_child(&mut self, parent: &mut Self::Handle, child: Self::Handle);

    /// Replace the real node at `target` with `replacements`, in order.
    fn on_replace_with(&mut self, target: &[usize], replacements: Vec<Self::Handle>);
}

/// Replay a log in emission order.
///
/// A per-call table correlates creation-order ids with the handles the
/// reconciler returned for them. `ReplaceWith` hands over the handles of the
/// descriptors created during this replay, in list order; descriptors for
/// pre-existing siblings have no table entry and stay where they already are
/// in the real tree.
///
/// Every address is validated before the first reconciler call, so a
/// malformed hydrated log fails without any visible change.
pub(crate) fn replay<R: Reconciler>(
    instructions: &[Instruction],
    reconciler: &mut R,
) -> Result<(), Error> {
    let mut paths = Vec::new();
    for instruction in instructions {
        if let Instruction::ReplaceWith { target, .. } = instruction {
            paths.push(address::decode(target)?);
        }
    }
    let mut paths = paths.into_iter();

    let mut handles: HashMap<Id, R::Handle> = HashMap::new();
    for instruction in instructions {
        match instruction {
            Instruction::CreateText { target, value } => {
                log::debug!(target: "textmap.commit", "create text node #{}", value.id.0);
                let handle = reconciler.on_create_text(&value.text);
                match target {
                    Some(parent_id) => {
                        if let Some(parent) = handles.get_mut(parent_id) {
                            reconciler.on_append_child(parent, handle);
                        }
                    }
                    None => {
                        handles.insert(value.id, handle);
                    }
                }
            }
            Instruction::CreateElement { value, .. } => {
                log::debug!(target: "textmap.commit", "create element <{}> #{}", value.tag, value.id.0);
                let handle = reconciler.on_create_element(&value.tag);
                handles.insert(value.id, handle);
            }
            Instruction::ReplaceWith { target, value } => {
                let path = paths.next().expect("one decoded path per ReplaceWith");
                // handles are moved out: each created node attaches once
                let replacements: Vec<R::Handle> = value
                    .iter()
                    .filter_map(|descriptor| handles.remove(&descriptor.id))
                    .collect();
                log::debug!(
                    target: "textmap.commit",
                    "replace node at {target:?} with {} created node(s)",
                    replacements.len()
                );
                reconciler.on_replace_with(&path, replacements);
            }
        }
    }
    Ok(())
}
