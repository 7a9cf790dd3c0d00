//! Graph-to-sequence linearization of a conversation's node mapping.
//!
//! A conversation is stored as a mapping of nodes linked by parent/child ids. Walking it
//! depth-first from the first real message yields the visible conversation:
//!
//! - a node with one child appends its message and continues with that child
//! - a node with several children appends its message followed by a [`BranchMarker`]
//!   holding one independently linearized sequence per child (`branch1`, `branch2`, ...)
//! - a node without children appends nothing
//!
//! One visited set is shared by the whole walk, so a node reachable through two paths
//! aborts the conversation instead of being emitted twice.
//!
//! The last rule means the final message of a chain is dropped when its node is a true
//! leaf. Existing exports depend on this, so it is not "fixed" here.

use std::collections::HashSet;

use tracing::debug;

use super::error::LinearizeError;
use super::normalizer::normalize_message;
use crate::models::{BranchMarker, Conversation, LinearEntry, NodeMapping};

/// Ordered conversation entries; a branch marker can only be the last element
pub type LinearSequence = Vec<LinearEntry>;

/// Linearize the subtree starting at `start_id`
///
/// # Errors
///
/// Returns an error if a node is reached twice, if a reached node has no message, or if
/// a referenced node is missing from `mapping`. No partial output is returned.
pub fn linearize(start_id: &str, mapping: &NodeMapping) -> Result<LinearSequence, LinearizeError> {
    let mut sequence = Vec::new();
    let mut visited = HashSet::new();
    linearize_into(start_id, mapping, &mut sequence, &mut visited)?;
    Ok(sequence)
}

fn linearize_into<'a>(
    start_id: &'a str,
    mapping: &'a NodeMapping,
    sequence: &mut LinearSequence,
    visited: &mut HashSet<&'a str>,
) -> Result<(), LinearizeError> {
    let mut current = start_id;

    // Single-child chains are followed in place; only branch points recurse
    loop {
        let node = mapping
            .get(current)
            .ok_or_else(|| LinearizeError::NodeNotFound { node_id: current.to_string() })?;

        if visited.contains(current) {
            return Err(LinearizeError::Revisited { node_id: current.to_string() });
        }
        let Some(message) = node.message.as_ref() else {
            return Err(LinearizeError::MissingMessage { node_id: current.to_string() });
        };
        visited.insert(current);

        match node.children.as_slice() {
            [] => return Ok(()),
            [only_child] => {
                sequence.push(LinearEntry::Message(normalize_message(message)));
                current = only_child.as_str();
            }
            children => {
                sequence.push(LinearEntry::Message(normalize_message(message)));
                debug!(node_id = current, branches = children.len(), "splitting into branches");

                let mut branches = Vec::with_capacity(children.len());
                for child in children {
                    let mut branch = Vec::new();
                    linearize_into(child, mapping, &mut branch, visited)?;
                    branches.push(branch);
                }
                sequence.push(LinearEntry::Branches(BranchMarker::new(branches)));
                return Ok(());
            }
        }
    }
}

/// Find the placeholder root: the node with neither a message nor a parent.
///
/// Returns the id of its only child (the first real message), or `None` for an empty
/// conversation whose root has no children.
///
/// # Errors
///
/// Returns an error if there is no root, more than one root, or the root has more than
/// one child.
pub fn find_root(mapping: &NodeMapping) -> Result<Option<&str>, LinearizeError> {
    let mut candidates: Vec<&str> = mapping
        .iter()
        .filter(|(_, node)| node.message.is_none() && node.parent.is_none())
        .map(|(id, _)| id.as_str())
        .collect();

    let root_id = match candidates.len() {
        0 => return Err(LinearizeError::NoRoot),
        1 => candidates[0],
        _ => {
            candidates.sort_unstable();
            return Err(LinearizeError::AmbiguousRoot {
                candidates: candidates.into_iter().map(ToString::to_string).collect(),
            });
        }
    };

    let root = &mapping[root_id];
    match root.children.as_slice() {
        [] => Ok(None),
        [first] => Ok(Some(first.as_str())),
        children => Err(LinearizeError::RootFanout {
            node_id: root_id.to_string(),
            child_count: children.len(),
        }),
    }
}

/// Locate the root of a conversation and linearize everything below it
pub fn linearize_conversation(
    conversation: &Conversation,
) -> Result<LinearSequence, LinearizeError> {
    match find_root(&conversation.mapping)? {
        Some(first_id) => linearize(first_id, &conversation.mapping),
        None => Ok(Vec::new()),
    }
}
