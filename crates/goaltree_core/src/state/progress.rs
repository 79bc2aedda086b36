//! Progress aggregator.
//!
//! # Responsibility
//! - Push a completion edit down through a whole subtree.
//! - Recompute ancestor completion from immediate children, bottom-up.
//!
//! # Invariants
//! - `set_done_recursive` overwrites the whole subtree: `done` everywhere,
//!   `progress` 100 or 0.
//! - Ancestor state depends only on immediate children, so the downward pass
//!   must finish before the upward pass starts.
//! - Progress averages round half up.

use crate::model::goal::{GoalNode, NodeId};
use crate::tree::{node_at_path_mut, path_to};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const PROGRESS_DONE: u8 = 100;
pub const PROGRESS_NONE: u8 = 0;

/// Errors from progress edits addressed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressError {
    NodeNotFound(NodeId),
}

impl Display for ProgressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "goal node not found: {id}"),
        }
    }
}

impl Error for ProgressError {}

/// Sets `done` on `node` and every descendant.
pub fn set_done_recursive(node: &mut GoalNode, done: bool) {
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        current.record.done = done;
        current.record.progress = if done { PROGRESS_DONE } else { PROGRESS_NONE };
        stack.extend(current.children.iter_mut());
    }
}

/// Recomputes `done`/`progress` on every strict ancestor of `id`, nearest first.
pub fn recompute_ancestors(forest: &mut [GoalNode], id: &NodeId) -> Result<(), ProgressError> {
    let path = path_to(forest, id).ok_or_else(|| ProgressError::NodeNotFound(id.clone()))?;
    for len in (1..path.len()).rev() {
        if let Some(ancestor) = node_at_path_mut(forest, &path[..len]) {
            rollup_from_children(ancestor);
        }
    }
    Ok(())
}

/// Applies one completion edit: downward overwrite, then upward recompute.
pub fn set_done(forest: &mut [GoalNode], id: &NodeId, done: bool) -> Result<(), ProgressError> {
    let path = path_to(forest, id).ok_or_else(|| ProgressError::NodeNotFound(id.clone()))?;
    let node = node_at_path_mut(forest, &path)
        .ok_or_else(|| ProgressError::NodeNotFound(id.clone()))?;
    set_done_recursive(node, done);
    recompute_ancestors(forest, id)?;
    debug!(
        "event=set_done module=progress status=ok node_id={} done={} ancestors={}",
        id,
        done,
        path.len() - 1
    );
    Ok(())
}

/// Recomputes `node` from its immediate children. Leaves are left untouched.
pub fn rollup_from_children(node: &mut GoalNode) {
    if node.children.is_empty() {
        return;
    }
    let count = node.children.len() as u32;
    let sum: u32 = node
        .children
        .iter()
        .map(|child| u32::from(child.record.progress))
        .sum();
    node.record.done = node.children.iter().all(|child| child.record.done);
    node.record.progress = round_half_up(sum, count);
}

fn round_half_up(sum: u32, count: u32) -> u8 {
    let rounded = (2 * sum + count) / (2 * count);
    u8::try_from(rounded.min(u32::from(PROGRESS_DONE))).unwrap_or(PROGRESS_DONE)
}
