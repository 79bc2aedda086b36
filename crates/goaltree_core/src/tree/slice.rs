//! Depth slicer.
//!
//! # Responsibility
//! - Produce a re-rooted forest holding only nodes inside a depth window.
//!
//! # Invariants
//! - Nodes deeper than `max` are dropped with their subtrees.
//! - Nodes shallower than `min` are dropped and their surviving children are
//!   spliced in their place, preserving order.
//! - Surviving nodes carry `depth = absolute depth - min`.
//! - A surviving node with no surviving children has an empty `children` list,
//!   which is omitted on serialization.

use crate::model::goal::GoalRecord;
use crate::tree::window::{DepthWindow, DepthWindowError};
use crate::tree::TreeItem;
use serde::Serialize;

/// Node of a sliced forest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlicedNode {
    #[serde(flatten)]
    pub record: GoalRecord,
    /// Depth relative to the window's `min`.
    pub depth: usize,
    /// Depth in the canonical forest.
    pub abs_depth: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SlicedNode>,
}

impl TreeItem for SlicedNode {
    fn record(&self) -> &GoalRecord {
        &self.record
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

/// Slices `forest` to `window`.
pub fn slice_by_depth<T: TreeItem>(forest: &[T], window: DepthWindow) -> Vec<SlicedNode> {
    slice_level(forest, 0, window)
}

/// Slices `forest` to `[min, max]`, rejecting an inverted window.
pub fn slice<T: TreeItem>(
    forest: &[T],
    min: usize,
    max: usize,
) -> Result<Vec<SlicedNode>, DepthWindowError> {
    Ok(slice_by_depth(forest, DepthWindow::new(min, max)?))
}

fn slice_level<T: TreeItem>(nodes: &[T], depth: usize, window: DepthWindow) -> Vec<SlicedNode> {
    if depth > window.max() {
        return Vec::new();
    }

    let mut result = Vec::new();
    for node in nodes {
        let children = if depth < window.max() {
            slice_level(node.children(), depth + 1, window)
        } else {
            Vec::new()
        };

        if depth >= window.min() {
            result.push(SlicedNode {
                record: node.record().clone(),
                depth: depth - window.min(),
                abs_depth: depth,
                children,
            });
        } else {
            result.extend(children);
        }
    }
    result
}
