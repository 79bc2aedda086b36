//! Flattener: pre-order rows with depth annotation.

use crate::model::goal::GoalRecord;
use crate::tree::window::DepthWindow;
use crate::tree::TreeItem;
use serde::Serialize;

/// One grid row: scalar attributes plus traversal depth, no children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRow {
    #[serde(flatten)]
    pub record: GoalRecord,
    pub depth: usize,
}

/// Flattens every node of `forest`.
pub fn flatten<T: TreeItem>(forest: &[T]) -> Vec<FlatRow> {
    flatten_within(forest, DepthWindow::unbounded())
}

/// Flattens the nodes whose traversal depth lies in `window`.
///
/// Descendants below `window.max()` are never visited.
pub fn flatten_within<T: TreeItem>(forest: &[T], window: DepthWindow) -> Vec<FlatRow> {
    let mut rows = Vec::new();
    collect_rows(forest, 0, window, &mut rows);
    rows
}

fn collect_rows<T: TreeItem>(
    nodes: &[T],
    depth: usize,
    window: DepthWindow,
    out: &mut Vec<FlatRow>,
) {
    for node in nodes {
        if window.contains(depth) {
            out.push(FlatRow {
                record: node.record().clone(),
                depth,
            });
        }
        if depth < window.max() {
            collect_rows(node.children(), depth + 1, window, out);
        }
    }
}
