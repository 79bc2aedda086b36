//! Collapse state: ids of nodes whose children are hidden.

use crate::model::goal::NodeId;
use crate::tree::TreeItem;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Set of collapsed node ids. Starts empty (everything expanded).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollapseState {
    collapsed: HashSet<NodeId>,
}

impl CollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id`. Returns `true` when the node is now collapsed.
    pub fn toggle(&mut self, id: &NodeId) -> bool {
        if self.collapsed.remove(id) {
            false
        } else {
            self.collapsed.insert(id.clone());
            true
        }
    }

    /// Marks `id` collapsed. Returns `false` when it already was.
    pub fn collapse(&mut self, id: &NodeId) -> bool {
        self.collapsed.insert(id.clone())
    }

    /// Expands every node.
    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    /// Collapses exactly the nodes with at least one child, visible or not.
    pub fn collapse_all<T: TreeItem>(&mut self, forest: &[T]) {
        self.collapsed.clear();
        collect_parents(forest, &mut self.collapsed);
    }

    pub fn is_collapsed(&self, id: &NodeId) -> bool {
        self.collapsed.contains(id)
    }

    pub fn len(&self) -> usize {
        self.collapsed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collapsed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.collapsed.iter()
    }
}

impl FromIterator<NodeId> for CollapseState {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            collapsed: iter.into_iter().collect(),
        }
    }
}

fn collect_parents<T: TreeItem>(nodes: &[T], out: &mut HashSet<NodeId>) {
    for node in nodes {
        if node.has_children() {
            out.insert(node.id().clone());
            collect_parents(node.children(), out);
        }
    }
}
