//! Pure tree transformations shared by the grid and graph views.
//!
//! # Responsibility
//! - Slice a forest to a depth window, promoting orphaned children.
//! - Flatten a forest into depth-tagged rows in pre-order.
//!
//! # Invariants
//! - Transformations never mutate their input and hold no state between calls.
//! - Depth is computed during traversal, starting at 0 for roots.

use crate::model::goal::{GoalNode, GoalRecord, NodeId};

pub mod flatten;
pub mod slice;
pub mod window;

/// Read-only view of a tree node, implemented by canonical and sliced nodes.
pub trait TreeItem: Sized {
    /// Scalar attributes of this node.
    fn record(&self) -> &GoalRecord;
    /// Ordered children.
    fn children(&self) -> &[Self];

    fn id(&self) -> &NodeId {
        &self.record().id
    }

    fn has_children(&self) -> bool {
        !self.children().is_empty()
    }
}

impl TreeItem for GoalNode {
    fn record(&self) -> &GoalRecord {
        &self.record
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

/// Counts every node in the forest.
pub fn count_nodes<T: TreeItem>(forest: &[T]) -> usize {
    forest
        .iter()
        .map(|node| 1 + count_nodes(node.children()))
        .sum()
}

/// Deepest level present in the forest, or `None` when empty.
pub fn max_depth<T: TreeItem>(forest: &[T]) -> Option<usize> {
    forest
        .iter()
        .map(|node| max_depth(node.children()).map_or(0, |depth| depth + 1))
        .max()
}

/// Finds a node by id with a pre-order search.
pub fn find_node<'a, T: TreeItem>(forest: &'a [T], id: &NodeId) -> Option<&'a T> {
    for node in forest {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = find_node(node.children(), id) {
            return Some(found);
        }
    }
    None
}

/// Returns the child-index path from a root to the node with `id`.
///
/// `path[0]` indexes the forest, each following entry indexes the previous
/// node's children.
pub fn path_to<T: TreeItem>(forest: &[T], id: &NodeId) -> Option<Vec<usize>> {
    for (index, node) in forest.iter().enumerate() {
        if node.id() == id {
            return Some(vec![index]);
        }
        if let Some(mut tail) = path_to(node.children(), id) {
            tail.insert(0, index);
            return Some(tail);
        }
    }
    None
}

/// Resolves a path produced by [`path_to`] to a mutable canonical node.
pub fn node_at_path_mut<'a>(
    forest: &'a mut [GoalNode],
    path: &[usize],
) -> Option<&'a mut GoalNode> {
    let (first, rest) = path.split_first()?;
    let mut cursor = forest.get_mut(*first)?;
    for index in rest {
        cursor = cursor.children.get_mut(*index)?;
    }
    Some(cursor)
}

/// Finds a canonical node by id for in-place edits.
pub fn find_node_mut<'a>(forest: &'a mut [GoalNode], id: &NodeId) -> Option<&'a mut GoalNode> {
    let path = path_to(forest, id)?;
    node_at_path_mut(forest, &path)
}

#[cfg(test)]
mod tests {
    use super::{count_nodes, find_node_mut, max_depth, path_to};
    use crate::model::goal::{GoalNode, NodeId};

    fn chain() -> Vec<GoalNode> {
        vec![
            GoalNode::new("a", "A").with_children([
                GoalNode::new("b", "B").with_children([GoalNode::new("c", "C")]),
                GoalNode::new("d", "D"),
            ]),
            GoalNode::new("e", "E"),
        ]
    }

    #[test]
    fn counts_and_depth_cover_whole_forest() {
        let forest = chain();
        assert_eq!(count_nodes(&forest), 5);
        assert_eq!(max_depth(&forest), Some(2));
        assert_eq!(max_depth::<GoalNode>(&[]), None);
    }

    #[test]
    fn path_to_returns_child_indexes() {
        let forest = chain();
        assert_eq!(path_to(&forest, &NodeId::from("c")), Some(vec![0, 0, 0]));
        assert_eq!(path_to(&forest, &NodeId::from("d")), Some(vec![0, 1]));
        assert_eq!(path_to(&forest, &NodeId::from("missing")), None);
    }

    #[test]
    fn find_node_mut_edits_in_place() {
        let mut forest = chain();
        find_node_mut(&mut forest, &NodeId::from("d")).unwrap().record.name = "D2".into();
        assert_eq!(forest[0].children[1].record.name, "D2");
    }
}
