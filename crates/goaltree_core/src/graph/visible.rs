//! Coordinate-free graph conversion for auto-layout renderers.

use crate::model::goal::NodeId;
use crate::state::collapse::CollapseState;
use crate::tree::TreeItem;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub label: String,
    pub level: usize,
    pub is_parent: bool,
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Emits visible nodes and parent-child edges in pre-order.
pub fn visible_graph<T: TreeItem>(forest: &[T], collapsed: &CollapseState) -> GraphData {
    let mut graph = GraphData::default();
    walk(forest, None, 0, collapsed, &mut graph);
    graph
}

fn walk<T: TreeItem>(
    nodes: &[T],
    parent: Option<&NodeId>,
    level: usize,
    collapsed: &CollapseState,
    out: &mut GraphData,
) {
    for node in nodes {
        let is_collapsed = collapsed.is_collapsed(node.id());
        out.nodes.push(GraphNode {
            id: node.id().clone(),
            label: node.record().name.clone(),
            level,
            is_parent: node.has_children(),
            collapsed: is_collapsed,
        });
        if let Some(parent) = parent {
            out.edges.push(GraphEdge {
                id: format!("{parent}-{}", node.id()),
                source: parent.clone(),
                target: node.id().clone(),
            });
        }
        if node.has_children() && !is_collapsed {
            walk(node.children(), Some(node.id()), level + 1, collapsed, out);
        }
    }
}
