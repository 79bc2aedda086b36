//! Layout engine for manually positioned node-link graphs.
//!
//! # Responsibility
//! - Estimate node widths from labels and affordances.
//! - Aggregate subtree widths bottom-up and place nodes top-down.
//!
//! # Invariants
//! - A collapsed node or a leaf occupies exactly its own width.
//! - Sibling subtrees are packed left to right with at least `min_horizontal_gap`
//!   between their bounding regions.
//! - `y = depth * level_step`, with depth counted from 0 in the laid-out forest.

use crate::model::goal::NodeId;
use crate::state::collapse::CollapseState;
use crate::tree::TreeItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Layout constants, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Approximate width of one label character.
    pub char_width: f64,
    /// Horizontal padding on each side of the label.
    pub node_padding: f64,
    /// Expand/collapse affordance, only on nodes with children.
    pub toggle_width: f64,
    /// Info affordance, on every node.
    pub info_width: f64,
    pub min_node_width: f64,
    pub node_height: f64,
    pub level_step: f64,
    pub min_horizontal_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            node_padding: 16.0,
            toggle_width: 20.0,
            info_width: 24.0,
            min_node_width: 140.0,
            node_height: 50.0,
            level_step: 120.0,
            min_horizontal_gap: 70.0,
        }
    }
}

impl LayoutConfig {
    /// Width estimate for one node, floored at `min_node_width`.
    pub fn node_width(&self, label: &str, has_children: bool) -> f64 {
        let mut width = label.chars().count() as f64 * self.char_width + self.node_padding * 2.0;
        if has_children {
            width += self.toggle_width;
        }
        width += self.info_width;
        width.max(self.min_node_width)
    }
}

/// Positioned node. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub id: NodeId,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    /// Horizontal extent reserved for this node and its visible descendants.
    pub subtree_width: f64,
    pub depth: usize,
    pub has_children: bool,
    pub collapsed: bool,
}

impl LayoutNode {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Left edge of the region reserved for this subtree.
    pub fn subtree_left(&self) -> f64 {
        self.center_x() - self.subtree_width / 2.0
    }

    pub fn subtree_right(&self) -> f64 {
        self.center_x() + self.subtree_width / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutEdge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphLayout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

impl GraphLayout {
    pub fn node(&self, id: &NodeId) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }
}

/// Lays out `forest`, skipping the subtrees of collapsed nodes.
pub fn layout<T: TreeItem>(
    forest: &[T],
    collapsed: &CollapseState,
    config: &LayoutConfig,
) -> GraphLayout {
    let mut engine = Engine {
        config,
        collapsed,
        widths: HashMap::new(),
        out: GraphLayout::default(),
    };

    let mut offset = 0.0;
    for root in forest {
        let subtree_width = engine.subtree_width(root);
        engine.place(root, None, 0, offset);
        offset += subtree_width + config.min_horizontal_gap;
    }
    engine.out
}

struct Engine<'a> {
    config: &'a LayoutConfig,
    collapsed: &'a CollapseState,
    // Subtree widths memoized per call, keyed by node id.
    widths: HashMap<&'a NodeId, f64>,
    out: GraphLayout,
}

impl<'a> Engine<'a> {
    fn expands<T: TreeItem>(&self, node: &T) -> bool {
        node.has_children() && !self.collapsed.is_collapsed(node.id())
    }

    fn own_width<T: TreeItem>(&self, node: &T) -> f64 {
        self.config.node_width(&node.record().name, node.has_children())
    }

    fn subtree_width<T: TreeItem>(&mut self, node: &'a T) -> f64 {
        if let Some(width) = self.widths.get(node.id()) {
            return *width;
        }

        let own = self.own_width(node);
        let width = if self.expands(node) {
            let children = node.children();
            let mut total = 0.0;
            for child in children {
                total += self.subtree_width(child);
            }
            total += self.config.min_horizontal_gap * (children.len() - 1) as f64;
            own.max(total)
        } else {
            own
        };

        self.widths.insert(node.id(), width);
        width
    }

    fn place<T: TreeItem>(
        &mut self,
        node: &'a T,
        parent: Option<&NodeId>,
        depth: usize,
        offset: f64,
    ) {
        let own = self.own_width(node);
        let subtree_width = self.subtree_width(node);
        let collapsed = self.collapsed.is_collapsed(node.id());

        self.out.nodes.push(LayoutNode {
            id: node.id().clone(),
            label: node.record().name.clone(),
            x: offset + subtree_width / 2.0 - own / 2.0,
            y: depth as f64 * self.config.level_step,
            width: own,
            subtree_width,
            depth,
            has_children: node.has_children(),
            collapsed,
        });

        if let Some(parent) = parent {
            self.out.edges.push(LayoutEdge {
                id: format!("e{parent}-{}", node.id()),
                source: parent.clone(),
                target: node.id().clone(),
            });
        }

        if self.expands(node) {
            let mut child_offset = offset;
            for child in node.children() {
                let child_width = self.subtree_width(child);
                self.place(child, Some(node.id()), depth + 1, child_offset);
                child_offset += child_width + self.config.min_horizontal_gap;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LayoutConfig;

    #[test]
    fn node_width_respects_floor_and_affordances() {
        let config = LayoutConfig::default();
        assert_eq!(config.node_width("ab", false), 140.0);
        // 20 chars * 8 + 32 padding + 24 info = 216; toggle adds 20.
        let label = "abcdefghijklmnopqrst";
        assert_eq!(config.node_width(label, false), 216.0);
        assert_eq!(config.node_width(label, true), 236.0);
    }

    #[test]
    fn node_width_counts_characters_not_bytes() {
        let config = LayoutConfig::default();
        let cyrillic = "Основная цель номер один";
        let latin = "x".repeat(cyrillic.chars().count());
        assert_eq!(config.node_width(cyrillic, true), config.node_width(&latin, true));
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: LayoutConfig = serde_json::from_str(r#"{"level_step": 80.0}"#).unwrap();
        assert_eq!(config.level_step, 80.0);
        assert_eq!(config.min_horizontal_gap, 70.0);
    }
}
