//! Core tree transformations for goaltree.
//! This crate is the single source of truth for goal tree invariants.

pub mod graph;
pub mod grid;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod service;
pub mod state;
pub mod tree;

pub use graph::layout::{layout, GraphLayout, LayoutConfig, LayoutEdge, LayoutNode};
pub use graph::visible::{visible_graph, GraphData, GraphEdge, GraphNode};
pub use grid::filter::{FilterError, TextFilter};
pub use grid::stats::{field_fill_stats, FillStats};
pub use grid::{GridMode, GridView};
pub use ingest::{
    ensure_ids, load_forest_file, load_forest_json, sample_forest, validate_forest,
    ForestValidationError, IngestError, IngestResult,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::goal::{Forest, GoalField, GoalFieldParseError, GoalNode, GoalRecord, NodeId};
pub use service::goal_session::{GoalTreeSession, SessionError};
pub use state::collapse::CollapseState;
pub use state::progress::{recompute_ancestors, set_done, set_done_recursive, ProgressError};
pub use tree::flatten::{flatten, flatten_within, FlatRow};
pub use tree::slice::{slice, slice_by_depth, SlicedNode};
pub use tree::window::{DepthWindow, DepthWindowError};
pub use tree::{count_nodes, find_node, max_depth, path_to, TreeItem};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
