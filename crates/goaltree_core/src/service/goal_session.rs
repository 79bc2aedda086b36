//! Goal tree session: the command set invoked by rendering collaborators.
//!
//! # Responsibility
//! - Own the canonical forest, collapse state, depth window and grid options.
//! - Apply user commands atomically and regenerate views from scratch.
//!
//! # Invariants
//! - Views are never cached or patched; every call recomputes them.
//! - Commands addressed by id fail with `NodeNotFound` for unknown ids and
//!   leave state untouched.
//! - The graph is laid out over the depth-sliced forest, so layout depth starts
//!   at 0 for the window's top level.

use crate::graph::layout::{layout, GraphLayout, LayoutConfig};
use crate::graph::visible::{visible_graph, GraphData};
use crate::grid::filter::{FilterError, TextFilter};
use crate::grid::stats::{field_fill_stats, FillStats};
use crate::grid::{GridMode, GridView};
use crate::model::goal::{Forest, GoalField, NodeId};
use crate::state::collapse::CollapseState;
use crate::state::progress::{self, ProgressError};
use crate::tree::flatten::flatten;
use crate::tree::slice::{slice_by_depth, SlicedNode};
use crate::tree::window::DepthWindow;
use crate::tree::{find_node, find_node_mut};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from session commands.
#[derive(Debug)]
pub enum SessionError {
    /// Command addressed a node that is not in the forest.
    NodeNotFound(NodeId),
    /// Filter query could not be compiled.
    Filter(FilterError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "goal node not found: {id}"),
            Self::Filter(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Filter(err) => Some(err),
            Self::NodeNotFound(_) => None,
        }
    }
}

impl From<ProgressError> for SessionError {
    fn from(value: ProgressError) -> Self {
        match value {
            ProgressError::NodeNotFound(id) => Self::NodeNotFound(id),
        }
    }
}

impl From<FilterError> for SessionError {
    fn from(value: FilterError) -> Self {
        Self::Filter(value)
    }
}

/// Stateful facade over the pure tree transformations.
#[derive(Debug, Clone)]
pub struct GoalTreeSession {
    forest: Forest,
    collapsed: CollapseState,
    window: DepthWindow,
    grid_mode: GridMode,
    filter: Option<TextFilter>,
    layout_config: LayoutConfig,
}

impl GoalTreeSession {
    /// Creates a session over an ingested forest with default view options.
    pub fn new(forest: Forest) -> Self {
        Self::with_layout_config(forest, LayoutConfig::default())
    }

    pub fn with_layout_config(forest: Forest, layout_config: LayoutConfig) -> Self {
        info!(
            "event=session_open module=session status=ok roots={}",
            forest.len()
        );
        Self {
            forest,
            collapsed: CollapseState::new(),
            window: DepthWindow::default(),
            grid_mode: GridMode::default(),
            filter: None,
            layout_config,
        }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn collapsed(&self) -> &CollapseState {
        &self.collapsed
    }

    pub fn window(&self) -> DepthWindow {
        self.window
    }

    pub fn grid_mode(&self) -> GridMode {
        self.grid_mode
    }

    pub fn filter(&self) -> Option<&TextFilter> {
        self.filter.as_ref()
    }

    /// Flips the collapsed flag of one node. Returns the new flag.
    pub fn toggle(&mut self, id: &NodeId) -> Result<bool, SessionError> {
        self.ensure_exists(id)?;
        let collapsed = self.collapsed.toggle(id);
        debug!("event=toggle_node module=session status=ok node_id={id} collapsed={collapsed}");
        Ok(collapsed)
    }

    /// Collapses one node; repeating the call keeps it collapsed.
    pub fn collapse(&mut self, id: &NodeId) -> Result<(), SessionError> {
        self.ensure_exists(id)?;
        self.collapsed.collapse(id);
        debug!("event=collapse_node module=session status=ok node_id={id}");
        Ok(())
    }

    pub fn expand_all(&mut self) {
        self.collapsed.expand_all();
        debug!("event=expand_all module=session status=ok");
    }

    pub fn collapse_all(&mut self) {
        self.collapsed.collapse_all(&self.forest);
        debug!(
            "event=collapse_all module=session status=ok collapsed={}",
            self.collapsed.len()
        );
    }

    /// Marks a subtree done/undone and recomputes its ancestors.
    pub fn set_done(&mut self, id: &NodeId, done: bool) -> Result<(), SessionError> {
        progress::set_done(&mut self.forest, id, done)?;
        Ok(())
    }

    /// Sets the depth window from UI input, raising `max` to `min` when inverted.
    pub fn set_depth_window(&mut self, min: usize, max: usize) -> DepthWindow {
        self.window = DepthWindow::clamped(min, max);
        debug!(
            "event=set_depth_window module=session status=ok min={} max={}",
            self.window.min(),
            self.window.max()
        );
        self.window
    }

    /// Replaces one scalar attribute on the canonical node.
    pub fn edit_field(
        &mut self,
        id: &NodeId,
        field: GoalField,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        let node = find_node_mut(&mut self.forest, id)
            .ok_or_else(|| SessionError::NodeNotFound(id.clone()))?;
        node.record.set_field(field, value);
        debug!("event=edit_field module=session status=ok node_id={id} field={field}");
        Ok(())
    }

    pub fn set_grid_mode(&mut self, mode: GridMode) {
        self.grid_mode = mode;
    }

    /// Installs a column filter; a blank query clears it.
    pub fn set_filter(&mut self, field: GoalField, query: &str) -> Result<(), SessionError> {
        self.filter = TextFilter::new(field, query)?;
        debug!(
            "event=set_filter module=session status=ok field={field} active={}",
            self.filter.is_some()
        );
        Ok(())
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    /// Depth-sliced canonical forest.
    pub fn sliced(&self) -> Vec<SlicedNode> {
        slice_by_depth(&self.forest, self.window)
    }

    /// Grid rows for the current mode, window and filter.
    pub fn grid_view(&self) -> GridView {
        let sliced = self.sliced();
        match (self.grid_mode, &self.filter) {
            (GridMode::Tree, None) => GridView::Tree(sliced),
            (GridMode::Tree, Some(filter)) => GridView::Tree(filter.apply_tree(&sliced)),
            (GridMode::Flat, None) => GridView::Flat(flatten(&sliced)),
            (GridMode::Flat, Some(filter)) => GridView::Flat(filter.apply_rows(&flatten(&sliced))),
        }
    }

    /// Positioned nodes and edges for the graph view.
    pub fn graph_layout(&self) -> GraphLayout {
        layout(&self.sliced(), &self.collapsed, &self.layout_config)
    }

    /// Coordinate-free nodes and edges for auto-layout renderers.
    pub fn visible_graph(&self) -> GraphData {
        visible_graph(&self.sliced(), &self.collapsed)
    }

    /// Fill statistics of one column over the whole canonical forest.
    pub fn fill_stats(&self, field: GoalField) -> FillStats {
        field_fill_stats(&self.forest, field)
    }

    fn ensure_exists(&self, id: &NodeId) -> Result<(), SessionError> {
        find_node(&self.forest, id)
            .map(|_| ())
            .ok_or_else(|| SessionError::NodeNotFound(id.clone()))
    }
}
