//! Grid view helpers: tree/flat row modes, column filter, fill statistics.

use crate::tree::flatten::FlatRow;
use crate::tree::slice::SlicedNode;
use serde::{Deserialize, Serialize};

pub mod filter;
pub mod stats;

/// How the grid presents the sliced forest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridMode {
    /// Nested rows with expandable children.
    #[default]
    Tree,
    /// Depth-tagged rows in pre-order.
    Flat,
}

/// Rows handed to the grid renderer, regenerated on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "rows", rename_all = "snake_case")]
pub enum GridView {
    Tree(Vec<SlicedNode>),
    Flat(Vec<FlatRow>),
}

impl GridView {
    pub fn mode(&self) -> GridMode {
        match self {
            Self::Tree(_) => GridMode::Tree,
            Self::Flat(_) => GridMode::Flat,
        }
    }

    /// Number of top-level rows (tree mode) or all rows (flat mode).
    pub fn len(&self) -> usize {
        match self {
            Self::Tree(rows) => rows.len(),
            Self::Flat(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
