//! Column text filter for the goal grid.
//!
//! # Invariants
//! - Matching is a case-insensitive substring test on one column.
//! - Tree mode keeps a row when it or any descendant matches.
//! - Flat mode keeps a row only when it matches itself.

use crate::model::goal::GoalField;
use crate::tree::flatten::FlatRow;
use crate::tree::slice::SlicedNode;
use regex::{Regex, RegexBuilder};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound on the compiled matcher, far above any realistic query.
const FILTER_SIZE_LIMIT: usize = 1 << 20;

#[derive(Debug)]
pub enum FilterError {
    /// Query could not be compiled into a matcher.
    InvalidQuery { query: String, source: regex::Error },
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuery { query, source } => {
                write!(f, "invalid filter query `{query}`: {source}")
            }
        }
    }
}

impl Error for FilterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidQuery { source, .. } => Some(source),
        }
    }
}

/// Case-insensitive substring filter on one column.
#[derive(Debug, Clone)]
pub struct TextFilter {
    field: GoalField,
    query: String,
    matcher: Regex,
}

impl TextFilter {
    /// Builds a filter. Returns `Ok(None)` for a blank query (match everything).
    pub fn new(field: GoalField, query: &str) -> Result<Option<Self>, FilterError> {
        if query.trim().is_empty() {
            return Ok(None);
        }
        let matcher = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .size_limit(FILTER_SIZE_LIMIT)
            .build()
            .map_err(|source| FilterError::InvalidQuery {
                query: query.to_string(),
                source,
            })?;
        Ok(Some(Self {
            field,
            query: query.to_string(),
            matcher,
        }))
    }

    pub fn field(&self) -> GoalField {
        self.field
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self, value: &str) -> bool {
        self.matcher.is_match(value)
    }

    /// Tree-mode filter: deep match, pruning non-matching branches.
    pub fn apply_tree(&self, forest: &[SlicedNode]) -> Vec<SlicedNode> {
        forest.iter().filter_map(|node| self.retain(node)).collect()
    }

    /// Flat-mode filter: each row stands on its own.
    pub fn apply_rows(&self, rows: &[FlatRow]) -> Vec<FlatRow> {
        rows.iter()
            .filter(|row| self.matches(row.record.field(self.field)))
            .cloned()
            .collect()
    }

    fn retain(&self, node: &SlicedNode) -> Option<SlicedNode> {
        let children: Vec<SlicedNode> = node
            .children
            .iter()
            .filter_map(|child| self.retain(child))
            .collect();
        if children.is_empty() && !self.matches(node.record.field(self.field)) {
            return None;
        }
        Some(SlicedNode {
            record: node.record.clone(),
            depth: node.depth,
            abs_depth: node.abs_depth,
            children,
        })
    }
}
