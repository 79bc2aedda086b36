//! Forest ingestion from JSON fixtures.
//!
//! # Responsibility
//! - Parse goal forests from JSON text or files.
//! - Fill missing ids and reject duplicates before any transformation runs.
//!
//! # Invariants
//! - A forest returned from this module has only non-blank, unique ids.
//! - Progress stays in `0..=100` and pass-through attributes never shadow the
//!   depth keys that derived views emit.
//! - Generated ids are path-derived: `"<index>"` for roots,
//!   `"<parentId>-<index>"` for children.

use crate::model::goal::{Forest, GoalNode, NodeId};
use crate::state::progress::PROGRESS_DONE;
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const SAMPLE_FOREST_JSON: &str = include_str!("../fixtures/sample_goals.json");

/// Keys written by sliced and flattened rows next to the record fields.
const RESERVED_ATTRIBUTES: [&str; 2] = ["depth", "abs_depth"];

/// Result type for ingestion APIs.
pub type IngestResult<T> = Result<T, IngestError>;

/// Structural problems found in an otherwise parseable forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForestValidationError {
    /// Two nodes share one id; reports the second occurrence in pre-order.
    DuplicateId(NodeId),
    /// A node id is blank after id assignment.
    BlankId,
    /// A node carries an attribute that views compute themselves.
    ReservedAttribute { id: NodeId, key: String },
    ProgressOutOfRange { id: NodeId, progress: u8 },
}

impl Display for ForestValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate goal id: {id}"),
            Self::BlankId => write!(f, "goal id must not be blank"),
            Self::ReservedAttribute { id, key } => {
                write!(f, "goal {id} carries reserved attribute `{key}`")
            }
            Self::ProgressOutOfRange { id, progress } => {
                write!(f, "goal {id} has progress {progress}, expected 0..=100")
            }
        }
    }
}

impl Error for ForestValidationError {}

#[derive(Debug)]
pub enum IngestError {
    /// Fixture file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// Text is not a JSON array of goal nodes.
    Json(serde_json::Error),
    Invalid(ForestValidationError),
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read goal fixture `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid goal fixture: {err}"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ForestValidationError> for IngestError {
    fn from(value: ForestValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Parses, assigns missing ids and validates a forest.
pub fn load_forest_json(text: &str) -> IngestResult<Forest> {
    let mut forest: Forest = serde_json::from_str(text)?;
    ensure_ids(&mut forest);
    if let Err(err) = validate_forest(&forest) {
        warn!("event=forest_load module=ingest status=error reason={err}");
        return Err(err.into());
    }
    info!(
        "event=forest_load module=ingest status=ok roots={} nodes={}",
        forest.len(),
        crate::tree::count_nodes(&forest)
    );
    Ok(forest)
}

/// Reads and loads a forest from a JSON file.
pub fn load_forest_file(path: impl AsRef<Path>) -> IngestResult<Forest> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_forest_json(&text)
}

/// The embedded SMART-goal sample: three roots, deepest level 2.
pub fn sample_forest() -> IngestResult<Forest> {
    load_forest_json(SAMPLE_FOREST_JSON)
}

/// Assigns path-derived ids to nodes whose id is blank.
pub fn ensure_ids(forest: &mut [GoalNode]) {
    assign_ids(forest, None);
}

fn assign_ids(nodes: &mut [GoalNode], parent: Option<&NodeId>) {
    for (index, node) in nodes.iter_mut().enumerate() {
        if node.record.id.is_blank() {
            node.record.id = match parent {
                Some(parent) => NodeId::new(format!("{parent}-{index}")),
                None => NodeId::new(index.to_string()),
            };
        }
        let GoalNode { record, children } = node;
        assign_ids(children, Some(&record.id));
    }
}

/// Checks ids (non-blank, unique), progress range and reserved attribute keys.
pub fn validate_forest(forest: &[GoalNode]) -> Result<(), ForestValidationError> {
    let mut seen = HashSet::new();
    check_nodes(forest, &mut seen)
}

fn check_nodes<'a>(
    nodes: &'a [GoalNode],
    seen: &mut HashSet<&'a NodeId>,
) -> Result<(), ForestValidationError> {
    for node in nodes {
        if node.record.id.is_blank() {
            return Err(ForestValidationError::BlankId);
        }
        if !seen.insert(&node.record.id) {
            return Err(ForestValidationError::DuplicateId(node.record.id.clone()));
        }
        if node.record.progress > PROGRESS_DONE {
            return Err(ForestValidationError::ProgressOutOfRange {
                id: node.record.id.clone(),
                progress: node.record.progress,
            });
        }
        if let Some(key) = RESERVED_ATTRIBUTES
            .into_iter()
            .find(|key| node.record.extra.contains_key(*key))
        {
            return Err(ForestValidationError::ReservedAttribute {
                id: node.record.id.clone(),
                key: key.to_string(),
            });
        }
        check_nodes(&node.children, seen)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_ids, sample_forest, validate_forest, ForestValidationError};
    use crate::model::goal::{GoalNode, NodeId};
    use crate::tree::{count_nodes, max_depth};

    #[test]
    fn sample_forest_loads() {
        let forest = sample_forest().unwrap();
        assert_eq!(forest.len(), 3);
        assert_eq!(count_nodes(&forest), 8);
        assert_eq!(max_depth(&forest), Some(2));
    }

    #[test]
    fn ensure_ids_uses_parent_path() {
        let mut forest = vec![
            GoalNode::new("", "root")
                .with_children([GoalNode::new("", "a"), GoalNode::new("x", "b")]),
            GoalNode::new("", "second").with_children([GoalNode::new("", "c")]),
        ];
        ensure_ids(&mut forest);
        assert_eq!(forest[0].id().as_str(), "0");
        assert_eq!(forest[0].children[0].id().as_str(), "0-0");
        assert_eq!(forest[0].children[1].id().as_str(), "x");
        assert_eq!(forest[1].children[0].id().as_str(), "1-0");
    }

    #[test]
    fn validate_reports_duplicate_id() {
        let forest = vec![GoalNode::new("1", "a").with_children([GoalNode::new("1", "b")])];
        assert_eq!(
            validate_forest(&forest).unwrap_err(),
            ForestValidationError::DuplicateId(NodeId::from("1"))
        );
    }

    #[test]
    fn validate_rejects_progress_above_hundred() {
        let mut node = GoalNode::new("1", "a");
        node.record.progress = 150;
        assert_eq!(
            validate_forest(&[node]).unwrap_err(),
            ForestValidationError::ProgressOutOfRange {
                id: NodeId::from("1"),
                progress: 150
            }
        );
    }

    #[test]
    fn validate_rejects_depth_keys_in_extra_attributes() {
        let mut node = GoalNode::new("1", "a");
        node.record.extra.insert("abs_depth".into(), serde_json::json!(3));
        let child = GoalNode::new("2", "b");
        let forest = vec![GoalNode::new("0", "root").with_children([child, node])];
        assert_eq!(
            validate_forest(&forest).unwrap_err(),
            ForestValidationError::ReservedAttribute {
                id: NodeId::from("1"),
                key: "abs_depth".to_string()
            }
        );
    }
}
