//! Goal node domain model.
//!
//! # Responsibility
//! - Define the canonical record for one SMART goal and its ordered children.
//! - Keep the wire shape stable for fixtures and UI payloads.
//!
//! # Invariants
//! - `id` is unique within one forest (checked by `ingest::validate_forest`).
//! - Depth is never stored here; traversals compute it.
//! - Absent `children` and an empty list are the same "leaf" state.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable node identifier.
///
/// Fixtures may carry ids as JSON strings or integers; both normalize to the
/// string form, which is also what every derived view emits.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(String);

impl NodeId {
    /// Creates an id from any string-like value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the string form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether the id is missing (blank).
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireNodeId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // `null` reads as a blank id, filled later by `ingest::ensure_ids`.
        Ok(match Option::<WireNodeId>::deserialize(deserializer)? {
            None => Self::default(),
            Some(WireNodeId::Text(value)) => Self(value),
            Some(WireNodeId::Signed(value)) => Self(value.to_string()),
            Some(WireNodeId::Unsigned(value)) => Self(value.to_string()),
        })
    }
}

/// Ordered sequence of root goals.
pub type Forest = Vec<GoalNode>;

/// Scalar attributes of one goal, without children.
///
/// This is the row shape shared by the canonical tree, sliced trees and
/// flattened grid rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    /// Missing ids are filled by `ingest::ensure_ids`.
    #[serde(default)]
    pub id: NodeId,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub specific: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub measurable: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub achievable: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub realistic: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub timebound: String,
    /// Leaf completion flag; derived for parents by the progress aggregator.
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub done: bool,
    /// Percentage in `0..=100` (checked by `ingest::validate_forest`).
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub progress: u8,
    /// Unknown attributes, carried through every transformation untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl GoalRecord {
    /// Creates a record with id and label; other attributes start blank.
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the value of one editable column.
    pub fn field(&self, field: GoalField) -> &str {
        match field {
            GoalField::Name => &self.name,
            GoalField::Description => &self.description,
            GoalField::Specific => &self.specific,
            GoalField::Measurable => &self.measurable,
            GoalField::Achievable => &self.achievable,
            GoalField::Realistic => &self.realistic,
            GoalField::Timebound => &self.timebound,
        }
    }

    /// Replaces the value of one editable column.
    pub fn set_field(&mut self, field: GoalField, value: impl Into<String>) {
        let slot = match field {
            GoalField::Name => &mut self.name,
            GoalField::Description => &mut self.description,
            GoalField::Specific => &mut self.specific,
            GoalField::Measurable => &mut self.measurable,
            GoalField::Achievable => &mut self.achievable,
            GoalField::Realistic => &mut self.realistic,
            GoalField::Timebound => &mut self.timebound,
        };
        *slot = value.into();
    }
}

// Text columns accept `null` (blank) and scalars in their display form.
fn deserialize_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(Value::Bool(flag)) => Ok(flag.to_string()),
        Some(Value::Array(_) | Value::Object(_)) => Err(serde::de::Error::invalid_type(
            serde::de::Unexpected::Other("array or object"),
            &"a string, number, boolean or null",
        )),
    }
}

// `null` reads like absence (`"children": null` shows up in exported fixtures).
fn deserialize_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Canonical tree node: one goal plus its exclusively owned children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalNode {
    #[serde(flatten)]
    pub record: GoalRecord,
    #[serde(
        default,
        deserialize_with = "deserialize_or_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<GoalNode>,
}

impl GoalNode {
    /// Creates a leaf goal.
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            record: GoalRecord::new(id, name),
            children: Vec::new(),
        }
    }

    /// Builder-style helper that appends children in order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = GoalNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.record.id
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Editable scalar columns of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalField {
    Name,
    Description,
    Specific,
    Measurable,
    Achievable,
    Realistic,
    Timebound,
}

impl GoalField {
    /// Every editable column in grid order.
    pub const ALL: [GoalField; 7] = [
        GoalField::Name,
        GoalField::Description,
        GoalField::Specific,
        GoalField::Measurable,
        GoalField::Achievable,
        GoalField::Realistic,
        GoalField::Timebound,
    ];

    /// Wire name, identical to the serialized attribute key.
    pub fn as_str(self) -> &'static str {
        match self {
            GoalField::Name => "name",
            GoalField::Description => "description",
            GoalField::Specific => "specific",
            GoalField::Measurable => "measurable",
            GoalField::Achievable => "achievable",
            GoalField::Realistic => "realistic",
            GoalField::Timebound => "timebound",
        }
    }
}

impl Display for GoalField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown column name passed to `GoalField::from_str`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalFieldParseError(pub String);

impl Display for GoalFieldParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown goal field `{}`; expected ", self.0)?;
        f.write_str("name|description|specific|measurable|achievable|realistic|timebound")
    }
}

impl Error for GoalFieldParseError {}

impl FromStr for GoalField {
    type Err = GoalFieldParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        GoalField::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
            .ok_or(GoalFieldParseError(normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::{GoalField, GoalNode, NodeId};

    #[test]
    fn node_id_accepts_integer_and_string_forms() {
        let numeric: NodeId = serde_json::from_str("42").unwrap();
        let text: NodeId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(numeric, text);
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "\"42\"");

        let null: NodeId = serde_json::from_str("null").unwrap();
        assert!(null.is_blank());
    }

    #[test]
    fn text_columns_accept_null_and_scalars() {
        let node: GoalNode = serde_json::from_str(
            r#"{"id":"1","name":"a","description":null,
                "measurable":10,"achievable":true,"done":null}"#,
        )
        .unwrap();
        assert_eq!(node.record.description, "");
        assert_eq!(node.record.measurable, "10");
        assert_eq!(node.record.achievable, "true");
        assert!(!node.record.done);

        let nested = serde_json::from_str::<GoalNode>(r#"{"id":"1","name":["a"]}"#);
        assert!(nested.is_err());
    }

    #[test]
    fn goal_field_parses_case_insensitively() {
        assert_eq!(" TimeBound ".parse::<GoalField>().unwrap(), GoalField::Timebound);
        let err = "deadline".parse::<GoalField>().unwrap_err();
        assert!(err.to_string().contains("deadline"));
    }

    #[test]
    fn null_and_missing_children_both_mean_leaf() {
        let null_children: GoalNode =
            serde_json::from_str(r#"{"id":"1","name":"a","children":null}"#).unwrap();
        let missing: GoalNode = serde_json::from_str(r#"{"id":"1","name":"a"}"#).unwrap();
        assert!(null_children.is_leaf());
        assert_eq!(null_children, missing);
    }
}
