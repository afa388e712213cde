//! A single row of the table and its result columns

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Status written to rows whose Group failed
pub const STATUS_ERROR: &str = "Error";

/// The result columns of a row: document number, status and warning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowResult {
    #[serde(default, deserialize_with = "deserialize_cell")]
    pub document: Option<String>,
    #[serde(default, deserialize_with = "deserialize_cell")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_cell")]
    pub warning: Option<String>,
}

impl RowResult {
    /// Whether a document number has already been recorded
    pub fn has_document(&self) -> bool {
        self.document
            .as_deref()
            .is_some_and(|document| !document.trim().is_empty())
    }
}

/// One spreadsheet row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    index: usize,
    #[serde(default, deserialize_with = "deserialize_cells")]
    fields: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "deserialize_marker")]
    group_marker: String,
    #[serde(flatten)]
    result: RowResult,
}

impl Row {
    /// Create a row with the given stable index and input cells
    pub fn new(index: usize, fields: BTreeMap<String, String>) -> Self {
        Self {
            index,
            fields,
            group_marker: String::new(),
            result: RowResult::default(),
        }
    }

    /// Builder: set the group marker
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.group_marker = marker.into();
        self
    }

    /// Builder: set a single input cell
    pub fn with_field(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    /// Builder: record a document number from an earlier run
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.result.document = Some(document.into());
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Trimmed cell value, `None` when absent or blank
    pub fn field(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Trimmed group marker; empty means "continue the open Group"
    pub fn group_marker(&self) -> &str {
        self.group_marker.trim()
    }

    pub fn result(&self) -> &RowResult {
        &self.result
    }

    /// Whether this row carries a document number from an earlier run
    pub fn is_submitted(&self) -> bool {
        self.result.has_document()
    }

    pub(crate) fn result_mut(&mut self) -> &mut RowResult {
        &mut self.result
    }
}

/// Cells arrive as JSON scalars; numbers and booleans are kept in their text form
fn cell_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn deserialize_cells<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|(column, value)| cell_text(value).map(|text| (column, text)))
        .collect())
}

fn deserialize_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(cell_text))
}

fn deserialize_marker<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_cell(deserializer)?.unwrap_or_default())
}
