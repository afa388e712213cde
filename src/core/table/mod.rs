//! The in-memory row table
//!
//! The table is the only shared mutable state of a run. Submissions and
//! status refreshes never touch it directly; their outcomes are handed back
//! to the task that owns `&mut RowTable`, which applies each Group's result
//! in one call so a Group's rows are never seen half-written.

mod row;

pub use row::{Row, RowResult, STATUS_ERROR};

use crate::utils::error::{JournalError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Ordered collection of rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowTable {
    rows: Vec<Row>,
}

impl RowTable {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Parse a table from its JSON form: an array of row objects
    pub fn from_json_str(content: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(content)?;
        Ok(table)
    }

    /// Serialize the table, result columns included
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn get(&self, position: usize) -> Option<&Row> {
        self.rows.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Record a successful submission on every row of a Group
    pub fn record_success(
        &mut self,
        positions: Range<usize>,
        document: &str,
        status: &str,
    ) -> Result<()> {
        for row in self.group_rows_mut(positions)? {
            let result = row.result_mut();
            result.document = Some(document.to_string());
            result.status = Some(status.to_string());
            result.warning = None;
        }
        Ok(())
    }

    /// Record a failure on every row of a Group, leaving document numbers alone
    pub fn record_failure(&mut self, positions: Range<usize>, reason: &str) -> Result<()> {
        for row in self.group_rows_mut(positions)? {
            let result = row.result_mut();
            result.status = Some(STATUS_ERROR.to_string());
            result.warning = Some(reason.to_string());
        }
        Ok(())
    }

    /// Overwrite status and warning of one row with the server's view
    pub fn record_status(
        &mut self,
        position: usize,
        status: &str,
        warning: Option<&str>,
    ) -> Result<()> {
        let row = self.rows.get_mut(position).ok_or_else(|| {
            JournalError::invalid_table(format!("row position {} is out of range", position))
        })?;
        let result = row.result_mut();
        result.status = Some(status.to_string());
        result.warning = warning.map(str::to_string);
        Ok(())
    }

    fn group_rows_mut(&mut self, positions: Range<usize>) -> Result<&mut [Row]> {
        let len = self.rows.len();
        self.rows.get_mut(positions.clone()).ok_or_else(|| {
            JournalError::invalid_table(format!(
                "rows {:?} are out of range for a table of {} rows",
                positions, len
            ))
        })
    }
}

impl FromIterator<Row> for RowTable {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
