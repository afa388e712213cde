//! Partitioning of rows into Groups
//!
//! A non-empty group marker opens a new Group; rows with an empty marker join
//! whichever Group is open. Rows that appear before any marker form an
//! implicit Group keyed on the first row's index. Groups are contiguous runs,
//! so a marker that reappears later in the table opens a separate Group with
//! the same key text.

use crate::core::table::Row;
use std::fmt;
use std::ops::Range;

/// The key a Group is known by in reports
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Text of the marker that opened the Group
    Marker(String),
    /// No marker seen yet; keyed on the first row's index
    Implicit(usize),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Marker(marker) => write!(f, "{}", marker),
            GroupKey::Implicit(index) => write!(f, "row-{}", index),
        }
    }
}

/// A contiguous run of rows that becomes one journal entry
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    key: GroupKey,
    ordinal: usize,
    start: usize,
    rows: &'a [Row],
}

impl<'a> Group<'a> {
    fn new(key: GroupKey, ordinal: usize, start: usize, rows: &'a [Row]) -> Self {
        Self {
            key,
            ordinal,
            start,
            rows,
        }
    }

    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    /// Position of this Group among all Groups of the table
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn rows(&self) -> &'a [Row] {
        self.rows
    }

    /// Table positions covered by this Group
    pub fn positions(&self) -> Range<usize> {
        self.start..self.start + self.rows.len()
    }

    /// Stable indices of the member rows
    pub fn row_indices(&self) -> Vec<usize> {
        self.rows.iter().map(Row::index).collect()
    }

    pub fn first(&self) -> &'a Row {
        // Groups are never empty
        &self.rows[0]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Partition `rows` into Groups, preserving table order
pub fn group_rows(rows: &[Row]) -> Vec<Group<'_>> {
    let mut groups = Vec::new();
    let mut open: Option<(GroupKey, usize)> = None;

    for (position, row) in rows.iter().enumerate() {
        let marker = row.group_marker();
        if !marker.is_empty() {
            if let Some((key, start)) = open.take() {
                let ordinal = groups.len();
                groups.push(Group::new(key, ordinal, start, &rows[start..position]));
            }
            open = Some((GroupKey::Marker(marker.to_string()), position));
        } else if open.is_none() {
            open = Some((GroupKey::Implicit(row.index()), position));
        }
    }

    if let Some((key, start)) = open {
        let ordinal = groups.len();
        groups.push(Group::new(key, ordinal, start, &rows[start..]));
    }

    groups
}
