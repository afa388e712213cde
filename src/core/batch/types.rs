//! Batch report types

use crate::core::client::ApiError;
use crate::core::entry::ValidationError;
use serde::{Deserialize, Serialize};

/// Broad class of a Group failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Rejected locally by the entry builder
    Validation,
    /// Transient API errors that outlasted every retry
    RetriesExhausted,
    /// Credentials refused
    Unauthorized,
    /// The server refused the entry
    Rejected,
    /// The server answered with something unusable
    InvalidResponse,
}

impl From<&ValidationError> for FailureKind {
    fn from(_: &ValidationError) -> Self {
        FailureKind::Validation
    }
}

impl From<&ApiError> for FailureKind {
    fn from(error: &ApiError) -> Self {
        match error {
            ApiError::Timeout(_)
            | ApiError::RateLimited { .. }
            | ApiError::Server { .. }
            | ApiError::Network(_) => FailureKind::RetriesExhausted,
            ApiError::Unauthorized(_) | ApiError::Signing(_) => FailureKind::Unauthorized,
            ApiError::Rejected(_) | ApiError::NotFound(_) => FailureKind::Rejected,
            ApiError::InvalidResponse(_) => FailureKind::InvalidResponse,
        }
    }
}

/// What happened to one Group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GroupOutcome {
    Submitted { document: String, status: String },
    Failed { kind: FailureKind, message: String },
    AlreadySubmitted,
    /// Not attempted because the run was cancelled
    Cancelled,
}

/// Per-Group detail of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReport {
    pub key: String,
    /// Position of the Group among all Groups of the table
    pub position: usize,
    /// Stable indices of the member rows
    pub rows: Vec<usize>,
    pub outcome: GroupOutcome,
}

/// Aggregate result of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub total_groups: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub cancelled: usize,
    pub groups: Vec<GroupReport>,
}

impl BatchReport {
    /// Build the report, ordering Groups by table position
    pub fn from_groups(mut groups: Vec<GroupReport>) -> Self {
        groups.sort_by_key(|group| group.position);

        let mut report = Self {
            total_groups: groups.len(),
            ..Default::default()
        };
        for group in &groups {
            match group.outcome {
                GroupOutcome::Submitted { .. } => report.succeeded += 1,
                GroupOutcome::Failed { .. } => report.failed += 1,
                GroupOutcome::AlreadySubmitted => report.skipped += 1,
                GroupOutcome::Cancelled => report.cancelled += 1,
            }
        }
        report.groups = groups;
        report
    }

    /// No failures and nothing left undone
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.cancelled == 0
    }

    /// Reports of failed Groups
    pub fn failures(&self) -> impl Iterator<Item = &GroupReport> {
        self.groups
            .iter()
            .filter(|group| matches!(group.outcome, GroupOutcome::Failed { .. }))
    }
}
