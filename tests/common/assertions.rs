//! Custom test assertions

use journal_batch::{GroupReport, RowTable, STATUS_ERROR};

/// Assertions for RowTable
pub trait RowTableAssertions {
    /// Assert every row of the Group shows the same document, status and warning
    fn assert_group_uniform(&self, group: &GroupReport);

    /// Assert every row of the Group is marked failed with a warning containing `needle`
    fn assert_group_failed(&self, group: &GroupReport, needle: &str);
}

impl RowTableAssertions for RowTable {
    fn assert_group_uniform(&self, group: &GroupReport) {
        let first = self.rows()[group.rows[0]].result();
        for &index in &group.rows[1..] {
            assert_eq!(
                self.rows()[index].result(),
                first,
                "row {} differs from the rest of Group {}",
                index,
                group.key
            );
        }
    }

    fn assert_group_failed(&self, group: &GroupReport, needle: &str) {
        for &index in &group.rows {
            let result = self.rows()[index].result();
            assert_eq!(
                result.status.as_deref(),
                Some(STATUS_ERROR),
                "row {} of Group {} is not marked as failed",
                index,
                group.key
            );
            let warning = result.warning.as_deref().unwrap_or_default();
            assert!(
                warning.contains(needle),
                "row {} warning {:?} does not mention {:?}",
                index,
                warning,
                needle
            );
        }
    }
}
