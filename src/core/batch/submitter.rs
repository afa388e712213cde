//! Batch Submitter: one pass over the table, every Group accounted for

use super::cancel::CancellationFlag;
use super::types::{BatchReport, FailureKind, GroupOutcome, GroupReport};
use crate::config::{BatchConfig, Config};
use crate::core::client::{ApiError, SubmissionClient, SubmissionReceipt};
use crate::core::entry::{BuildOutcome, EntryBuilder, JournalEntry};
use crate::core::grouping::{Group, group_rows};
use crate::core::table::RowTable;
use crate::utils::error::{JournalError, Result};
use futures::stream::{self, StreamExt};
use std::ops::Range;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Identity of a Group once its borrow of the table has ended
#[derive(Debug, Clone)]
struct PlannedGroup {
    key: String,
    position: usize,
    rows: Vec<usize>,
    positions: Range<usize>,
}

impl PlannedGroup {
    fn from_group(group: &Group<'_>) -> Self {
        Self {
            key: group.key().to_string(),
            position: group.ordinal(),
            rows: group.row_indices(),
            positions: group.positions(),
        }
    }

    fn into_report(self, outcome: GroupOutcome) -> GroupReport {
        GroupReport {
            key: self.key,
            position: self.position,
            rows: self.rows,
            outcome,
        }
    }
}

/// Groups, validates and submits a row table
pub struct BatchSubmitter<C> {
    client: C,
    builder: EntryBuilder,
    config: BatchConfig,
}

impl<C: SubmissionClient> BatchSubmitter<C> {
    pub fn new(client: C, builder: EntryBuilder, config: BatchConfig) -> Self {
        Self {
            client,
            builder,
            config,
        }
    }

    pub fn from_config(client: C, config: &Config) -> Self {
        Self::new(
            client,
            EntryBuilder::from_config(config),
            config.batch.clone(),
        )
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run a full pass over `table`
    pub async fn submit(&self, table: &mut RowTable) -> Result<BatchReport> {
        self.submit_with_cancel(table, &CancellationFlag::new())
            .await
    }

    /// Run a full pass, stopping new submissions once `cancel` is set
    ///
    /// Every Group ends up in the report. Failures are per Group; the only
    /// errors returned are those that stop the run before it starts.
    pub async fn submit_with_cancel(
        &self,
        table: &mut RowTable,
        cancel: &CancellationFlag,
    ) -> Result<BatchReport> {
        if table.len() > self.config.max_rows {
            return Err(JournalError::invalid_table(format!(
                "table has {} rows, the limit is {}",
                table.len(),
                self.config.max_rows
            )));
        }

        let started = Instant::now();
        let (ready, settled) = self.plan(table);
        let mut reports = Vec::with_capacity(ready.len() + settled.len());

        for (group, outcome) in settled {
            if let GroupOutcome::Failed { message, .. } = &outcome {
                table.record_failure(group.positions.clone(), message)?;
            }
            reports.push(group.into_report(outcome));
        }

        let concurrency = self.config.concurrency.max(1);
        info!(
            "Submitting {} groups ({} rows) with concurrency {}",
            ready.len(),
            table.len(),
            concurrency
        );

        let client = &self.client;
        let mut results = stream::iter(ready)
            .map(|(group, entry)| async move {
                if cancel.is_cancelled() {
                    return (group, None);
                }
                let result = client.submit_entry(&entry).await;
                (group, Some(result))
            })
            .buffer_unordered(concurrency);

        while let Some((group, result)) = results.next().await {
            let outcome = commit(table, &group, result)?;
            reports.push(group.into_report(outcome));
        }

        let report = BatchReport::from_groups(reports);
        info!(
            "Batch finished in {:?}: {} submitted, {} failed, {} skipped, {} cancelled",
            started.elapsed(),
            report.succeeded,
            report.failed,
            report.skipped,
            report.cancelled
        );
        Ok(report)
    }

    /// Group and build everything before any network work starts
    #[allow(clippy::type_complexity)]
    fn plan(
        &self,
        table: &RowTable,
    ) -> (
        Vec<(PlannedGroup, JournalEntry)>,
        Vec<(PlannedGroup, GroupOutcome)>,
    ) {
        let mut ready = Vec::new();
        let mut settled = Vec::new();

        for group in group_rows(table.rows()) {
            let planned = PlannedGroup::from_group(&group);
            match self.builder.build(&group) {
                BuildOutcome::Ready(entry) => ready.push((planned, entry)),
                BuildOutcome::AlreadySubmitted => {
                    debug!("Group {} already submitted, skipping", planned.key);
                    settled.push((planned, GroupOutcome::AlreadySubmitted));
                }
                BuildOutcome::Invalid(error) => {
                    warn!("Group {} failed validation: {}", planned.key, error);
                    let outcome = GroupOutcome::Failed {
                        kind: FailureKind::from(&error),
                        message: error.to_string(),
                    };
                    settled.push((planned, outcome));
                }
            }
        }

        (ready, settled)
    }
}

/// Write one Group's result to all of its rows
fn commit(
    table: &mut RowTable,
    group: &PlannedGroup,
    result: Option<std::result::Result<SubmissionReceipt, ApiError>>,
) -> Result<GroupOutcome> {
    match result {
        None => {
            debug!("Group {} not submitted: run cancelled", group.key);
            Ok(GroupOutcome::Cancelled)
        }
        Some(Ok(receipt)) => {
            table.record_success(group.positions.clone(), &receipt.document, &receipt.status)?;
            info!(
                "Group {} submitted as {} ({})",
                group.key, receipt.document, receipt.status
            );
            Ok(GroupOutcome::Submitted {
                document: receipt.document,
                status: receipt.status,
            })
        }
        Some(Err(error)) => {
            let message = error.to_string();
            table.record_failure(group.positions.clone(), &message)?;
            warn!("Group {} failed: {}", group.key, message);
            Ok(GroupOutcome::Failed {
                kind: FailureKind::from(&error),
                message,
            })
        }
    }
}
