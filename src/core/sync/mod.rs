//! Status Synchronizer: refreshes status and warning of submitted rows
//!
//! Works row by row with no grouping. Only rows carrying a document number
//! are queried, and only their status and warning are ever written.

use crate::config::Config;
use crate::core::batch::CancellationFlag;
use crate::core::client::SubmissionClient;
use crate::core::table::RowTable;
use crate::utils::error::Result;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A row whose status could not be refreshed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncFailure {
    pub row: usize,
    pub document: String,
    pub message: String,
}

/// Aggregate result of a status refresh
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Rows whose status was refreshed
    pub synchronized: usize,
    pub failed: usize,
    /// Rows without a document number
    pub skipped: usize,
    /// Rows not queried because the run was cancelled
    pub cancelled: usize,
    pub failures: Vec<SyncFailure>,
}

/// Re-queries the remote status of every submitted row
pub struct StatusSynchronizer<C> {
    client: C,
    concurrency: usize,
}

impl<C: SubmissionClient> StatusSynchronizer<C> {
    pub fn new(client: C, concurrency: usize) -> Self {
        Self {
            client,
            concurrency: concurrency.max(1),
        }
    }

    pub fn from_config(client: C, config: &Config) -> Self {
        Self::new(client, config.batch.concurrency)
    }

    pub async fn synchronize(&self, table: &mut RowTable) -> Result<SyncReport> {
        self.synchronize_with_cancel(table, &CancellationFlag::new())
            .await
    }

    pub async fn synchronize_with_cancel(
        &self,
        table: &mut RowTable,
        cancel: &CancellationFlag,
    ) -> Result<SyncReport> {
        let mut report = SyncReport::default();

        let targets: Vec<(usize, usize, String)> = table
            .iter()
            .enumerate()
            .filter_map(|(position, row)| {
                row.result()
                    .document
                    .as_deref()
                    .map(str::trim)
                    .filter(|document| !document.is_empty())
                    .map(|document| (position, row.index(), document.to_string()))
            })
            .collect();
        report.skipped = table.len() - targets.len();

        info!(
            "Refreshing status of {} rows with concurrency {}",
            targets.len(),
            self.concurrency
        );

        let client = &self.client;
        let mut results = stream::iter(targets)
            .map(|(position, row, document)| async move {
                if cancel.is_cancelled() {
                    return (position, row, document, None);
                }
                let result = client.query_status(&document).await;
                (position, row, document, Some(result))
            })
            .buffer_unordered(self.concurrency);

        while let Some((position, row, document, result)) = results.next().await {
            match result {
                None => report.cancelled += 1,
                Some(Ok(status)) => {
                    table.record_status(position, &status.status, status.warning.as_deref())?;
                    report.synchronized += 1;
                }
                Some(Err(error)) => {
                    warn!("Status refresh of row {} ({}) failed: {}", row, document, error);
                    report.failed += 1;
                    report.failures.push(SyncFailure {
                        row,
                        document,
                        message: error.to_string(),
                    });
                }
            }
        }

        report.failures.sort_by_key(|failure| failure.row);
        info!(
            "Status refresh finished: {} refreshed, {} failed, {} without document",
            report.synchronized, report.failed, report.skipped
        );
        Ok(report)
    }
}
