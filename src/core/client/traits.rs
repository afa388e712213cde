//! The submission seam between the engine and the remote API

use super::error::ApiError;
use super::types::{DocumentStatus, SubmissionReceipt};
use crate::core::entry::JournalEntry;
use async_trait::async_trait;
use std::sync::Arc;

/// Remote accounting API operations used by the engine
///
/// Implementations own their retry policy: a call returns only after the
/// last attempt, so a Group never has two submissions in flight.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Create one journal entry
    async fn submit_entry(&self, entry: &JournalEntry) -> Result<SubmissionReceipt, ApiError>;

    /// Read the current status of an existing document
    async fn query_status(&self, document: &str) -> Result<DocumentStatus, ApiError>;
}

#[async_trait]
impl<T: SubmissionClient + ?Sized> SubmissionClient for Arc<T> {
    async fn submit_entry(&self, entry: &JournalEntry) -> Result<SubmissionReceipt, ApiError> {
        (**self).submit_entry(entry).await
    }

    async fn query_status(&self, document: &str) -> Result<DocumentStatus, ApiError> {
        (**self).query_status(document).await
    }
}
