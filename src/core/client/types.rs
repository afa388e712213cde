//! Submission client request/response types

use super::error::GraphqlError;
use serde::{Deserialize, Serialize};

/// What the server returns for a created entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Document number assigned by the server
    pub document: String,
    pub status: String,
}

/// Current remote state of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStatus {
    pub status: String,
    pub warning: Option<String>,
}

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateJournalEntryData {
    pub create_journal_entry: Option<CreatedEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatedEntry {
    pub journal_entry_number: Option<String>,
    #[serde(default)]
    pub journal_entry_status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JournalEntriesData {
    #[serde(default)]
    pub journal_entries: Vec<EntryStatusNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EntryStatusNode {
    pub number: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub warning: Option<String>,
}
