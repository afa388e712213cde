//! # journal-batch
//!
//! Turns an ordered table of spreadsheet rows into balanced journal entries
//! and submits them in batches to an accounting GraphQL API, writing the
//! created document number, status and warning back to every row.
//!
//! ## Features
//!
//! - **Grouping**: a marker column splits the table into contiguous Groups,
//!   one journal entry each
//! - **Validation**: required fields, number and date parsing, and a balance
//!   check before anything is sent
//! - **Idempotent resubmission**: Groups whose rows already carry a document
//!   number are skipped
//! - **Bounded concurrency**: Groups are submitted through a worker pool with
//!   retries and exponential backoff for transient failures
//! - **Status sync**: refresh status and warning of submitted rows
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use journal_batch::{BatchSubmitter, Config, GraphqlClient, RowTable};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/journal.yaml").await?;
//!     let client = GraphqlClient::from_config(&config)?;
//!
//!     let mut table = RowTable::from_json_str(&std::fs::read_to_string("rows.json")?)?;
//!     let report = BatchSubmitter::from_config(client, &config)
//!         .submit(&mut table)
//!         .await?;
//!
//!     println!("{} submitted, {} failed", report.succeeded, report.failed);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{JournalError, Result};

pub use crate::core::batch::{
    BatchReport, BatchSubmitter, CancellationFlag, FailureKind, GroupOutcome, GroupReport,
};
pub use crate::core::client::{
    ApiError, DEFAULT_CREATED_STATUS, DocumentStatus, GraphqlClient, SubmissionClient,
    SubmissionReceipt,
};
pub use crate::core::entry::{BuildOutcome, EntryBuilder, JournalEntry, JournalLine, ValidationError};
pub use crate::core::grouping::{Group, GroupKey, group_rows};
pub use crate::core::sync::{StatusSynchronizer, SyncFailure, SyncReport};
pub use crate::core::table::{Row, RowResult, RowTable, STATUS_ERROR};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
