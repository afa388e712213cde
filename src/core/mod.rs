//! Core functionality for the batch engine
//!
//! Data flows row table → grouping → entry builder → batch submitter →
//! submission client, with results written back to the row table. The
//! status synchronizer reads document numbers from the table and writes
//! status back without going through grouping.

pub mod batch;
pub mod client;
pub mod entry;
pub mod grouping;
pub mod sync;
pub mod table;
