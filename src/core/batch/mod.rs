//! Batch submission of a whole row table
//!
//! Grouping and entry building run first, synchronously, over the table.
//! Ready entries are then submitted through a bounded pool while a single
//! collector loop writes each Group's outcome back to its rows.

mod cancel;
mod submitter;
mod types;


pub use cancel::CancellationFlag;
pub use submitter::BatchSubmitter;
pub use types::{BatchReport, FailureKind, GroupOutcome, GroupReport};
