//! Error handling utilities
//!
//! This module defines the crate-level error type and the retry policy used
//! by the submission client.

mod helpers;
pub mod recovery;
mod types;

pub use recovery::{RetryConfig, RetryPolicy, Retryable};
pub use types::{JournalError, Result};
