//! Error recovery utilities
//!
//! Retry with exponential backoff for transient failures.

mod retry;
mod types;

pub use retry::RetryPolicy;
pub use types::{RetryConfig, Retryable};
