//! Utility modules shared by the batch engine
//!
//! ## Module Organization
//!
//! - **auth**: request signing for the accounting API
//! - **error**: error types and retry with exponential backoff
//! - **logging**: tracing subscriber setup

pub mod auth;
pub mod error;
pub mod logging;

pub use error::{JournalError, Result, RetryConfig, RetryPolicy, Retryable};

use std::time::{SystemTime, UNIX_EPOCH};

/// Get current timestamp in seconds
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Truncate string to at most `max_chars` characters, appending an ellipsis
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
