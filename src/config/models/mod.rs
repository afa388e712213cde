//! Configuration data models
//!
//! This module defines all configuration structures used by the batch engine.

pub mod api;
pub mod batch;
pub mod columns;
pub mod logging;

// Re-export all configuration types
pub use api::*;
pub use batch::*;
pub use columns::*;
pub use logging::*;

use rust_decimal::Decimal;

/// Default API endpoint
pub fn default_endpoint() -> String {
    "http://localhost:3000/graphql".to_string()
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    60
}

/// Default number of Groups submitted concurrently
pub fn default_concurrency() -> usize {
    4
}

/// Default balance tolerance: one cent
pub fn default_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Default maximum number of rows accepted in one run
pub fn default_max_rows() -> usize {
    1000
}

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}
