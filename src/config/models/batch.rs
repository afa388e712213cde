//! Batch run configuration

use super::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Batch run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Groups (or rows, for status sync) processed concurrently
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Largest accepted |sum of line amounts| for a Group
    #[serde(default = "default_tolerance")]
    pub balance_tolerance: Decimal,
    /// Row tables longer than this are rejected before any work starts
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    /// Require site, entry type, date, currency and header description
    #[serde(default)]
    pub require_header: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            balance_tolerance: default_tolerance(),
            max_rows: default_max_rows(),
            require_header: false,
        }
    }
}

impl BatchConfig {
    /// Set concurrency limit
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set balance tolerance
    pub fn with_tolerance(mut self, tolerance: Decimal) -> Self {
        self.balance_tolerance = tolerance.abs();
        self
    }

    /// Set row limit
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }
}
