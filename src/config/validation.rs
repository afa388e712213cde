//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::models::*;
use crate::utils::error::{JournalError, Result, RetryConfig};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};
use url::Url;

/// Configuration validation trait
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<()> {
        debug!("Validating API configuration");

        let url = Url::parse(&self.endpoint).map_err(|e| {
            JournalError::config(format!("API endpoint has invalid URL format: {}", e))
        })?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(JournalError::config(format!(
                    "API endpoint must use http:// or https:// scheme, got: {}",
                    scheme
                )));
            }
        }

        if url.host_str().is_none() {
            return Err(JournalError::config("API endpoint URL must have a valid host"));
        }

        if url.scheme() == "http" && !is_local_host(&url) {
            warn!(
                "API endpoint {} is not using TLS; signed requests will travel in clear text",
                self.endpoint
            );
        }

        if self.timeout_seconds == 0 {
            return Err(JournalError::config("API timeout must be greater than 0"));
        }

        if !self.credentials.is_complete() {
            warn!("API credentials are incomplete; calls will likely be rejected");
        }

        Ok(())
    }
}

fn is_local_host(url: &Url) -> bool {
    matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"))
}

impl Validate for RetryConfig {
    fn validate(&self) -> Result<()> {
        debug!("Validating retry configuration");

        if self.max_attempts == 0 {
            return Err(JournalError::config("Retry max_attempts must be at least 1"));
        }
        if self.max_attempts > 10 {
            return Err(JournalError::config(
                "Retry max_attempts must not exceed 10",
            ));
        }
        if self.backoff_multiplier < 1.0 {
            return Err(JournalError::config(
                "Retry backoff_multiplier must be >= 1.0",
            ));
        }
        if self.base_delay_ms > self.max_delay_ms {
            return Err(JournalError::config(
                "Retry base_delay_ms must not exceed max_delay_ms",
            ));
        }
        Ok(())
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<()> {
        debug!("Validating batch configuration");

        if self.concurrency == 0 {
            return Err(JournalError::config("Batch concurrency must be greater than 0"));
        }
        if self.concurrency > 64 {
            return Err(JournalError::config("Batch concurrency must not exceed 64"));
        }
        if self.balance_tolerance.is_sign_negative() {
            return Err(JournalError::config(
                "Batch balance_tolerance cannot be negative",
            ));
        }
        if self.max_rows == 0 {
            return Err(JournalError::config("Batch max_rows must be greater than 0"));
        }
        Ok(())
    }
}

impl Validate for ColumnMap {
    fn validate(&self) -> Result<()> {
        debug!("Validating column mapping");

        let line_columns = [
            ("account", &self.account),
            ("amount", &self.amount),
            ("debit", &self.debit),
            ("credit", &self.credit),
        ];
        for (field, column) in line_columns {
            if column.trim().is_empty() {
                return Err(JournalError::config(format!(
                    "Column for '{}' cannot be empty",
                    field
                )));
            }
        }

        let mut keys = HashSet::new();
        for dimension in &self.dimensions {
            if dimension.key.is_empty() || dimension.column.is_empty() {
                return Err(JournalError::config(
                    "Dimension key and column cannot be empty",
                ));
            }
            if !keys.insert(&dimension.key) {
                return Err(JournalError::config(format!(
                    "Duplicate dimension key: {}",
                    dimension.key
                )));
            }
        }

        let mut seen: HashMap<&str, &str> = HashMap::new();
        for (field, column) in self.named_columns() {
            if column.trim().is_empty() {
                continue;
            }
            if let Some(previous) = seen.insert(column, field) {
                return Err(JournalError::config(format!(
                    "Column '{}' is mapped to both '{}' and '{}'",
                    column, previous, field
                )));
            }
        }
        Ok(())
    }
}
