//! Logging setup
//!
//! Installs the global `tracing` subscriber. `RUST_LOG`, when set, wins over
//! the configured level.

use crate::config::LoggingConfig;
use crate::utils::error::{JournalError, Result};
use tracing_subscriber::EnvFilter;

/// Build the level filter for a logging configuration
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| {
        JournalError::config(format!("Invalid log level '{}': {}", config.level, e))
    })
}

/// Initialize the global subscriber
///
/// Logs go to stderr so that reports printed on stdout stay machine readable.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| JournalError::config(format!("Failed to initialize logging: {}", e)))
}
