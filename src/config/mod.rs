//! Configuration management for the batch engine
//!
//! Configuration comes from a YAML file, environment variables (with `.env`
//! support), or both; environment values take precedence.

pub mod models;
pub mod validation;

pub use crate::utils::error::RetryConfig;
pub use models::*;
pub use validation::Validate;

use crate::utils::error::{JournalError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable names
pub mod env_keys {
    pub const ENDPOINT: &str = "JOURNAL_API_ENDPOINT";
    pub const APP_KEY: &str = "JOURNAL_API_KEY";
    pub const CLIENT_ID: &str = "JOURNAL_CLIENT_ID";
    pub const SECRET: &str = "JOURNAL_API_SECRET";
    pub const CONCURRENCY: &str = "JOURNAL_CONCURRENCY";
    pub const MAX_ATTEMPTS: &str = "JOURNAL_MAX_ATTEMPTS";
    pub const LOG_LEVEL: &str = "JOURNAL_LOG_LEVEL";
}

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub columns: ColumnMap,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| JournalError::config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;
        load_dotenv();
        let config = config.apply_env(|key| std::env::var(key).ok())?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        load_dotenv();

        let config = Self::default().apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML without validating
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| JournalError::config(format!("Failed to parse config: {}", e)))
    }

    /// Overlay values found through `lookup` (usually the process environment)
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(env_keys::ENDPOINT) {
            self.api.endpoint = endpoint;
        }
        if let Some(app_key) = lookup(env_keys::APP_KEY) {
            self.api.credentials.app_key = app_key;
        }
        if let Some(client_id) = lookup(env_keys::CLIENT_ID) {
            self.api.credentials.client_id = client_id;
        }
        if let Some(secret) = lookup(env_keys::SECRET) {
            self.api.credentials.secret = secret;
        }
        if let Some(concurrency) = lookup(env_keys::CONCURRENCY) {
            self.batch.concurrency = concurrency.trim().parse().map_err(|e| {
                JournalError::config(format!("Invalid {}: {}", env_keys::CONCURRENCY, e))
            })?;
        }
        if let Some(attempts) = lookup(env_keys::MAX_ATTEMPTS) {
            self.retry.max_attempts = attempts.trim().parse().map_err(|e| {
                JournalError::config(format!("Invalid {}: {}", env_keys::MAX_ATTEMPTS, e))
            })?;
        }
        if let Some(level) = lookup(env_keys::LOG_LEVEL) {
            self.logging.level = level;
        }
        Ok(self)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.api.validate()?;
        self.retry.validate()?;
        self.batch.validate()?;
        self.columns.validate()?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| JournalError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {:?}", path);
    }
}
