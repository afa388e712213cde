//! Accounting API configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// GraphQL endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Signing credentials
    #[serde(default)]
    pub credentials: Credentials,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout(),
            credentials: Credentials::default(),
        }
    }
}

impl ApiConfig {
    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// The three opaque values used to sign API calls
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub app_key: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub secret: String,
}

impl Credentials {
    pub fn new(
        app_key: impl Into<String>,
        client_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            app_key: app_key.into(),
            client_id: client_id.into(),
            secret: secret.into(),
        }
    }

    /// Whether every value is present
    pub fn is_complete(&self) -> bool {
        !self.app_key.is_empty() && !self.client_id.is_empty() && !self.secret.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_key", &self.app_key)
            .field("client_id", &self.client_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
