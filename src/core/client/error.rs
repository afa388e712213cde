//! Submission client error types

use crate::utils::error::Retryable;
use crate::utils::truncate_string;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const MAX_BODY_IN_ERROR: usize = 300;

/// Errors raised while talking to the accounting API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Rate limit error
    #[error("Rate limit exceeded: {message}")]
    RateLimited {
        message: String,
        retry_after: Option<Duration>,
    },

    /// 5xx response
    #[error("Server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// The server refused the request or the entry
    #[error("Rejected by server: {0}")]
    Rejected(String),

    /// A 2xx response without the expected data
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Unknown document number
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Request could not be signed
    #[error("Request signing failed: {0}")]
    Signing(String),
}

impl ApiError {
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::RateLimited { .. } => "rate_limit",
            Self::Server { .. } => "server",
            Self::Network(_) => "network",
            Self::Unauthorized(_) => "unauthorized",
            Self::Rejected(_) => "rejected",
            Self::InvalidResponse(_) => "invalid_response",
            Self::NotFound(_) => "not_found",
            Self::Signing(_) => "signing",
        }
    }

    /// Classify a non-2xx HTTP response
    pub fn from_status(status: u16, body: &str, retry_after: Option<Duration>) -> Self {
        let message = if body.trim().is_empty() {
            format!("HTTP {}", status)
        } else {
            truncate_string(body.trim(), MAX_BODY_IN_ERROR)
        };
        match status {
            401 | 403 => Self::Unauthorized(message),
            408 => Self::Timeout(message),
            429 => Self::RateLimited {
                message,
                retry_after,
            },
            500..=599 => Self::Server { status, message },
            _ => Self::Rejected(format!("HTTP {}: {}", status, message)),
        }
    }

    /// Classify a transport failure
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_decode() {
            Self::InvalidResponse(error.to_string())
        } else if error.is_connect() {
            Self::Network(format!("Connection failed: {}", error))
        } else {
            Self::Network(format!("Request failed: {}", error))
        }
    }

    /// A 2xx response whose body could not be read
    ///
    /// The server has accepted the request by then, so this is never retried.
    pub fn unreadable_body(detail: impl std::fmt::Display) -> Self {
        Self::InvalidResponse(format!(
            "Request accepted but the response could not be read: {}",
            detail
        ))
    }

    /// Classify the `errors` array of a GraphQL response
    pub fn from_graphql(errors: &[GraphqlError]) -> Self {
        let message = errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        if errors.iter().any(GraphqlError::is_unauthenticated) {
            Self::Unauthorized(message)
        } else {
            Self::Rejected(message)
        }
    }
}

impl Retryable for ApiError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_) | Self::RateLimited { .. } | Self::Server { .. } | Self::Network(_)
        )
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// One entry of a GraphQL `errors` array
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
}

impl GraphqlError {
    fn is_unauthenticated(&self) -> bool {
        self.extensions
            .as_ref()
            .and_then(|extensions| extensions.get("code"))
            .and_then(|code| code.as_str())
            .is_some_and(|code| code == "UNAUTHENTICATED")
    }
}
