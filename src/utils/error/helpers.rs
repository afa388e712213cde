//! Helper functions for creating specific error types

use super::types::JournalError;

impl JournalError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto(message.into())
    }

    pub fn invalid_table<S: Into<String>>(message: S) -> Self {
        Self::InvalidTable(message.into())
    }

    /// Whether the error comes from configuration rather than input data
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Yaml(_))
    }
}
