// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error types for the Bible MCP server.
//!
//! This module provides strongly-typed errors for the scripture lookup layer
//! and configuration loading, using `thiserror` for ergonomic error definitions
//! and `anyhow` for propagation at the binary edge.

use thiserror::Error;

/// Errors that can occur while resolving, fetching, or formatting scripture.
#[derive(Error, Debug)]
pub enum BibleError {
    /// Caller input failed validation (bad testament filter, malformed book id, ...).
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The upstream service answered outside the 2xx range.
    #[error("Upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The upstream body could not be decoded into the expected shape.
    #[error("Failed to decode upstream response: {0}")]
    Decode(String),

    /// A book or translation is not present in the local catalog.
    #[error("Unknown {kind}: {id}")]
    NotFoundLocal { kind: &'static str, id: String },

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),
}

impl BibleError {
    /// Create an upstream error from a status code and response body.
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an unknown-book error.
    pub fn unknown_book(id: impl Into<String>) -> Self {
        Self::NotFoundLocal {
            kind: "book",
            id: id.into(),
        }
    }

    /// Create an unknown-translation error.
    pub fn unknown_translation(id: impl Into<String>) -> Self {
        Self::NotFoundLocal {
            kind: "translation",
            id: id.into(),
        }
    }

    /// HTTP status carried by an upstream failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error was caused by caller input rather than upstream.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFoundLocal { .. })
    }
}

impl From<serde_json::Error> for BibleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Invalid config format: {0}")]
    InvalidFormat(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("IO error reading config: {0}")]
    IoError(String),

    #[error("YAML parsing error: {0}")]
    YamlError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}

impl ConfigError {
    /// Create an invalid value error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            _ => Self::IoError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::YamlError(err.to_string())
    }
}

/// Result type for scripture operations.
pub type BibleResult<T> = std::result::Result<T, BibleError>;

/// Result type alias using anyhow for flexible error handling.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_carries_status_and_body() {
        let err = BibleError::upstream(404, "Not found");
        match &err {
            BibleError::Upstream { status, body } => {
                assert_eq!(*status, 404);
                assert_eq!(body, "Not found");
            }
            _ => panic!("Expected Upstream"),
        }
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not found"));
    }

    #[test]
    fn test_not_found_local_display() {
        let err = BibleError::unknown_translation("xyz");
        assert_eq!(err.to_string(), "Unknown translation: xyz");

        let err = BibleError::unknown_book("ZZZ");
        assert_eq!(err.to_string(), "Unknown book: ZZZ");
    }

    #[test]
    fn test_caller_error_classification() {
        assert!(BibleError::validation("bad").is_caller_error());
        assert!(BibleError::unknown_book("ZZZ").is_caller_error());
        assert!(!BibleError::upstream(500, "").is_caller_error());
        assert!(!BibleError::Decode("eof".to_string()).is_caller_error());
        assert!(!BibleError::Network("refused".to_string()).is_caller_error());
    }

    #[test]
    fn test_bible_error_from_json() {
        let result: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: BibleError = result.unwrap_err().into();
        assert!(matches!(err, BibleError::Decode(_)));
    }

    #[test]
    fn test_config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ConfigError = io_err.into();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_config_error_invalid_display() {
        let err = ConfigError::invalid("timeout_secs", "must be positive");
        let display = err.to_string();
        assert!(display.contains("timeout_secs"));
        assert!(display.contains("must be positive"));
    }
}
