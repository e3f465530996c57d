// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration type definitions.
//!
//! Defines the partial file configuration and the resolved configuration,
//! supporting JSON and YAML formats.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::bible::catalog::{find_translation, DEFAULT_TRANSLATION};
use crate::error::ConfigError;

/// Default upstream base URL.
pub const DEFAULT_BASE_URL: &str = "https://bible-api.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration as written in a config file.
/// Every field is optional; unset fields fall through to lower-precedence sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    /// Base URL of the free-text endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Base URL of the structured data endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,

    /// Translation used when a request names none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_translation: Option<String>,

    /// Upstream request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BibleConfig {
    pub base_url: String,

    /// Falls back to `{base_url}/data` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,

    pub default_translation: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for BibleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_url: None,
            default_translation: DEFAULT_TRANSLATION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("bible-mcp/{}", crate::VERSION),
        }
    }
}

impl BibleConfig {
    /// Structured data endpoint base.
    pub fn resolved_data_url(&self) -> String {
        match &self.data_url {
            Some(url) => url.clone(),
            None => format!("{}/data", self.base_url.trim_end_matches('/')),
        }
    }

    /// Check that the resolved values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("baseUrl", &self.base_url)?;
        if let Some(ref url) = self.data_url {
            validate_url("dataUrl", url)?;
        }

        if find_translation(&self.default_translation).is_none() {
            return Err(ConfigError::invalid(
                "defaultTranslation",
                format!("unknown translation {:?}", self.default_translation),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("timeoutSecs", "must be positive"));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::invalid("userAgent", "must not be empty"));
        }

        Ok(())
    }
}

fn validate_url(field: &str, raw: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::invalid(field, format!("{raw:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            field,
            format!("{raw:?}: expected an http or https URL"),
        ));
    }
    Ok(())
}
