// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration merging.
//!
//! Handles merging configurations from different sources with proper precedence.

use super::types::{BibleConfig, WorkspaceConfig};

/// CLI options that can override configuration.
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub base_url: Option<String>,
    pub data_url: Option<String>,
    pub translation: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

/// Default configuration values.
pub fn default_config() -> BibleConfig {
    BibleConfig::default()
}

/// Merge multiple configurations with precedence.
///
/// Precedence (highest to lowest):
/// 1. CLI options (including their environment fallbacks)
/// 2. Workspace config (.bible-mcp.json / .bible-mcp.yaml)
/// 3. Global config (~/.bible-mcp/config.json)
/// 4. Default values
pub fn merge_config(
    global: Option<WorkspaceConfig>,
    workspace: Option<WorkspaceConfig>,
    cli: CliOptions,
) -> BibleConfig {
    let mut result = default_config();

    if let Some(config) = global {
        apply_workspace_config(&mut result, &config);
    }

    if let Some(config) = workspace {
        apply_workspace_config(&mut result, &config);
    }

    apply_cli_options(&mut result, &cli);

    result
}

fn apply_workspace_config(result: &mut BibleConfig, config: &WorkspaceConfig) {
    if let Some(ref base_url) = config.base_url {
        result.base_url = base_url.clone();
    }

    if config.data_url.is_some() {
        result.data_url = config.data_url.clone();
    }

    if let Some(ref translation) = config.default_translation {
        result.default_translation = translation.clone();
    }

    if let Some(timeout) = config.timeout_secs {
        result.timeout_secs = timeout;
    }

    if let Some(ref user_agent) = config.user_agent {
        result.user_agent = user_agent.clone();
    }
}

fn apply_cli_options(result: &mut BibleConfig, cli: &CliOptions) {
    if let Some(ref base_url) = cli.base_url {
        result.base_url = base_url.clone();
    }

    if cli.data_url.is_some() {
        result.data_url = cli.data_url.clone();
    }

    if let Some(ref translation) = cli.translation {
        result.default_translation = translation.clone();
    }

    if let Some(timeout) = cli.timeout_secs {
        result.timeout_secs = timeout;
    }

    if let Some(ref user_agent) = cli.user_agent {
        result.user_agent = user_agent.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_defaults_only() {
        let config = merge_config(None, None, CliOptions::default());
        assert_eq!(config, BibleConfig::default());
    }

    #[test]
    fn test_merge_precedence() {
        let global = WorkspaceConfig {
            base_url: Some("http://global.example".to_string()),
            default_translation: Some("kjv".to_string()),
            timeout_secs: Some(10),
            ..Default::default()
        };
        let workspace = WorkspaceConfig {
            default_translation: Some("asv".to_string()),
            ..Default::default()
        };
        let cli = CliOptions {
            timeout_secs: Some(5),
            ..Default::default()
        };

        let config = merge_config(Some(global), Some(workspace), cli);
        assert_eq!(config.base_url, "http://global.example");
        assert_eq!(config.default_translation, "asv");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.data_url.is_none());
    }

    #[test]
    fn test_cli_overrides_everything() {
        let workspace = WorkspaceConfig {
            base_url: Some("http://workspace.example".to_string()),
            data_url: Some("http://workspace.example/data".to_string()),
            ..Default::default()
        };
        let cli = CliOptions {
            base_url: Some("http://cli.example".to_string()),
            data_url: Some("http://cli.example/d".to_string()),
            translation: Some("ylt".to_string()),
            user_agent: Some("tester/1.0".to_string()),
            ..Default::default()
        };

        let config = merge_config(None, Some(workspace), cli);
        assert_eq!(config.base_url, "http://cli.example");
        assert_eq!(config.resolved_data_url(), "http://cli.example/d");
        assert_eq!(config.default_translation, "ylt");
        assert_eq!(config.user_agent, "tester/1.0");
    }
}
