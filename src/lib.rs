// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Bible MCP - scripture from bible-api.com over the Model Context Protocol.
//!
//! An external agent can fetch scripture text by free-text reference, by
//! structured book/chapter/verse identifiers, or at random, and obtain
//! ready-made study prompts.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`bible`] - Reference parsing, catalogs, the upstream client, formatting and [`BibleService`]
//! - [`mcp`] - rmcp server handler and the registration table
//! - [`config`] - Configuration loading and merging
//! - [`error`] - Error types and result aliases
//! - [`telemetry`] - Tracing setup and in-process metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use bible_mcp::config::{load_config, CliOptions};
//! use bible_mcp::{BibleService, McpServer};
//!
//! let config = load_config(".".as_ref(), CliOptions::default())?;
//! let service = BibleService::from_config(&config)?;
//! bible_mcp::mcp::serve_stdio(McpServer::from_service(service)).await?;
//! ```

pub mod bible;
pub mod config;
pub mod error;
pub mod mcp;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use bible::{BibleClient, BibleService, ScriptureSource};
pub use config::BibleConfig;
pub use error::{BibleError, BibleResult, ConfigError, Result};
pub use mcp::McpServer;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
