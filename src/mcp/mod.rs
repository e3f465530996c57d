// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Model Context Protocol (MCP) server.
//!
//! # Architecture
//!
//! ```text
//!  stdin ──► rmcp service ──► McpServer ──► Registry ──┬─► tools      ──┐
//!  stdout ◄──                 (ServerHandler)          ├─► resources  ──┼─► BibleService
//!                                                      └─► prompts      │
//! ```
//!
//! Exposed bindings:
//!
//! | Kind     | Name |
//! |----------|------|
//! | resource | `bible://{translation}/{book}/{chapter}` |
//! | resource | `bible://{translation}/{book}/{chapter}/{verse}` |
//! | resource | `bible://random/{translation}` |
//! | tool     | `get_verse_by_reference`, `get_random_verse_tool`, `list_available_translations` |
//! | prompt   | `analyze_verse_prompt`, `find_verses_on_topic_prompt` |
//!
//! # Example
//!
//! ```rust,ignore
//! use bible_mcp::mcp::{serve_stdio, McpServer};
//!
//! serve_stdio(McpServer::from_service(service)).await?;
//! ```

pub mod prompts;
pub mod registry;
pub mod resources;
pub mod server;
pub mod tools;

pub use registry::{DispatchResult, Registry, RegistryBuilder, UriTemplate, TEXT_MIME};
pub use server::{serve, serve_stdio, McpServer, SERVER_NAME};
