// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Scripture lookup against bible-api.com.
//!
//! Components, leaf first:
//!
//! - [`books`] and [`catalog`]: static book and translation tables
//! - [`reference`]: free-text reference parsing and structured identifier resolution
//! - [`random`]: random verse selection from fixed pools
//! - [`client`]: the upstream HTTP adapter behind [`ScriptureSource`]
//! - [`format`]: payload to display text
//! - [`service`]: [`BibleService`], the API the protocol surface and CLI call
//!
//! # Example
//!
//! ```rust,ignore
//! use bible_mcp::bible::BibleService;
//! use bible_mcp::config::BibleConfig;
//!
//! let service = BibleService::from_config(&BibleConfig::default())?;
//! println!("{}", service.passage("John 3:16", Some("kjv")).await?);
//! ```

pub mod books;
pub mod catalog;
pub mod client;
pub mod format;
pub mod random;
pub mod reference;
pub mod service;
pub mod types;

pub use books::{find_book, is_single_chapter, BookDescriptor, Testament};
pub use catalog::{
    find_translation, list_translations, render_catalog, TranslationDescriptor,
    DEFAULT_TRANSLATION,
};
pub use client::{BibleClient, ScriptureSource};
pub use format::{format_chapter, format_verse};
pub use reference::{Lookup, VerseReference, VerseSpan};
pub use service::BibleService;
pub use types::Passage;
