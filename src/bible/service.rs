// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! High-level scripture API.
//!
//! [`BibleService`] composes the reference parser, the upstream client and
//! the formatter. Every operation returns display text or a typed
//! [`BibleError`]; rendering errors for protocol clients happens elsewhere.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument};

#[cfg(feature = "telemetry")]
use crate::telemetry::metrics::GLOBAL_METRICS;

use super::catalog::{render_catalog, require_translation, DEFAULT_TRANSLATION};
use super::client::{fetch_lookup, BibleClient, ScriptureSource};
use super::format::{format_chapter, format_verse};
use super::random::select_reference;
use super::reference::{Lookup, VerseReference};
use crate::config::BibleConfig;
use crate::error::{BibleError, BibleResult};

/// Scripture lookups rendered as text.
#[derive(Clone)]
pub struct BibleService {
    source: Arc<dyn ScriptureSource>,
    default_translation: String,
}

impl BibleService {
    /// Create a service over any scripture source.
    pub fn new(source: Arc<dyn ScriptureSource>) -> Self {
        Self {
            source,
            default_translation: DEFAULT_TRANSLATION.to_string(),
        }
    }

    /// Create a service backed by the HTTP client.
    pub fn from_config(config: &BibleConfig) -> BibleResult<Self> {
        let client = BibleClient::new(config)?;
        Ok(Self::new(Arc::new(client)).with_default_translation(&config.default_translation))
    }

    /// Translation used when a caller does not name one.
    pub fn with_default_translation(mut self, id: impl Into<String>) -> Self {
        self.default_translation = id.into();
        self
    }

    pub fn default_translation(&self) -> &str {
        &self.default_translation
    }

    /// Look up a free-text reference such as `"John 3:16"`.
    #[instrument(skip(self))]
    pub async fn passage(&self, reference: &str, translation: Option<&str>) -> BibleResult<String> {
        let start = Instant::now();

        let reference = reference.trim();
        if reference.is_empty() {
            return Err(BibleError::validation("reference must not be empty"));
        }
        // Impossible numbers are rejected here; other shapes go upstream as typed.
        match VerseReference::parse_structured(reference)? {
            Some(parsed) => debug!(parsed = %parsed, "Parsed reference"),
            None => debug!("Forwarding unstructured reference"),
        }

        let translation = self.translation(translation)?;
        let payload = self.source.fetch_passage(reference, translation).await?;
        let text = format_verse(&payload);

        #[cfg(feature = "telemetry")]
        GLOBAL_METRICS.record_operation("bible.service.passage", start.elapsed());
        #[cfg(not(feature = "telemetry"))]
        let _ = start;

        text
    }

    /// Look up a chapter, or a single verse when `verse` is given.
    ///
    /// Identifiers arrive as strings because they come straight out of
    /// resource URIs; they are validated before anything is fetched.
    #[instrument(skip(self))]
    pub async fn lookup(
        &self,
        translation: &str,
        book: &str,
        chapter: &str,
        verse: Option<&str>,
    ) -> BibleResult<String> {
        let start = Instant::now();

        let lookup = Lookup::resolve(translation, book, chapter, verse)?;
        debug!(lookup = %lookup, "Resolved lookup");

        let payload = fetch_lookup(self.source.as_ref(), &lookup).await?;
        let text = if lookup.is_chapter() {
            format_chapter(&payload)
        } else {
            format_verse(&payload)
        };

        #[cfg(feature = "telemetry")]
        GLOBAL_METRICS.record_operation("bible.service.lookup", start.elapsed());
        #[cfg(not(feature = "telemetry"))]
        let _ = start;

        text
    }

    /// Fetch a verse drawn from the fixed pools, optionally filtered by testament.
    #[instrument(skip(self))]
    pub async fn random(
        &self,
        translation: Option<&str>,
        testament: Option<&str>,
    ) -> BibleResult<String> {
        let reference = select_reference(testament)?;
        debug!(reference, "Selected random reference");
        self.passage(reference, translation).await
    }

    /// The translation catalog as display text. No network call.
    pub fn translations(&self) -> String {
        render_catalog()
    }

    fn translation<'a>(&'a self, requested: Option<&'a str>) -> BibleResult<&'a str> {
        let id = requested
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.default_translation);
        require_translation(id)?;
        Ok(id)
    }
}

impl std::fmt::Debug for BibleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BibleService")
            .field("default_translation", &self.default_translation)
            .finish_non_exhaustive()
    }
}
