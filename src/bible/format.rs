// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Render upstream payloads as display text.
//!
//! Every block has the same layout:
//!
//! ```text
//! 📖 {reference label}
//! 📝 {translation name}
//!
//! {body}
//! ```
//!
//! A payload that yields no body text is an error, never an empty success.

use serde_json::Value;

use super::types::Passage;
use crate::error::{BibleError, BibleResult};

const UNKNOWN_REFERENCE: &str = "Unknown reference";
const UNKNOWN_TRANSLATION: &str = "Unknown translation";
const FALLBACK_LABEL: &str = "Chapter content";

/// Format a verse (or verse range) payload.
pub fn format_verse(value: &Value) -> BibleResult<String> {
    let passage = Passage::from_value(value);
    let label = passage.reference_label().unwrap_or(UNKNOWN_REFERENCE);
    let body = passage_body(&passage).ok_or_else(|| missing_text(label))?;
    Ok(render_block(label, translation_of(&passage), &body))
}

/// Format a chapter payload.
///
/// Three upstream shapes are handled: a `reference`-bearing response (label
/// trimmed to "Book Chapter"), a bare `verses` list (label taken from the first
/// verse), and anything else, which is dumped verbatim under a generic label.
pub fn format_chapter(value: &Value) -> BibleResult<String> {
    let passage = Passage::from_value(value);

    if let Some(reference) = passage.reference_label() {
        let label = chapter_label(reference);
        let body = passage_body(&passage).ok_or_else(|| missing_text(label))?;
        return Ok(render_block(label, translation_of(&passage), &body));
    }

    if let Some(first) = passage.verses.first() {
        let label = match (first.book_name.as_deref(), first.chapter) {
            (Some(book), Some(chapter)) => format!("{} {}", book.trim(), chapter),
            (Some(book), None) => book.trim().to_string(),
            _ => FALLBACK_LABEL.to_string(),
        };
        let texts = passage.verse_texts();
        if texts.is_empty() {
            return Err(missing_text(&label));
        }
        return Ok(render_block(&label, translation_of(&passage), &texts.join("\n\n")));
    }

    Ok(format_fallback(value))
}

/// Generic rendering for payloads of unknown shape. Never fails.
pub fn format_fallback(value: &Value) -> String {
    format!("📖 {FALLBACK_LABEL}\n\n{value:#}")
}

/// Strip a trailing `:verse` suffix, leaving "Book Chapter".
pub fn chapter_label(reference: &str) -> &str {
    reference
        .split(':')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(reference)
}

fn render_block(label: &str, translation: &str, body: &str) -> String {
    format!("📖 {label}\n📝 {translation}\n\n{body}")
}

fn translation_of(passage: &Passage) -> &str {
    passage.translation_label().unwrap_or(UNKNOWN_TRANSLATION)
}

fn passage_body(passage: &Passage) -> Option<String> {
    let text = passage.text.as_deref().map(str::trim).unwrap_or_default();
    if !text.is_empty() {
        return Some(text.to_string());
    }
    let texts = passage.verse_texts();
    (!texts.is_empty()).then(|| texts.join("\n\n"))
}

fn missing_text(label: &str) -> BibleError {
    BibleError::Decode(format!("response for {label} carried no text"))
}
