// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Upstream payload shapes.
//!
//! bible-api.com is not uniform across endpoints: the free-text endpoint
//! returns `reference`/`translation_name`/`text` alongside a `verses` list,
//! while the data endpoint returns only `translation` and `verses` (with the
//! book under `book` rather than `book_name`). Every field is optional here
//! and the formatter decides which shape it is looking at.
//!
//! Decoding is field by field. A field of the wrong type is treated as absent
//! and a malformed entry in `verses` is skipped, so one bad value never
//! discards the rest of the payload.

use serde::Serialize;
use serde_json::Value;

/// A decoded verse or chapter response.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Passage {
    pub reference: Option<String>,
    pub translation_name: Option<String>,
    pub text: Option<String>,
    pub verses: Vec<PassageVerse>,
    /// Translation block sent by the data endpoint.
    pub translation: Option<TranslationInfo>,
}

impl Passage {
    /// Decode leniently, keeping every field that has the expected type.
    pub fn from_value(value: &Value) -> Self {
        let verses = value
            .get("verses")
            .and_then(Value::as_array)
            .map(|verses| verses.iter().filter_map(PassageVerse::from_value).collect())
            .unwrap_or_default();

        Self {
            reference: string_field(value, "reference"),
            translation_name: string_field(value, "translation_name"),
            text: string_field(value, "text"),
            verses,
            translation: value.get("translation").and_then(TranslationInfo::from_value),
        }
    }

    /// Translation display name from whichever field carries it.
    pub fn translation_label(&self) -> Option<&str> {
        non_blank(self.translation_name.as_deref())
            .or_else(|| non_blank(self.translation.as_ref().and_then(|t| t.name.as_deref())))
    }

    /// Reference label, if present and non-blank.
    pub fn reference_label(&self) -> Option<&str> {
        non_blank(self.reference.as_deref())
    }

    /// Verse texts, trimmed, with blanks dropped.
    pub fn verse_texts(&self) -> Vec<&str> {
        self.verses
            .iter()
            .filter_map(|v| non_blank(v.text.as_deref()))
            .collect()
    }
}

/// One verse inside a `verses` list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PassageVerse {
    pub book_name: Option<String>,
    pub book_id: Option<String>,
    pub chapter: Option<u32>,
    pub verse: Option<u32>,
    pub text: Option<String>,
}

impl PassageVerse {
    /// Decode one `verses` entry; `None` unless it is an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.is_object().then(|| Self {
            book_name: string_field(value, "book_name").or_else(|| string_field(value, "book")),
            book_id: string_field(value, "book_id"),
            chapter: number_field(value, "chapter"),
            verse: number_field(value, "verse"),
            text: string_field(value, "text"),
        })
    }
}

/// Translation metadata from the data endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TranslationInfo {
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub language: Option<String>,
}

impl TranslationInfo {
    fn from_value(value: &Value) -> Option<Self> {
        value.is_object().then(|| Self {
            identifier: string_field(value, "identifier"),
            name: string_field(value, "name"),
            language: string_field(value, "language"),
        })
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Numbers arrive as JSON numbers or, from some mirrors, as numeric strings.
fn number_field(value: &Value, key: &str) -> Option<u32> {
    match value.get(key)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_free_text_shape() {
        let value = json!({
            "reference": "John 3:16",
            "verses": [{
                "book_id": "JHN",
                "book_name": "John",
                "chapter": 3,
                "verse": 16,
                "text": "For God so loved the world...\n"
            }],
            "text": "For God so loved the world...\n",
            "translation_id": "web",
            "translation_name": "World English Bible",
            "translation_note": "Public Domain"
        });
        let passage = Passage::from_value(&value);
        assert_eq!(passage.reference_label(), Some("John 3:16"));
        assert_eq!(passage.translation_label(), Some("World English Bible"));
        assert_eq!(passage.verses.len(), 1);
        assert_eq!(passage.verses[0].book_name.as_deref(), Some("John"));
    }

    #[test]
    fn test_data_endpoint_shape() {
        let value = json!({
            "translation": {"identifier": "web", "name": "World English Bible", "language": "English"},
            "verses": [
                {"book_id": "GEN", "book": "Genesis", "chapter": 1, "verse": 1, "text": "In the beginning..."},
                {"book_id": "GEN", "book": "Genesis", "chapter": 1, "verse": 2, "text": "  "}
            ]
        });
        let passage = Passage::from_value(&value);
        assert!(passage.reference_label().is_none());
        assert_eq!(passage.translation_label(), Some("World English Bible"));
        assert_eq!(passage.verses[0].book_name.as_deref(), Some("Genesis"));
        assert_eq!(passage.verse_texts(), vec!["In the beginning..."]);
    }

    #[test]
    fn test_mistyped_field_is_dropped_alone() {
        let passage = Passage::from_value(&json!({
            "reference": 42,
            "translation_name": "World English Bible",
            "text": "In the beginning"
        }));
        assert!(passage.reference_label().is_none());
        assert_eq!(passage.translation_label(), Some("World English Bible"));
        assert_eq!(passage.text.as_deref(), Some("In the beginning"));
        assert!(passage.verses.is_empty());
    }

    #[test]
    fn test_null_verse_text_keeps_top_level_fields() {
        let passage = Passage::from_value(&json!({
            "reference": "John 3:16",
            "translation_name": "World English Bible",
            "text": "For God so loved the world",
            "verses": [{"book_name": "John", "chapter": 3, "verse": 16, "text": null}]
        }));
        assert_eq!(passage.reference_label(), Some("John 3:16"));
        assert_eq!(passage.verses.len(), 1);
        assert!(passage.verses[0].text.is_none());
        assert!(passage.verse_texts().is_empty());
    }

    #[test]
    fn test_numeric_strings_and_bad_entries() {
        let passage = Passage::from_value(&json!({
            "verses": [
                {"book": "Genesis", "chapter": "1", "verse": " 2 ", "text": "The earth was formless"},
                "not a verse",
                {"book": "Genesis", "chapter": -1, "verse": 3.5, "text": "Let there be light"}
            ]
        }));
        assert_eq!(passage.verses.len(), 2);
        assert_eq!(passage.verses[0].chapter, Some(1));
        assert_eq!(passage.verses[0].verse, Some(2));
        assert_eq!(passage.verses[1].chapter, None);
        assert_eq!(passage.verses[1].verse, None);
        assert_eq!(
            passage.verse_texts(),
            vec!["The earth was formless", "Let there be light"]
        );
    }
}
