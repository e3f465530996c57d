// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Reference parsing and upstream identifier building.
//!
//! Two entry points:
//!
//! - [`VerseReference`] parses free text such as `"John 3:16"` or
//!   `"Matthew 5:3-10,12"` and renders it back in the form upstream expects.
//! - [`Lookup::resolve`] turns a structured `(translation, book, chapter, verse?)`
//!   tuple into the request to issue, applying single-chapter book handling.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use super::books::{find_book, is_single_chapter};
use super::catalog::require_translation;
use crate::error::{BibleError, BibleResult};

static REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*((?:[1-3]\s*)?[A-Za-z][A-Za-z. ]*?)\s+(\d+)(?:\s*:\s*(\d[\d,\-\s]*))?\s*$")
        .unwrap()
});

static BOOK_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[1-3][A-Za-z]{2}|[A-Za-z]{3})$").unwrap());

/// An inclusive run of verses within one chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerseSpan {
    pub start: u32,
    pub end: u32,
}

impl VerseSpan {
    /// A span covering a single verse.
    pub fn single(verse: u32) -> Self {
        Self {
            start: verse,
            end: verse,
        }
    }
}

impl fmt::Display for VerseSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A human-readable locator for scripture text.
///
/// An empty `verses` list addresses the whole chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseReference {
    pub book: String,
    pub chapter: u32,
    pub verses: Vec<VerseSpan>,
}

impl VerseReference {
    /// Reference to a whole chapter.
    pub fn chapter(book: impl Into<String>, chapter: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            verses: Vec::new(),
        }
    }

    /// Reference to a single verse.
    pub fn verse(book: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            verses: vec![VerseSpan::single(verse)],
        }
    }

    /// Whether this reference names specific verses rather than a chapter.
    pub fn has_verses(&self) -> bool {
        !self.verses.is_empty()
    }
}

impl fmt::Display for VerseReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spans = self
            .verses
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        // Single-chapter books are addressed upstream by verse number alone.
        if is_single_chapter(&self.book) && !spans.is_empty() {
            write!(f, "{} {}", self.book, spans)
        } else if spans.is_empty() {
            write!(f, "{} {}", self.book, self.chapter)
        } else {
            write!(f, "{} {}:{}", self.book, self.chapter, spans)
        }
    }
}

impl VerseReference {
    /// Parse `input` if it has the `Book Chapter[:verses]` shape.
    ///
    /// `Ok(None)` means the text has some other shape. An error means it has
    /// the shape but names an impossible chapter or verse.
    pub fn parse_structured(input: &str) -> BibleResult<Option<Self>> {
        let Some(caps) = REFERENCE_RE.captures(input) else {
            return Ok(None);
        };

        let book = collapse_whitespace(&caps[1]);
        let number = parse_positive(&caps[2], "chapter")?;
        let verses = match caps.get(3) {
            Some(m) => parse_spans(m.as_str())?,
            None => Vec::new(),
        };

        if is_single_chapter(&book) {
            if verses.is_empty() {
                // "Jude 5" means verse 5 of the only chapter.
                return Ok(Some(Self::verse(book, 1, number)));
            }
            if number != 1 {
                return Err(BibleError::validation(format!(
                    "{book} has a single chapter, got chapter {number}"
                )));
            }
        }

        Ok(Some(Self {
            book,
            chapter: number,
            verses,
        }))
    }
}

impl FromStr for VerseReference {
    type Err = BibleError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.trim().is_empty() {
            return Err(BibleError::validation("reference must not be empty"));
        }

        Self::parse_structured(input)?.ok_or_else(|| {
            BibleError::validation(format!("unrecognised reference format: {}", input.trim()))
        })
    }
}

/// Request shape resolved from structured identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Free-text endpoint: `GET {base}/{reference}?translation={id}`.
    Passage {
        reference: String,
        translation: String,
    },
    /// Structured data endpoint: `GET {data}/{translation}/{book}/{chapter}`.
    Chapter {
        translation: String,
        book: String,
        chapter: u32,
    },
}

impl Lookup {
    /// Resolve a `(translation, book, chapter, verse?)` tuple.
    ///
    /// Single-chapter books (Obadiah, Philemon, 2 John, 3 John, Jude) are
    /// rewritten into a verse lookup against chapter 1, using the supplied
    /// verse when present and the chapter number otherwise.
    pub fn resolve(
        translation: &str,
        book: &str,
        chapter: &str,
        verse: Option<&str>,
    ) -> BibleResult<Self> {
        let translation = require_translation(translation)?.id.to_string();
        let book_id = validate_book_id(book)?;
        let chapter = parse_positive(chapter, "chapter")?;
        let verse = verse.map(|v| parse_positive(v, "verse")).transpose()?;

        if is_single_chapter(book_id) {
            let verse = verse.unwrap_or(chapter);
            return Ok(Self::Passage {
                reference: VerseReference::verse(book_id, 1, verse).to_string(),
                translation,
            });
        }

        // validate_book_id only returns catalog ids
        let chapters = find_book(book_id).map(|b| b.chapters).unwrap_or(u32::MAX);
        if chapter > chapters {
            return Err(BibleError::validation(format!(
                "{book_id} has {chapters} chapters, got chapter {chapter}"
            )));
        }

        Ok(match verse {
            Some(verse) => Self::Passage {
                reference: VerseReference::verse(book_id, chapter, verse).to_string(),
                translation,
            },
            None => Self::Chapter {
                translation,
                book: book_id.to_string(),
                chapter,
            },
        })
    }

    /// Whether the response should be rendered as a chapter.
    pub fn is_chapter(&self) -> bool {
        matches!(self, Self::Chapter { .. })
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passage {
                reference,
                translation,
            } => write!(f, "{reference} ({translation})"),
            Self::Chapter {
                translation,
                book,
                chapter,
            } => write!(f, "{book} {chapter} ({translation})"),
        }
    }
}

/// Check a structured book identifier and return its canonical catalog id.
pub fn validate_book_id(book: &str) -> BibleResult<&'static str> {
    let book = book.trim();
    if !BOOK_ID_RE.is_match(book) {
        return Err(BibleError::validation(format!(
            "unrecognised book identifier format: {book:?}"
        )));
    }
    find_book(book)
        .map(|b| b.id)
        .ok_or_else(|| BibleError::unknown_book(book.to_ascii_uppercase()))
}

fn parse_positive(raw: &str, field: &str) -> BibleResult<u32> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(BibleError::validation(format!(
            "{field} must be a positive integer, got {raw:?}"
        ))),
    }
}

fn parse_spans(raw: &str) -> BibleResult<Vec<VerseSpan>> {
    raw.split(',')
        .map(|part| {
            let part = part.trim();
            let span = match part.split_once('-') {
                Some((start, end)) => VerseSpan {
                    start: parse_positive(start, "verse")?,
                    end: parse_positive(end, "verse")?,
                },
                None => VerseSpan::single(parse_positive(part, "verse")?),
            };
            if span.end < span.start {
                return Err(BibleError::validation(format!(
                    "verse range {part} runs backwards"
                )));
            }
            Ok(span)
        })
        .collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
