// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Static catalog of the 66 canonical books.
//!
//! Book ids follow the USFM three-character convention used by the upstream
//! data endpoint (`GEN`, `JHN`, `1CO`, ...).

use std::fmt;

/// One of the two major divisions of the canon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Testament {
    /// Old Testament.
    Old,
    /// New Testament.
    New,
}

impl Testament {
    /// Short code used by callers ("OT" / "NT").
    pub fn code(&self) -> &'static str {
        match self {
            Self::Old => "OT",
            Self::New => "NT",
        }
    }
}

impl fmt::Display for Testament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Descriptor for a single book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookDescriptor {
    /// USFM id, e.g. "JHN".
    pub id: &'static str,
    /// Display name as upstream renders it, e.g. "John".
    pub name: &'static str,
    pub testament: Testament,
    /// Number of chapters in the book.
    pub chapters: u32,
}

impl BookDescriptor {
    /// Whether the book is addressed upstream by verse number alone.
    pub fn is_single_chapter(&self) -> bool {
        is_single_chapter(self.id)
    }
}

/// Ids of the books that only have one chapter.
pub const SINGLE_CHAPTER_BOOKS: [&str; 5] = ["OBA", "PHM", "2JN", "3JN", "JUD"];

const fn book(
    id: &'static str,
    name: &'static str,
    testament: Testament,
    chapters: u32,
) -> BookDescriptor {
    BookDescriptor {
        id,
        name,
        testament,
        chapters,
    }
}

use Testament::{New as NT, Old as OT};

/// All books in canonical order.
pub static BOOKS: [BookDescriptor; 66] = [
    book("GEN", "Genesis", OT, 50),
    book("EXO", "Exodus", OT, 40),
    book("LEV", "Leviticus", OT, 27),
    book("NUM", "Numbers", OT, 36),
    book("DEU", "Deuteronomy", OT, 34),
    book("JOS", "Joshua", OT, 24),
    book("JDG", "Judges", OT, 21),
    book("RUT", "Ruth", OT, 4),
    book("1SA", "1 Samuel", OT, 31),
    book("2SA", "2 Samuel", OT, 24),
    book("1KI", "1 Kings", OT, 22),
    book("2KI", "2 Kings", OT, 25),
    book("1CH", "1 Chronicles", OT, 29),
    book("2CH", "2 Chronicles", OT, 36),
    book("EZR", "Ezra", OT, 10),
    book("NEH", "Nehemiah", OT, 13),
    book("EST", "Esther", OT, 10),
    book("JOB", "Job", OT, 42),
    book("PSA", "Psalms", OT, 150),
    book("PRO", "Proverbs", OT, 31),
    book("ECC", "Ecclesiastes", OT, 12),
    book("SNG", "Song of Solomon", OT, 8),
    book("ISA", "Isaiah", OT, 66),
    book("JER", "Jeremiah", OT, 52),
    book("LAM", "Lamentations", OT, 5),
    book("EZK", "Ezekiel", OT, 48),
    book("DAN", "Daniel", OT, 12),
    book("HOS", "Hosea", OT, 14),
    book("JOL", "Joel", OT, 3),
    book("AMO", "Amos", OT, 9),
    book("OBA", "Obadiah", OT, 1),
    book("JON", "Jonah", OT, 4),
    book("MIC", "Micah", OT, 7),
    book("NAM", "Nahum", OT, 3),
    book("HAB", "Habakkuk", OT, 3),
    book("ZEP", "Zephaniah", OT, 3),
    book("HAG", "Haggai", OT, 2),
    book("ZEC", "Zechariah", OT, 14),
    book("MAL", "Malachi", OT, 4),
    book("MAT", "Matthew", NT, 28),
    book("MRK", "Mark", NT, 16),
    book("LUK", "Luke", NT, 24),
    book("JHN", "John", NT, 21),
    book("ACT", "Acts", NT, 28),
    book("ROM", "Romans", NT, 16),
    book("1CO", "1 Corinthians", NT, 16),
    book("2CO", "2 Corinthians", NT, 13),
    book("GAL", "Galatians", NT, 6),
    book("EPH", "Ephesians", NT, 6),
    book("PHP", "Philippians", NT, 4),
    book("COL", "Colossians", NT, 4),
    book("1TH", "1 Thessalonians", NT, 5),
    book("2TH", "2 Thessalonians", NT, 3),
    book("1TI", "1 Timothy", NT, 6),
    book("2TI", "2 Timothy", NT, 4),
    book("TIT", "Titus", NT, 3),
    book("PHM", "Philemon", NT, 1),
    book("HEB", "Hebrews", NT, 13),
    book("JAS", "James", NT, 5),
    book("1PE", "1 Peter", NT, 5),
    book("2PE", "2 Peter", NT, 3),
    book("1JN", "1 John", NT, 5),
    book("2JN", "2 John", NT, 1),
    book("3JN", "3 John", NT, 1),
    book("JUD", "Jude", NT, 1),
    book("REV", "Revelation", NT, 22),
];

/// Find a book by USFM id or display name, ignoring case and surrounding whitespace.
pub fn find_book(query: &str) -> Option<&'static BookDescriptor> {
    let query = query.trim();
    BOOKS
        .iter()
        .find(|b| b.id.eq_ignore_ascii_case(query) || b.name.eq_ignore_ascii_case(query))
}

/// Check whether `book` (id or name, any case) is one of the single-chapter books.
pub fn is_single_chapter(book: &str) -> bool {
    let book = book.trim();
    SINGLE_CHAPTER_BOOKS.iter().any(|id| {
        id.eq_ignore_ascii_case(book)
            || find_book(id).is_some_and(|b| b.name.eq_ignore_ascii_case(book))
    })
}

/// Iterate the books of one testament.
pub fn books_in(testament: Testament) -> impl Iterator<Item = &'static BookDescriptor> {
    BOOKS.iter().filter(move |b| b.testament == testament)
}
