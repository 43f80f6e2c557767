//! Denormalized verse records stored by the search index.

use serde::{Deserialize, Serialize};

/// Position of an entry in the index: its 0-based insertion order.
pub type EntryId = usize;

/// One indexed verse, carrying everything needed to display a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub translation: String,
    pub book_id: String,
    pub book_name: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

impl SearchEntry {
    pub fn new<T, I, N, X>(translation: T, book_id: I, book_name: N, chapter: u32, verse: u32, text: X) -> Self
    where
        T: Into<String>,
        I: Into<String>,
        N: Into<String>,
        X: Into<String>,
    {
        SearchEntry {
            translation: translation.into(),
            book_id: book_id.into(),
            book_name: book_name.into(),
            chapter,
            verse,
            text: text.into(),
        }
    }

    /// `(book id, chapter, verse)` of this entry.
    pub fn reference(&self) -> (&str, u32, u32) {
        (&self.book_id, self.chapter, self.verse)
    }
}
