//! Response shapes handed to the serving layer.

use serde::{Deserialize, Serialize};

use crate::corpus::{BookSummary, Verse};

/// `{translations: [...]}`, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationList {
    pub translations: Vec<String>,
}

/// Books of one translation in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookList {
    pub translation: String,
    pub books: Vec<BookSummary>,
}

/// A verse as `{v, t}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseView {
    pub v: u32,
    pub t: String,
}

impl From<&Verse> for VerseView {
    fn from(verse: &Verse) -> Self {
        VerseView {
            v: verse.number,
            t: verse.text.clone(),
        }
    }
}

/// One chapter with its book summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterView {
    pub translation: String,
    pub book: BookSummary,
    pub chapter: u32,
    pub verses: Vec<VerseView>,
}

/// One search match with its snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub book_id: String,
    pub book_name: String,
    pub chapter: u32,
    pub verse: u32,
    pub snippet: String,
}

/// Search results for one translation and query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub translation: String,
    pub query: String,
    pub results: Vec<SearchHit>,
}
