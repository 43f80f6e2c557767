//! In-memory scripture corpus: translations, books, chapters and verses.
//!
//! A [`Corpus`] is built once per load by a
//! [`DocumentSource`](crate::document::source::DocumentSource) and is never
//! mutated after it has been published. Books and chapters keep the order in
//! which they first appeared in their document; translations keep the order
//! in which their files were visited.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single numbered verse with normalized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Verse number (always positive).
    pub number: u32,
    /// Whitespace-normalized, non-empty verse text.
    pub text: String,
}

impl Verse {
    pub fn new<S: Into<String>>(number: u32, text: S) -> Self {
        Verse {
            number,
            text: text.into(),
        }
    }
}

/// A numbered chapter holding its verses in parse order.
///
/// Verse numbers are positive but need not be contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub number: u32,
    pub verses: Vec<Verse>,
}

impl Chapter {
    pub fn new(number: u32, verses: Vec<Verse>) -> Self {
        Chapter { number, verses }
    }

    /// Look up a verse by number.
    pub fn verse(&self, number: u32) -> Option<&Verse> {
        self.verses.iter().find(|v| v.number == number)
    }
}

/// A book of a translation, keyed by a short id code such as `GEN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub name: String,
    pub chapters: IndexMap<u32, Chapter>,
}

impl Book {
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Self {
        Book {
            id: id.into(),
            name: name.into(),
            chapters: IndexMap::new(),
        }
    }

    /// Insert a chapter, replacing any chapter with the same number.
    ///
    /// A replaced chapter keeps its original position.
    pub fn insert_chapter(&mut self, chapter: Chapter) -> Option<Chapter> {
        self.chapters.insert(chapter.number, chapter)
    }

    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.get(&number)
    }

    pub fn chapters_count(&self) -> usize {
        self.chapters.len()
    }

    /// Summary of this book as listed by the serving layer.
    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            chapters_count: self.chapters.len(),
        }
    }
}

/// One scripture edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub id: String,
    pub name: String,
    pub books: IndexMap<String, Book>,
}

impl Translation {
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Self {
        Translation {
            id: id.into(),
            name: name.into(),
            books: IndexMap::new(),
        }
    }

    /// Insert a book, replacing any book with the same id.
    pub fn insert_book(&mut self, book: Book) -> Option<Book> {
        self.books.insert(book.id.clone(), book)
    }

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.get(id)
    }

    /// Total number of verses across all books.
    pub fn verse_count(&self) -> usize {
        self.books
            .values()
            .flat_map(|b| b.chapters.values())
            .map(|c| c.verses.len())
            .sum()
    }
}

/// Book listing shape: `{id, name, chaptersCount}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub chapters_count: usize,
}

/// The full collection of loaded translations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    translations: IndexMap<String, Translation>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a translation, returning the one it replaced.
    ///
    /// A replaced translation keeps its original position, so walking the
    /// corpus stays in first-visit order.
    pub fn insert(&mut self, translation: Translation) -> Option<Translation> {
        self.translations.insert(translation.id.clone(), translation)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.translations.contains_key(id)
    }

    pub fn translation(&self, id: &str) -> Option<&Translation> {
        self.translations.get(id)
    }

    /// Translation ids in ascending order.
    pub fn translation_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.translations.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Iterate translations in visit order.
    pub fn iter(&self) -> impl Iterator<Item = &Translation> {
        self.translations.values()
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    pub fn book_count(&self) -> usize {
        self.iter().map(|t| t.books.len()).sum()
    }

    pub fn verse_count(&self) -> usize {
        self.iter().map(Translation::verse_count).sum()
    }
}

impl IntoIterator for Corpus {
    type Item = (String, Translation);
    type IntoIter = indexmap::map::IntoIter<String, Translation>;

    fn into_iter(self) -> Self::IntoIter {
        self.translations.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genesis() -> Book {
        let mut book = Book::new("GEN", "Genesis");
        book.insert_chapter(Chapter::new(
            1,
            vec![
                Verse::new(1, "In the beginning God created the heaven and the earth."),
                Verse::new(2, "And the earth was without form, and void."),
            ],
        ));
        book.insert_chapter(Chapter::new(2, vec![Verse::new(1, "Thus the heavens and the earth were finished.")]));
        book
    }

    #[test]
    fn test_book_summary() {
        let summary = genesis().summary();
        assert_eq!(summary.id, "GEN");
        assert_eq!(summary.name, "Genesis");
        assert_eq!(summary.chapters_count, 2);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["chaptersCount"], 2);
    }

    #[test]
    fn test_lookups() {
        let mut translation = Translation::new("KJV", "King James Version");
        translation.insert_book(genesis());

        let book = translation.book("GEN").unwrap();
        assert_eq!(book.chapter(1).unwrap().verse(2).unwrap().number, 2);
        assert!(book.chapter(3).is_none());
        assert!(translation.book("EXO").is_none());
        assert_eq!(translation.verse_count(), 3);
    }

    #[test]
    fn test_replaced_translation_keeps_position() {
        let mut corpus = Corpus::new();
        corpus.insert(Translation::new("WEB", "first"));
        corpus.insert(Translation::new("ASV", "second"));
        let replaced = corpus.insert(Translation::new("WEB", "third"));

        assert_eq!(replaced.unwrap().name, "first");
        let order: Vec<&str> = corpus.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(order, vec!["third", "second"]);
        assert_eq!(corpus.translation_ids(), vec!["ASV", "WEB"]);
    }
}
