//! In-memory inverted index with conjunctive (AND) token queries.
//!
//! Every token maps to the set of entry ids whose text contains it. A query
//! matches an entry only when the entry contains every token of the query.
//! Results are always returned in ascending entry id order, which is the
//! order the corpus was walked when the index was built.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, VerseAnalyzer};
use crate::corpus::Corpus;
use crate::search::entry::{EntryId, SearchEntry};

/// Size figures for a built index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of indexed entries.
    pub entries: usize,
    /// Number of distinct tokens.
    pub tokens: usize,
    /// Sum of all postings set sizes.
    pub postings: usize,
}

/// Token → entry id index over verse text.
///
/// # Examples
///
/// ```
/// use scripture::search::{SearchEntry, SearchIndex};
///
/// let mut index = SearchIndex::new();
/// index.add_entry(SearchEntry::new("KJV", "GEN", "Genesis", 1, 3, "And God said, Let there be light"));
/// index.add_entry(SearchEntry::new("KJV", "JOH", "John", 8, 12, "I am the light of the world"));
///
/// let hits = index.search("KJV", "LIGHT world", 10);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].book_id, "JOH");
/// ```
pub struct SearchIndex {
    analyzer: Arc<dyn Analyzer>,
    entries: Vec<SearchEntry>,
    postings: AHashMap<String, AHashSet<EntryId>>,
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex")
            .field("analyzer", &self.analyzer.name())
            .field("entries", &self.entries.len())
            .field("tokens", &self.postings.len())
            .finish()
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchIndex {
    /// Create an empty index using the [`VerseAnalyzer`].
    pub fn new() -> Self {
        Self::with_analyzer(Arc::new(VerseAnalyzer::default()))
    }

    /// Create an empty index with a custom analyzer.
    ///
    /// The same analyzer is applied to indexed text and to queries.
    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> Self {
        SearchIndex {
            analyzer,
            entries: Vec::new(),
            postings: AHashMap::new(),
        }
    }

    /// Build an index over every verse of a corpus.
    ///
    /// Entries are added translation by translation, then book, chapter and
    /// verse, each in corpus order.
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let mut index = Self::new();
        index.add_corpus(corpus);
        index
    }

    /// Add every verse of a corpus, in corpus order.
    pub fn add_corpus(&mut self, corpus: &Corpus) {
        for translation in corpus.iter() {
            for book in translation.books.values() {
                for chapter in book.chapters.values() {
                    for verse in &chapter.verses {
                        self.add_entry(SearchEntry::new(
                            translation.id.as_str(),
                            book.id.as_str(),
                            book.name.as_str(),
                            chapter.number,
                            verse.number,
                            verse.text.as_str(),
                        ));
                    }
                }
            }
        }
        debug!(
            "Indexed {} entries with {} distinct tokens",
            self.entries.len(),
            self.postings.len()
        );
    }

    /// Append an entry and index its tokens.
    ///
    /// The entry id is the number of entries already present.
    pub fn add_entry(&mut self, entry: SearchEntry) -> EntryId {
        let entry_id = self.entries.len();
        for token in self.analyzer.analyze(&entry.text) {
            self.postings.entry(token.text).or_default().insert(entry_id);
        }
        self.entries.push(entry);
        entry_id
    }

    /// Ids of every entry containing all query tokens, in ascending order,
    /// regardless of translation.
    pub fn matching_ids(&self, query: &str) -> Vec<EntryId> {
        let mut tokens = self.analyzer.terms(query);
        if tokens.is_empty() {
            return Vec::new();
        }
        let mut seen = AHashSet::new();
        tokens.retain(|token| seen.insert(token.clone()));

        let mut sets = Vec::with_capacity(tokens.len());
        for token in &tokens {
            match self.postings.get(token) {
                Some(ids) if !ids.is_empty() => sets.push(ids),
                _ => return Vec::new(),
            }
        }

        // Intersecting from the smallest set keeps the running set small.
        sets.sort_by_key(|ids| ids.len());
        let mut matching: AHashSet<EntryId> = sets[0].clone();
        for ids in &sets[1..] {
            matching.retain(|id| ids.contains(id));
            if matching.is_empty() {
                return Vec::new();
            }
        }

        let mut ids: Vec<EntryId> = matching.into_iter().collect();
        ids.sort_unstable();
        ids
    }

    /// Entries of `translation_id` containing every token of `query`, in
    /// ascending entry id order, at most `limit` of them.
    ///
    /// A query without tokens matches nothing.
    pub fn search(&self, translation_id: &str, query: &str, limit: usize) -> Vec<&SearchEntry> {
        if limit == 0 {
            return Vec::new();
        }
        let candidates = self.matching_ids(query);
        let results: Vec<&SearchEntry> = candidates
            .iter()
            .map(|&id| &self.entries[id])
            .filter(|entry| entry.translation == translation_id)
            .take(limit)
            .collect();
        debug!(
            "Query {:?} in '{}': {} candidate(s), {} returned",
            query,
            translation_id,
            candidates.len(),
            results.len()
        );
        results
    }

    /// Get an entry by id.
    pub fn entry(&self, id: EntryId) -> Option<&SearchEntry> {
        self.entries.get(id)
    }

    /// Postings set of a token, if the token occurs anywhere.
    pub fn postings(&self, token: &str) -> Option<&AHashSet<EntryId>> {
        self.postings.get(token)
    }

    /// Get the analyzer shared by indexing and querying.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            entries: self.entries.len(),
            tokens: self.postings.len(),
            postings: self.postings.values().map(|ids| ids.len()).sum(),
        }
    }
}
