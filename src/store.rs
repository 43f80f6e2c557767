//! The corpus store: one published corpus and search index at a time.
//!
//! A load builds a fresh [`Snapshot`] off to the side and publishes it by
//! swapping a single pointer, so readers see either the previous corpus and
//! index or the new pair, never a mix and never a partially built index. A
//! failed load leaves the published snapshot untouched.
//!
//! Readers take an `Arc<Snapshot>` and query it without holding any lock.

pub mod view;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;
use parking_lot::{Mutex, RwLock};

use crate::config::ScriptureConfig;
use crate::corpus::{Corpus, Translation};
use crate::document::source::{DocumentSource, LoadReport};
use crate::document::zefania::ZefaniaSource;
use crate::error::{Result, ScriptureError};
use crate::search::index::SearchIndex;
use crate::search::snippet::make_snippet;

pub use self::view::{BookList, ChapterView, SearchHit, SearchResponse, TranslationList, VerseView};

/// A corpus and the index built from it, published together.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub corpus: Corpus,
    pub index: SearchIndex,
    /// Diagnostics of the load that built this snapshot; `None` before the
    /// first load.
    pub report: Option<LoadReport>,
}

impl Snapshot {
    /// Build a snapshot from a finished corpus.
    pub fn build(corpus: Corpus, report: Option<LoadReport>) -> Self {
        let index = SearchIndex::from_corpus(&corpus);
        Snapshot {
            corpus,
            index,
            report,
        }
    }

    /// Whether this snapshot came from a load.
    pub fn is_loaded(&self) -> bool {
        self.report.is_some()
    }

    fn translation(&self, id: &str) -> Result<&Translation> {
        self.corpus
            .translation(id)
            .ok_or_else(|| ScriptureError::not_found("Translation not found"))
    }
}

/// Owned handle to the published corpus and index.
pub struct CorpusStore {
    source: Box<dyn DocumentSource>,
    data_dir: PathBuf,
    snippet_window: usize,
    current: RwLock<Arc<Snapshot>>,
    reloading: Mutex<()>,
}

impl std::fmt::Debug for CorpusStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorpusStore")
            .field("source", &self.source.name())
            .field("data_dir", &self.data_dir)
            .field("snippet_window", &self.snippet_window)
            .finish()
    }
}

impl CorpusStore {
    /// Create an empty store reading Zefania documents as configured.
    pub fn new(config: &ScriptureConfig) -> Self {
        Self::with_source(
            Box::new(ZefaniaSource::from_config(config)),
            config.data_dir.clone(),
            config.snippet_window,
        )
    }

    /// Create an empty store over any document source.
    pub fn with_source<P: Into<PathBuf>>(
        source: Box<dyn DocumentSource>,
        data_dir: P,
        snippet_window: usize,
    ) -> Self {
        CorpusStore {
            source,
            data_dir: data_dir.into(),
            snippet_window,
            current: RwLock::new(Arc::new(Snapshot::default())),
            reloading: Mutex::new(()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Rebuild the corpus and index from the data directory and publish them.
    ///
    /// Concurrent reloads run one after another. On error the previously
    /// published snapshot stays in place.
    pub fn reload(&self) -> Result<LoadReport> {
        let _guard = self.reloading.lock();
        self.load_and_publish()
    }

    /// Load once if nothing has been published yet.
    pub fn ensure_loaded(&self) -> Result<()> {
        if self.snapshot().is_loaded() {
            return Ok(());
        }
        let _guard = self.reloading.lock();
        // Another caller may have published while we waited for the lock.
        if !self.snapshot().is_loaded() {
            self.load_and_publish()?;
        }
        Ok(())
    }

    fn load_and_publish(&self) -> Result<LoadReport> {
        info!("Loading translations from {}", self.data_dir.display());

        let outcome = self.source.ingest(&self.data_dir)?;
        let report = outcome.report.clone();
        let snapshot = Snapshot::build(outcome.corpus, Some(outcome.report));
        info!(
            "Loaded {} translation(s); {} entries indexed",
            snapshot.corpus.len(),
            snapshot.index.len()
        );

        *self.current.write() = Arc::new(snapshot);
        Ok(report)
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read())
    }

    /// Sorted ids of all loaded translations.
    pub fn translations(&self) -> TranslationList {
        TranslationList {
            translations: self.snapshot().corpus.translation_ids(),
        }
    }

    /// Books of a translation with their chapter counts.
    pub fn books(&self, translation_id: &str) -> Result<BookList> {
        let snapshot = self.snapshot();
        let translation = snapshot.translation(translation_id)?;
        Ok(BookList {
            translation: translation.id.clone(),
            books: translation.books.values().map(|b| b.summary()).collect(),
        })
    }

    /// All verses of one chapter.
    pub fn chapter(&self, translation_id: &str, book_id: &str, chapter: u32) -> Result<ChapterView> {
        let snapshot = self.snapshot();
        let translation = snapshot.translation(translation_id)?;
        let book = translation
            .book(book_id)
            .ok_or_else(|| ScriptureError::not_found("Book not found"))?;
        let found = book
            .chapter(chapter)
            .ok_or_else(|| ScriptureError::not_found("Chapter not found"))?;

        Ok(ChapterView {
            translation: translation.id.clone(),
            book: book.summary(),
            chapter: found.number,
            verses: found.verses.iter().map(VerseView::from).collect(),
        })
    }

    /// Search one translation and attach a snippet to every match.
    pub fn search(&self, translation_id: &str, query: &str, limit: usize) -> Result<SearchResponse> {
        let snapshot = self.snapshot();
        snapshot.translation(translation_id)?;

        let results = snapshot
            .index
            .search(translation_id, query, limit)
            .into_iter()
            .map(|entry| SearchHit {
                book_id: entry.book_id.clone(),
                book_name: entry.book_name.clone(),
                chapter: entry.chapter,
                verse: entry.verse,
                snippet: make_snippet(entry, query, self.snippet_window),
            })
            .collect();

        Ok(SearchResponse {
            translation: translation_id.to_string(),
            query: query.to_string(),
            results,
        })
    }
}
