//! Document sources and load diagnostics.
//!
//! A [`DocumentSource`] turns a directory of documents into a [`Corpus`].
//! Per-file failures never abort a load: the offending file is recorded in
//! the [`LoadReport`] and the remaining files are still processed.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, Translation};
use crate::error::{Result, ScriptureError};

/// What to do when two ids collide during a load.
///
/// Applies to translation ids across files and to book ids within a single
/// file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// The later document (in visit order) replaces the earlier one.
    #[default]
    Overwrite,
    /// The later document is skipped and reported.
    Reject,
}

/// A source of scripture documents.
///
/// Implementations decide which files they read and how they parse them;
/// the search index only ever sees the resulting [`Corpus`].
pub trait DocumentSource: Send + Sync {
    /// Load every document found in `directory`.
    ///
    /// Fails only when the directory itself cannot be read. Individual
    /// documents that fail to parse are listed in
    /// [`LoadReport::skipped`].
    fn ingest(&self, directory: &Path) -> Result<LoadOutcome>;

    /// Get the name of this source (for debugging and logging).
    fn name(&self) -> &'static str;
}

/// List the regular files in `directory` with the given extension, sorted by
/// file name.
pub fn discover_files(directory: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// A document that contributed a translation to the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub translation_id: String,
    pub books: usize,
    pub verses: usize,
    /// Set when a later file with the same translation id replaced this one.
    pub replaced: bool,
}

/// A document that was left out of the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Diagnostics for one load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    pub loaded_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub loaded: Vec<LoadedFile>,
    pub skipped: Vec<SkippedFile>,
    pub translations: usize,
    pub books: usize,
    pub verses: usize,
}

impl LoadReport {
    fn new() -> Self {
        LoadReport {
            loaded_at: Utc::now(),
            duration_ms: 0,
            loaded: Vec::new(),
            skipped: Vec::new(),
            translations: 0,
            books: 0,
            verses: 0,
        }
    }

    /// Whether any document was skipped.
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// The corpus built by a load together with its diagnostics.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub corpus: Corpus,
    pub report: LoadReport,
}

/// Merge per-file parse results, in visit order, into a corpus.
///
/// `parsed` must already be in visit order; on a translation id collision
/// the policy decides whether the later file wins or is skipped.
pub fn assemble<I>(parsed: I, policy: CollisionPolicy) -> LoadOutcome
where
    I: IntoIterator<Item = (PathBuf, Result<Translation>)>,
{
    let mut corpus = Corpus::new();
    let mut report = LoadReport::new();

    for (path, result) in parsed {
        let translation = match result {
            Ok(translation) => translation,
            Err(e) => {
                warn!("Skipping {}: {e}", path.display());
                report.skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if corpus.contains(&translation.id) {
            match policy {
                CollisionPolicy::Reject => {
                    let e = ScriptureError::DuplicateTranslation(translation.id.clone());
                    warn!("Skipping {}: {e}", path.display());
                    report.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                    continue;
                }
                CollisionPolicy::Overwrite => {
                    warn!(
                        "{} replaces earlier translation '{}'",
                        path.display(),
                        translation.id
                    );
                    for earlier in report
                        .loaded
                        .iter_mut()
                        .filter(|f| f.translation_id == translation.id)
                    {
                        earlier.replaced = true;
                    }
                }
            }
        }

        debug!(
            "Loaded translation '{}' from {} ({} books)",
            translation.id,
            path.display(),
            translation.books.len()
        );
        report.loaded.push(LoadedFile {
            path,
            translation_id: translation.id.clone(),
            books: translation.books.len(),
            verses: translation.verse_count(),
            replaced: false,
        });
        corpus.insert(translation);
    }

    report.translations = corpus.len();
    report.books = corpus.book_count();
    report.verses = corpus.verse_count();

    LoadOutcome { corpus, report }
}
