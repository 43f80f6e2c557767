//! # Scripture
//!
//! Loading and searching of multi-translation Bible corpora.
//!
//! ## Features
//!
//! - Zefania XML ingestion with lenient, policy-driven id inference
//! - In-memory inverted index with conjunctive exact-token queries
//! - Bounded, ellipsis-marked snippets around matches
//! - Atomic snapshot reloads behind a read-mostly store
//!
//! ```no_run
//! use scripture::config::ScriptureConfig;
//! use scripture::store::CorpusStore;
//!
//! let store = CorpusStore::new(&ScriptureConfig::default());
//! store.ensure_loaded()?;
//! for hit in store.search("KJV", "beginning", 10)?.results {
//!     println!("{} {}:{} {}", hit.book_id, hit.chapter, hit.verse, hit.snippet);
//! }
//! # Ok::<(), scripture::error::ScriptureError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod document;
pub mod error;
pub mod search;
pub mod store;

pub mod prelude {
    pub use crate::config::ScriptureConfig;
    pub use crate::corpus::{Book, Chapter, Corpus, Translation, Verse};
    pub use crate::document::{CollisionPolicy, DocumentSource, ZefaniaSource};
    pub use crate::error::{Result, ScriptureError};
    pub use crate::search::{SearchEntry, SearchIndex};
    pub use crate::store::CorpusStore;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
