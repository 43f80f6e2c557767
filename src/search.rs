//! Exact-token search over verse text.
//!
//! The [`SearchIndex`] keeps its own denormalized copy of every verse as a
//! [`SearchEntry`], so it can outlive the corpus it was built from. Matches
//! are turned into display fragments with [`make_snippet`].

pub mod entry;
pub mod index;
pub mod snippet;

pub use self::entry::{EntryId, SearchEntry};
pub use self::index::{IndexStats, SearchIndex};
pub use self::snippet::{DEFAULT_WINDOW, ELLIPSIS, make_snippet, snippet};
