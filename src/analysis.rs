//! Text analysis for scripture search.
//!
//! Verse text and incoming queries both pass through the same [`Analyzer`],
//! so the vocabulary stored in the index and the vocabulary of a query are
//! always aligned.

pub mod analyzer;
pub mod token;
pub mod tokenizer;

pub use analyzer::{Analyzer, VerseAnalyzer};
pub use token::{Token, TokenStream};
pub use tokenizer::{RegexTokenizer, Tokenizer};
