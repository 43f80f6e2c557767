//! Analyzers turn raw text into the terms stored in, and looked up from, the
//! search index.

use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer};
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> TokenStream;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Collect the token texts produced by [`analyze`](Self::analyze).
    fn terms(&self, text: &str) -> Vec<String> {
        self.analyze(text).map(|token| token.text).collect()
    }
}

/// The analyzer used for verse text and search queries.
///
/// Lowercases the whole input first and then extracts maximal runs of word
/// characters and apostrophes. Offsets in the emitted tokens refer to the
/// lowercased text.
///
/// # Examples
///
/// ```
/// use scripture::analysis::analyzer::{Analyzer, VerseAnalyzer};
///
/// let analyzer = VerseAnalyzer::new().unwrap();
/// assert_eq!(
///     analyzer.terms("And God said, Let there be Light."),
///     vec!["and", "god", "said", "let", "there", "be", "light"]
/// );
/// ```
#[derive(Clone)]
pub struct VerseAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
}

impl VerseAnalyzer {
    /// Create a verse analyzer backed by the default word tokenizer.
    pub fn new() -> Result<Self> {
        Ok(Self::with_tokenizer(Arc::new(RegexTokenizer::new()?)))
    }

    /// Create a verse analyzer backed by a custom tokenizer.
    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenizer>) -> Self {
        VerseAnalyzer { tokenizer }
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }
}

impl Default for VerseAnalyzer {
    fn default() -> Self {
        Self::with_tokenizer(Arc::new(RegexTokenizer::default()))
    }
}

impl Analyzer for VerseAnalyzer {
    fn analyze(&self, text: &str) -> TokenStream {
        self.tokenizer.tokenize(&text.to_lowercase())
    }

    fn name(&self) -> &'static str {
        "verse"
    }
}

impl std::fmt::Debug for VerseAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerseAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        let analyzer = VerseAnalyzer::new().unwrap();
        assert_eq!(analyzer.terms("Light"), analyzer.terms("light"));
        assert_eq!(analyzer.terms("LIGHT"), vec!["light"]);
    }

    #[test]
    fn test_idempotent() {
        let analyzer = VerseAnalyzer::new().unwrap();
        let text = "Blessed are the poor in spirit: for their's is the kingdom of heaven.";
        assert_eq!(analyzer.terms(text), analyzer.terms(text));
    }

    #[test]
    fn test_separators_are_discarded() {
        let analyzer = VerseAnalyzer::new().unwrap();
        assert_eq!(
            analyzer.terms("Jesus wept.\tAnd—the  Jews"),
            vec!["jesus", "wept", "and", "the", "jews"]
        );
        assert!(analyzer.terms("... ,;: !").is_empty());
    }

    #[test]
    fn test_underscores_and_digits_are_word_characters() {
        let analyzer = VerseAnalyzer::new().unwrap();
        assert_eq!(analyzer.terms("foo_bar 144000"), vec!["foo_bar", "144000"]);
    }

    #[test]
    fn test_analyzer_name() {
        assert_eq!(VerseAnalyzer::default().name(), "verse");
    }
}
