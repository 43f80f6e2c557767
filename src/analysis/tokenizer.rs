//! Tokenizers that split text into tokens.
//!
//! # Examples
//!
//! ```
//! use scripture::analysis::tokenizer::{RegexTokenizer, Tokenizer};
//!
//! let tokenizer = RegexTokenizer::new().unwrap();
//! let tokens: Vec<_> = tokenizer.tokenize("let there be light").collect();
//! assert_eq!(tokens.len(), 4);
//! ```

use std::sync::Arc;

use regex::Regex;

use crate::analysis::token::{Token, TokenStream};
use crate::error::{Result, ScriptureError};

/// Pattern for a maximal run of word characters or apostrophes.
pub const WORD_PATTERN: &str = r"[\w']+";

/// Trait for tokenizers that convert text into tokens.
///
/// Construction may fail (an invalid pattern, for instance) but tokenizing
/// never does.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> TokenStream;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// A regex-based tokenizer that emits every match of its pattern.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with [`WORD_PATTERN`].
    pub fn new() -> Result<Self> {
        Self::with_pattern(WORD_PATTERN)
    }

    /// Create a new regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| ScriptureError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for RegexTokenizer {
    fn default() -> Self {
        Self::new().expect("Default regex pattern should be valid")
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> TokenStream {
        let tokens: Vec<Token> = self
            .pattern
            .find_iter(text)
            .map(|mat| Token::new(mat.as_str()))
            .collect();

        Box::new(tokens.into_iter())
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
