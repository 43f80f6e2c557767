//! Token types produced by tokenization.

/// A single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The text content of the token
    pub text: String,
}

impl Token {
    /// Create a new token with the given text.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Token { text: text.into() }
    }
}

/// A stream of tokens, as returned by tokenizers and analyzers.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
