//! Error types for the scripture library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`ScriptureError`] enum. Lookups that can legitimately miss (unknown
//! translation, book or chapter) return `Option` instead; the serving layer
//! converts absence into [`ScriptureError::NotFound`] when it needs to.
//!
//! # Examples
//!
//! ```
//! use scripture::error::{Result, ScriptureError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ScriptureError::invalid_argument("limit must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for scripture operations.
#[derive(Error, Debug)]
pub enum ScriptureError {
    /// I/O errors (directory scans, file reads)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Markup that could not be parsed
    #[error("XML error: {0}")]
    Xml(String),

    /// A document parsed but violated the expected structure
    #[error("Document error: {0}")]
    Document(String),

    /// Two documents resolved to the same translation id
    #[error("Duplicate translation id: {0}")]
    DuplicateTranslation(String),

    /// One document declared the same book id twice
    #[error("Duplicate book id: {0}")]
    DuplicateBook(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis-related errors (tokenizer construction)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Rejected caller input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A translation, book or chapter that does not exist
    #[error("{0}")]
    NotFound(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with ScriptureError.
pub type Result<T> = std::result::Result<T, ScriptureError>;

impl ScriptureError {
    /// Create a new XML error.
    pub fn xml<S: Into<String>>(msg: S) -> Self {
        ScriptureError::Xml(msg.into())
    }

    /// Create a new document error.
    pub fn document<S: Into<String>>(msg: S) -> Self {
        ScriptureError::Document(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ScriptureError::Config(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        ScriptureError::Analysis(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ScriptureError::InvalidArgument(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        ScriptureError::NotFound(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ScriptureError::Other(msg.into())
    }
}
