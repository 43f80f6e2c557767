//! Configuration for loading and serving a scripture corpus.
//!
//! Every field has a default, so a configuration file only needs to list
//! what it changes:
//!
//! ```json
//! { "data_dir": "/srv/bibles", "collision_policy": "reject" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::document::source::CollisionPolicy;
use crate::error::{Result, ScriptureError};
use crate::search::snippet::DEFAULT_WINDOW;

/// Settings for the loader, the search index and the serving layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptureConfig {
    /// Directory scanned for documents.
    pub data_dir: PathBuf,

    /// Extension (without the dot) of the files to load.
    pub extension: String,

    /// How colliding translation and book ids are resolved.
    pub collision_policy: CollisionPolicy,

    /// Parse documents in parallel.
    pub parallel_parse: bool,

    /// Snippet window in characters.
    pub snippet_window: usize,

    /// Result limit used when a search does not give one.
    pub default_limit: usize,

    /// Largest result limit a search may ask for.
    pub max_limit: usize,

    /// Shortest raw query accepted, in characters.
    pub min_query_len: usize,
}

impl Default for ScriptureConfig {
    fn default() -> Self {
        ScriptureConfig {
            data_dir: PathBuf::from("data"),
            extension: "xml".to_string(),
            collision_policy: CollisionPolicy::Overwrite,
            parallel_parse: true,
            snippet_window: DEFAULT_WINDOW,
            default_limit: 50,
            max_limit: 200,
            min_query_len: 1,
        }
    }
}

impl ScriptureConfig {
    /// Create a new builder for ScriptureConfig.
    pub fn builder() -> ScriptureConfigBuilder {
        ScriptureConfigBuilder::new()
    }

    /// Read a JSON configuration file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: ScriptureConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings are usable together.
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() {
            return Err(ScriptureError::config("extension must not be empty"));
        }
        if self.snippet_window == 0 {
            return Err(ScriptureError::config("snippet_window must be positive"));
        }
        if self.default_limit == 0 || self.max_limit == 0 {
            return Err(ScriptureError::config("limits must be positive"));
        }
        if self.default_limit > self.max_limit {
            return Err(ScriptureError::config(format!(
                "default_limit ({}) exceeds max_limit ({})",
                self.default_limit, self.max_limit
            )));
        }
        Ok(())
    }
}

/// Builder for ScriptureConfig.
///
/// ```
/// use scripture::config::ScriptureConfig;
/// use scripture::document::CollisionPolicy;
///
/// let config = ScriptureConfig::builder()
///     .data_dir("/srv/bibles")
///     .collision_policy(CollisionPolicy::Reject)
///     .snippet_window(80)
///     .build()
///     .unwrap();
/// assert_eq!(config.snippet_window, 80);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptureConfigBuilder {
    config: ScriptureConfig,
}

impl ScriptureConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data_dir<P: Into<PathBuf>>(mut self, data_dir: P) -> Self {
        self.config.data_dir = data_dir.into();
        self
    }

    pub fn extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.config.extension = extension.into();
        self
    }

    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.config.collision_policy = policy;
        self
    }

    pub fn parallel_parse(mut self, parallel: bool) -> Self {
        self.config.parallel_parse = parallel;
        self
    }

    pub fn snippet_window(mut self, window: usize) -> Self {
        self.config.snippet_window = window;
        self
    }

    pub fn default_limit(mut self, limit: usize) -> Self {
        self.config.default_limit = limit;
        self
    }

    pub fn max_limit(mut self, limit: usize) -> Self {
        self.config.max_limit = limit;
        self
    }

    pub fn min_query_len(mut self, len: usize) -> Self {
        self.config.min_query_len = len;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<ScriptureConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
