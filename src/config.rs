//! File based checker configuration
//!
//! A [`CheckerConfig`] is the serializable twin of [`SequenceCheckerBuilder`].
//! It is read from JSON and every field is optional:
//!
//! ```json
//! {
//!   "start": 1,
//!   "end": 250,
//!   "recursive": true,
//!   "exclude": "\\.tmp$",
//!   "pattern": "(?P<bare>[a-z]+)_(?P<index>\\d+)",
//!   "template": "{bare}_{index}"
//! }
//! ```
//!
//! Unknown keys and mistyped values are rejected as configuration errors.

use crate::checker::{SequenceChecker, SequenceCheckerBuilder};
use crate::error::{Result, SeqError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Checker settings as stored in a configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfig {
    /// Lower bound of the index window, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// Upper bound of the index window, exclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    /// Scan subdirectories
    pub recursive: bool,
    /// Key the report by absolute directory paths
    pub full_paths: bool,
    /// Follow symbolic links while walking
    pub follow_symlinks: bool,
    /// Only consider paths matching this regex
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    /// Skip paths matching this regex
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    /// Custom split pattern
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Template for names split by `pattern`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Replacement for the platform list of ignored file names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_excludes: Option<Vec<String>>,
}

impl CheckerConfig {
    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SeqError::config(format!("invalid configuration: {}", e)))
    }

    /// Read and parse a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {:?}", path);
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialize back to pretty printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SeqError::config(e.to_string()))
    }

    /// Builder preloaded with these settings
    ///
    /// Further builder calls override what the file said.
    pub fn into_builder(self) -> SequenceCheckerBuilder {
        let mut builder = SequenceChecker::builder()
            .range(self.start, self.end)
            .recursive(self.recursive)
            .full_paths(self.full_paths)
            .follow_symlinks(self.follow_symlinks);
        if let Some(include) = self.include {
            builder = builder.include_pattern(include);
        }
        if let Some(exclude) = self.exclude {
            builder = builder.exclude_pattern(exclude);
        }
        if let Some(pattern) = self.pattern {
            builder = builder.pattern(pattern);
        }
        if let Some(template) = self.template {
            builder = builder.template(template);
        }
        if let Some(names) = self.file_excludes {
            builder = builder.file_excludes(names);
        }
        builder
    }
}
