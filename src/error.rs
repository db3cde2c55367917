//! Error types for the fileseq library
//!
//! Only failures that end a checker's work are represented here. A file name
//! that no grammar can split is simply left out of the record list, and an
//! index that does not parse as an integer resets the comparator; neither
//! ever surfaces as a [`SeqError`].

use std::path::PathBuf;
use thiserror::Error;

/// Type alias for Results in the fileseq library
pub type Result<T> = std::result::Result<T, SeqError>;

/// Main error type for all fileseq operations
#[derive(Debug, Error)]
pub enum SeqError {
    /// Invalid checker configuration (range, template, flags, ...)
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A user supplied regular expression failed to compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as it was handed to the regex compiler
        pattern: String,
        /// Compiler error
        #[source]
        source: regex::Error,
    },

    /// Target path (or an entry below it) does not exist
    #[error("Path not found: {0:?}")]
    NotFound(PathBuf),

    /// Target path exists but is not a directory
    #[error("Not a directory: {0:?}")]
    NotADirectory(PathBuf),

    /// I/O errors during directory inspection
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Walk directory error from walkdir crate
    #[error("Walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

impl SeqError {
    /// Create a configuration error with a custom message
    pub fn config(msg: impl Into<String>) -> Self {
        SeqError::Configuration(msg.into())
    }

    /// Create an invalid pattern error
    pub fn pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        SeqError::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Check if this error was raised while setting up a checker
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SeqError::Configuration(_) | SeqError::InvalidPattern { .. }
        )
    }

    /// Check if this error is about a missing or unusable target path
    pub fn is_path_error(&self) -> bool {
        matches!(self, SeqError::NotFound(_) | SeqError::NotADirectory(_))
    }

    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            SeqError::NotFound(path) => {
                format!("{:?} doesn't exist. Check the path, or whether it was removed during the scan.", path)
            }
            SeqError::NotADirectory(path) => {
                format!("{:?} is not a directory. Pass the folder containing the sequence instead.", path)
            }
            SeqError::InvalidPattern { pattern, .. } => {
                format!(
                    "{} Patterns use Rust regex syntax, e.g. '(?P<bare>\\D+)(?P<index>\\d+)' (got '{}').",
                    self, pattern
                )
            }
            _ => self.to_string(),
        }
    }
}
