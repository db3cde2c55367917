//! Core data types used throughout the fileseq library
//!
//! ## Overview
//!
//! The types in this module represent:
//! - **Split names**: [`NameRecord`], [`Order`] - one file name taken apart into
//!   bare name, index, extension and an optional secondary fragment
//! - **Results**: [`MissingReport`], [`DirContents`] - per-directory outputs of a scan
//! - **Configuration**: [`SequenceRange`], [`FileExcludes`] - values injected into
//!   the collector and comparator
//!
//! ## Examples
//!
//! ```rust
//! use fileseq::types::{NameRecord, Order};
//!
//! let record = NameRecord {
//!     bare_name: "image.".to_string(),
//!     index: "001".to_string(),
//!     extension: ".png".to_string(),
//!     order: Order::Normal,
//!     secondary_name: None,
//! };
//! assert_eq!(record.file_name(), "image.001.png");
//! assert_eq!(record.file_name_with_index("002"), "image.002.png");
//! ```

use crate::collections::{HashSet, HashSetExt};
use crate::error::{Result, SeqError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

/// Which side of the bare name the numeric index sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Bare name precedes the index (`image.001`)
    Normal,
    /// Index precedes the bare name (`001 image`, `v001_image`)
    Reverse,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Normal => write!(f, "normal"),
            Order::Reverse => write!(f, "reverse"),
        }
    }
}

/// One file name split into its sequence parts
///
/// Concatenating the parts in `order`, with `secondary_name` in its slot and
/// `extension` last, reproduces the original file name exactly:
///
/// - `Normal`: `bare_name + index + secondary_name + extension`
/// - `Reverse`: `secondary_name + index + bare_name + extension`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    /// Part of the name that stays constant across a sequence
    pub bare_name: String,
    /// Numeral exactly as it appeared, leading zeros included
    pub index: String,
    /// Extension including the leading dot, or empty
    pub extension: String,
    /// Whether the bare name precedes the index
    pub order: Order,
    /// Fragment on the opposite side of the index from `bare_name`
    pub secondary_name: Option<String>,
}

impl NameRecord {
    /// Integer value of the index
    ///
    /// Grammars match Unicode digits, so an index that looks numeric can still
    /// fail here (or overflow `u64`).
    pub fn index_value(&self) -> std::result::Result<u64, ParseIntError> {
        self.index.parse::<u64>()
    }

    /// Number of characters in the index as written
    pub fn index_width(&self) -> usize {
        self.index.chars().count()
    }

    /// Reassemble the original file name
    pub fn file_name(&self) -> String {
        self.file_name_with_index(&self.index)
    }

    /// Assemble a file name using the same layout but a different index
    pub fn file_name_with_index(&self, index: &str) -> String {
        let secondary = self.secondary_name.as_deref().unwrap_or("");
        match self.order {
            Order::Normal => format!("{}{}{}{}", self.bare_name, index, secondary, self.extension),
            Order::Reverse => format!("{}{}{}{}", secondary, index, self.bare_name, self.extension),
        }
    }
}

/// Sorted record lists keyed by the directory they were collected from
pub type DirContents = BTreeMap<PathBuf, Vec<NameRecord>>;

/// Missing file names keyed by containing directory
///
/// A directory only gets an entry once a missing file is found in it, and
/// names are kept in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissingReport {
    missing: BTreeMap<PathBuf, Vec<String>>,
}

impl MissingReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one missing file name under `dir`
    pub fn push(&mut self, dir: &Path, file_name: String) {
        self.missing.entry(dir.to_path_buf()).or_default().push(file_name);
    }

    /// Missing file names for one directory
    pub fn get(&self, dir: impl AsRef<Path>) -> Option<&[String]> {
        self.missing.get(dir.as_ref()).map(Vec::as_slice)
    }

    /// Iterate over `(directory, missing names)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[String])> {
        self.missing
            .iter()
            .map(|(dir, names)| (dir.as_path(), names.as_slice()))
    }

    /// Directories with at least one missing file
    pub fn total_dirs(&self) -> usize {
        self.missing.len()
    }

    /// Missing files over all directories
    pub fn total_files(&self) -> usize {
        self.missing.values().map(Vec::len).sum()
    }

    /// True when nothing is missing anywhere
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Optional `[start, end)` window on sequence indices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceRange {
    start: Option<u64>,
    end: Option<u64>,
}

impl SequenceRange {
    /// Unbounded range
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Validate and build a range
    ///
    /// # Errors
    ///
    /// [`SeqError::Configuration`] if either bound is negative or `start >= end`.
    pub fn new(start: Option<i64>, end: Option<i64>) -> Result<Self> {
        let start = start
            .map(|s| {
                u64::try_from(s)
                    .map_err(|_| SeqError::config(format!("start must not be negative (got {})", s)))
            })
            .transpose()?;
        let end = end
            .map(|e| {
                u64::try_from(e)
                    .map_err(|_| SeqError::config(format!("end must not be negative (got {})", e)))
            })
            .transpose()?;
        if let (Some(s), Some(e)) = (start, end) {
            if s >= e {
                return Err(SeqError::config(format!(
                    "invalid range: start ({}) is greater than or equal to end ({})",
                    s, e
                )));
            }
        }
        Ok(Self { start, end })
    }

    /// Lower bound, inclusive
    pub fn start(&self) -> Option<u64> {
        self.start
    }

    /// Upper bound, exclusive
    pub fn end(&self) -> Option<u64> {
        self.end
    }

    /// True if `index` is below the start of the window
    pub fn is_before_start(&self, index: u64) -> bool {
        self.start.is_some_and(|s| index < s)
    }

    /// True if `index` lies beyond the end of the window
    pub fn is_past_end(&self, index: u64) -> bool {
        self.end.is_some_and(|e| index > e)
    }

    /// True if `index` may be reported as missing
    pub fn admits_missing(&self, index: u64) -> bool {
        self.end.map_or(true, |e| index < e)
    }
}

impl fmt::Display for SequenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (None, None) => write!(f, "[..)"),
            (Some(s), None) => write!(f, "[{}..)", s),
            (None, Some(e)) => write!(f, "[..{})", e),
            (Some(s), Some(e)) => write!(f, "[{}..{})", s, e),
        }
    }
}

/// Exact file names that are never considered part of a sequence
#[derive(Debug, Clone)]
pub struct FileExcludes {
    names: HashSet<String>,
}

impl FileExcludes {
    /// Build an exclude list from explicit names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter();
        let mut set = <HashSet<String> as HashSetExt>::with_capacity(names.size_hint().0);
        for name in names {
            set.insert(name.into());
        }
        Self { names: set }
    }

    /// Hidden system files of the platform this binary was built for
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::new([
                ".DS_Store",
                ".Spotlight-V100",
                ".Trashes",
                ".com.apple.timemachine.supported",
                ".fseventsd",
                ".syncinfo",
                ".TemporaryItems",
                "Desktop DF",
                "Desktop DB",
            ])
        } else if cfg!(windows) {
            Self::new(["thumbs.db", "Thumbs.db", "desktop.ini"])
        } else {
            Self::new(Vec::<String>::new())
        }
    }

    /// True if `file_name` is on the list
    pub fn contains(&self, file_name: &str) -> bool {
        self.names.contains(file_name)
    }

    /// Number of excluded names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if nothing is excluded
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for FileExcludes {
    fn default() -> Self {
        Self::platform_default()
    }
}
