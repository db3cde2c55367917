//! Directory scanning for file sequence candidates
//!
//! The [`DirectoryCollector`] walks a directory (optionally recursively),
//! filters every file entry, splits the survivors with a [`NameSplitter`] and
//! returns one naturally sorted record list per directory visited.
//!
//! ## Filtering
//!
//! Entries are checked in this order, and the first rule that applies wins:
//!
//! 1. the entry must still exist (a file vanishing mid-scan is an error)
//! 2. exact file names on the [`FileExcludes`] list are skipped
//! 3. paths matching the exclude regex are skipped
//! 4. with an include regex configured, paths not matching it are skipped
//! 5. names no grammar can split are skipped
//!
//! Both regexes are searched anywhere in the full entry path, so the exclude
//! pattern takes precedence when both match.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fileseq::collector::DirectoryCollector;
//! use fileseq::splitter::NameSplitter;
//! use std::path::Path;
//!
//! # fn main() -> fileseq::Result<()> {
//! let collector = DirectoryCollector::new(NameSplitter::new()).with_recursive(true);
//! let contents = collector.collect(Path::new("./renders"))?;
//! for (dir, records) in &contents {
//!     println!("{}: {} sequence files", dir.display(), records.len());
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, SeqError};
use crate::sorting::sort_records;
use crate::splitter::NameSplitter;
use crate::types::{DirContents, FileExcludes, NameRecord};
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Collects split and sorted file names per directory
#[derive(Debug, Clone)]
pub struct DirectoryCollector {
    /// Splits file names into records
    splitter: NameSplitter,
    /// Exact names never considered
    file_excludes: FileExcludes,
    /// Only paths matching this are considered
    include: Option<Regex>,
    /// Paths matching this are skipped, even if included
    exclude: Option<Regex>,
    /// Descend into subdirectories
    recursive: bool,
    /// Whether to follow symbolic links during traversal
    follow_symlinks: bool,
}

impl DirectoryCollector {
    /// Create a non-recursive collector with the platform exclude list and no
    /// include/exclude patterns
    pub fn new(splitter: NameSplitter) -> Self {
        Self {
            splitter,
            file_excludes: FileExcludes::platform_default(),
            include: None,
            exclude: None,
            recursive: false,
            follow_symlinks: false,
        }
    }

    /// Set whether subdirectories are visited
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Replace the static exclude list
    pub fn with_file_excludes(mut self, excludes: FileExcludes) -> Self {
        self.file_excludes = excludes;
        self
    }

    /// Only consider paths matching `pattern`
    pub fn with_include(mut self, pattern: Option<Regex>) -> Self {
        self.include = pattern;
        self
    }

    /// Skip paths matching `pattern`; wins over the include pattern
    pub fn with_exclude(mut self, pattern: Option<Regex>) -> Self {
        self.exclude = pattern;
        self
    }

    /// Set symbolic link following behavior
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Splitter used for file names
    pub fn splitter(&self) -> &NameSplitter {
        &self.splitter
    }

    /// True if subdirectories are visited
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Include pattern, if any
    pub fn include(&self) -> Option<&Regex> {
        self.include.as_ref()
    }

    /// Exclude pattern, if any
    pub fn exclude(&self) -> Option<&Regex> {
        self.exclude.as_ref()
    }

    /// Walk `root` and build sorted record lists keyed by directory
    ///
    /// Every directory visited gets an entry, even when none of its files
    /// split into a record. Keys are built from `root` as given.
    ///
    /// # Errors
    ///
    /// - [`SeqError::NotFound`] if `root` or an enumerated entry does not exist
    /// - [`SeqError::NotADirectory`] if `root` is not a directory
    /// - [`SeqError::WalkDir`] if traversal fails otherwise
    pub fn collect(&self, root: &Path) -> Result<DirContents> {
        let metadata = fs::metadata(root).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SeqError::NotFound(root.to_path_buf()),
            _ => SeqError::Io(e),
        })?;
        if !metadata.is_dir() {
            return Err(SeqError::NotADirectory(root.to_path_buf()));
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(root)
            .follow_links(self.follow_symlinks)
            .max_depth(max_depth)
            .sort_by_file_name();

        let mut contents = DirContents::new();
        contents.insert(root.to_path_buf(), Vec::new());

        for entry in walker {
            let entry = entry?;
            if entry.depth() == 0 {
                continue;
            }
            if entry.file_type().is_dir() {
                if self.recursive {
                    contents.entry(entry.path().to_path_buf()).or_default();
                }
                continue;
            }
            if entry.path_is_symlink() && entry.path().is_dir() {
                trace!("Not following directory link {:?}", entry.path());
                continue;
            }

            // Direct children are keyed by `root` itself so a trailing
            // separator on the argument doesn't split one directory in two.
            let dir: PathBuf = match entry.path().parent() {
                Some(parent) if entry.depth() > 1 => parent.to_path_buf(),
                _ => root.to_path_buf(),
            };

            if let Some(record) = self.consider(entry.path())? {
                contents.entry(dir).or_default().push(record);
            }
        }

        for records in contents.values_mut() {
            sort_records(records);
        }
        Ok(contents)
    }

    fn consider(&self, path: &Path) -> Result<Option<NameRecord>> {
        if let Err(e) = fs::symlink_metadata(path) {
            return Err(match e.kind() {
                ErrorKind::NotFound => SeqError::NotFound(path.to_path_buf()),
                _ => SeqError::Io(e),
            });
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            trace!("Skipping non UTF-8 file name {:?}", path);
            return Ok(None);
        };
        if self.file_excludes.contains(file_name) {
            trace!("Skipping excluded file {:?}", path);
            return Ok(None);
        }

        let path_str = path.to_string_lossy();
        if self.exclude.as_ref().is_some_and(|re| re.is_match(&path_str)) {
            debug!("Excluding {}", path_str);
            return Ok(None);
        }
        if self.include.as_ref().is_some_and(|re| !re.is_match(&path_str)) {
            debug!("Not including {}", path_str);
            return Ok(None);
        }

        Ok(self.splitter.split(file_name))
    }
}
