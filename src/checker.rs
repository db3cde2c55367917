//! Sequence checking orchestrator
//!
//! [`SequenceChecker`] ties the pieces together: the [`DirectoryCollector`]
//! produces sorted record lists, a [`SequenceComparator`] walks each of them,
//! and the resulting [`MissingReport`] is kept on the checker along with a few
//! metrics about the last run.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fileseq::SequenceChecker;
//!
//! # fn main() -> fileseq::Result<()> {
//! let mut checker = SequenceChecker::builder()
//!     .recursive(true)
//!     .range(Some(1), Some(250))
//!     .exclude_pattern(r"\.tmp$")
//!     .build()?;
//!
//! let report = checker.process_dir("./renders")?;
//! for (dir, names) in report.iter() {
//!     println!("{}: {} missing", dir.display(), names.len());
//! }
//! # Ok(())
//! # }
//! ```

use crate::collector::DirectoryCollector;
use crate::comparator::SequenceComparator;
use crate::error::{Result, SeqError};
use crate::splitter::{Grammar, NameSplitter};
use crate::types::{DirContents, FileExcludes, MissingReport, SequenceRange};
use crate::utils::{absolute_path, strip_wrapping_quotes};
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Finds gaps in numbered file sequences below a directory
///
/// Create one with [`SequenceChecker::builder`] (or [`SequenceChecker::new`]
/// for the defaults) and call [`process_dir`](Self::process_dir). The checker
/// keeps the result of its last run for the accessor methods.
#[derive(Debug)]
pub struct SequenceChecker {
    collector: DirectoryCollector,
    range: SequenceRange,
    full_paths: bool,
    contents: DirContents,
    report: MissingReport,
    last_duration: Option<Duration>,
}

impl SequenceChecker {
    /// Checker with default grammars, no range limits, non-recursive
    pub fn new() -> Self {
        Self::from_parts(
            DirectoryCollector::new(NameSplitter::new()),
            SequenceRange::unbounded(),
            false,
        )
    }

    /// Start configuring a checker
    pub fn builder() -> SequenceCheckerBuilder {
        SequenceCheckerBuilder::new()
    }

    fn from_parts(collector: DirectoryCollector, range: SequenceRange, full_paths: bool) -> Self {
        Self {
            collector,
            range,
            full_paths,
            contents: DirContents::new(),
            report: MissingReport::new(),
            last_duration: None,
        }
    }

    /// Scan `path` and report every missing file per directory
    ///
    /// Each call starts from an empty report, so checking an unchanged
    /// directory twice gives the same result. Nothing missing is an empty
    /// report, not an error.
    ///
    /// # Errors
    ///
    /// - [`SeqError::NotFound`] if `path` does not exist, or a directory
    ///   vanishes before its records are compared
    /// - [`SeqError::NotADirectory`] if `path` is not a directory
    /// - [`SeqError::Io`] / [`SeqError::WalkDir`] on other traversal failures
    #[instrument(skip(self, path))]
    pub fn process_dir(&mut self, path: impl AsRef<Path>) -> Result<MissingReport> {
        let path = path.as_ref();
        info!("Checking sequences in {:?}", path);
        let start = Instant::now();

        self.report = MissingReport::new();
        self.contents = DirContents::new();
        self.last_duration = None;

        let contents = self.collector.collect(path)?;
        let mut report = MissingReport::new();
        let mut comparator = SequenceComparator::new(self.range, self.collector.splitter().template());

        for (dir, records) in &contents {
            if records.is_empty() {
                continue;
            }
            if !dir.is_dir() {
                return Err(SeqError::NotFound(dir.clone()));
            }
            let key = if self.full_paths {
                absolute_path(dir)?
            } else {
                dir.clone()
            };
            debug!("Comparing {} records in {:?}", records.len(), key);
            comparator.walk(&key, records, &mut report);
        }

        let elapsed = start.elapsed();
        self.contents = contents;
        self.report = report;
        self.last_duration = Some(elapsed);

        info!(
            "Found {} missing files in {} directories ({} processed in {:?})",
            self.total_missing_files(),
            self.total_dirs_with_missing(),
            self.total_processed(),
            elapsed
        );
        Ok(self.report.clone())
    }

    /// Report of the last run
    pub fn missing(&self) -> &MissingReport {
        &self.report
    }

    /// Missing names found in one directory during the last run
    ///
    /// `dir` must be given the way it appears in the report: as walked, or
    /// absolute when `full_paths` is set.
    pub fn missing_in(&self, dir: impl AsRef<Path>) -> Option<&[String]> {
        self.report.get(dir)
    }

    /// Number of files that split into sequence records during the last run
    pub fn total_processed(&self) -> usize {
        self.contents.values().map(Vec::len).sum()
    }

    /// Number of missing files found during the last run
    pub fn total_missing_files(&self) -> usize {
        self.report.total_files()
    }

    /// Number of directories with at least one missing file
    pub fn total_dirs_with_missing(&self) -> usize {
        self.report.total_dirs()
    }

    /// Wall-clock time of the last successful run
    pub fn last_execution_duration(&self) -> Option<Duration> {
        self.last_duration
    }

    /// Index window applied to every run
    pub fn range(&self) -> SequenceRange {
        self.range
    }

    /// Whether subdirectories are scanned
    pub fn is_recursive(&self) -> bool {
        self.collector.is_recursive()
    }

    /// Whether the report is keyed by absolute directory paths
    pub fn uses_full_paths(&self) -> bool {
        self.full_paths
    }

    /// Splitter used to take file names apart
    pub fn splitter(&self) -> &NameSplitter {
        self.collector.splitter()
    }
}

impl Default for SequenceChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SequenceChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |b: Option<u64>| b.map_or_else(|| "none".to_string(), |v| v.to_string());
        write!(
            f,
            "SequenceChecker(start={}, end={}, recursive={}, full_paths={}, {})",
            bound(self.range.start()),
            bound(self.range.end()),
            self.is_recursive(),
            self.full_paths,
            self.collector.splitter()
        )
    }
}

/// Builder for configuring [`SequenceChecker`] instances
///
/// Nothing is validated until [`build`](Self::build), which reports the first
/// problem found as a [`SeqError`].
///
/// # Examples
///
/// ```rust
/// use fileseq::SequenceCheckerBuilder;
///
/// let checker = SequenceCheckerBuilder::new()
///     .start(1)
///     .end(100)
///     .split_pattern(r"(?P<bare>[a-z]+)_(?P<index>\d+)", "{bare}_{index}")
///     .build()
///     .unwrap();
/// assert!(!checker.is_recursive());
///
/// let bad = SequenceCheckerBuilder::new().start(10).end(5).build();
/// assert!(bad.unwrap_err().is_configuration());
/// ```
#[derive(Debug, Clone)]
pub struct SequenceCheckerBuilder {
    start: Option<i64>,
    end: Option<i64>,
    recursive: bool,
    include: Option<String>,
    exclude: Option<String>,
    pattern: Option<String>,
    template: Option<String>,
    grammars: Option<Vec<Grammar>>,
    file_excludes: FileExcludes,
    full_paths: bool,
    follow_symlinks: bool,
}

impl SequenceCheckerBuilder {
    /// Builder with default settings
    pub fn new() -> Self {
        Self {
            start: None,
            end: None,
            recursive: false,
            include: None,
            exclude: None,
            pattern: None,
            template: None,
            grammars: None,
            file_excludes: FileExcludes::platform_default(),
            full_paths: false,
            follow_symlinks: false,
        }
    }

    /// Set both ends of the index window `[start, end)`
    pub fn range(mut self, start: Option<i64>, end: Option<i64>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Ignore runs whose first index is below `start`
    pub fn start(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    /// Never report indices at or beyond `end`
    pub fn end(mut self, end: i64) -> Self {
        self.end = Some(end);
        self
    }

    /// Scan subdirectories as well
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Only consider paths matching this regex
    pub fn include_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.include = Some(pattern.into());
        self
    }

    /// Skip paths matching this regex; wins over the include pattern
    pub fn exclude_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(pattern.into());
        self
    }

    /// Replace the default grammars with one custom pattern
    ///
    /// `template` lays out missing names from the captured parts; see
    /// [`Template`](crate::splitter::Template).
    pub fn split_pattern(mut self, pattern: impl Into<String>, template: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self.template = Some(template.into());
        self
    }

    /// Custom split pattern on its own; `build` fails without a template
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Template on its own; `build` fails without a pattern
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Replace the default grammars with an ordered list of grammars
    pub fn grammars(mut self, grammars: Vec<Grammar>) -> Self {
        self.grammars = Some(grammars);
        self
    }

    /// Replace the platform list of file names that are never considered
    pub fn file_excludes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_excludes = FileExcludes::new(names);
        self
    }

    /// Key the report by absolute directory paths
    pub fn full_paths(mut self, full_paths: bool) -> Self {
        self.full_paths = full_paths;
        self
    }

    /// Follow symbolic links while walking
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Validate the configuration and create the checker
    ///
    /// # Errors
    ///
    /// - [`SeqError::Configuration`] for an invalid range, identical include
    ///   and exclude patterns, a pattern without a template (or the other way
    ///   round), both a pattern and a grammar list, or a template that does not
    ///   cover the pattern's captures
    /// - [`SeqError::InvalidPattern`] if a regex fails to compile
    pub fn build(self) -> Result<SequenceChecker> {
        let range = SequenceRange::new(self.start, self.end)?;

        if let (Some(include), Some(exclude)) = (&self.include, &self.exclude) {
            if include == exclude {
                return Err(SeqError::config(
                    "include and exclude patterns are identical, nothing will be processed",
                ));
            }
        }

        let splitter = match (self.pattern, self.template, self.grammars) {
            (Some(_), _, Some(_)) => {
                return Err(SeqError::config("a split pattern and a grammar list are mutually exclusive"))
            }
            (Some(pattern), Some(template), None) => NameSplitter::with_custom(&pattern, &template)?,
            (Some(_), None, None) => return Err(SeqError::config("a split pattern requires a template")),
            (None, Some(_), _) => return Err(SeqError::config("a template requires a split pattern")),
            (None, None, Some(grammars)) => NameSplitter::with_grammars(grammars)?,
            (None, None, None) => NameSplitter::new(),
        };

        let collector = DirectoryCollector::new(splitter)
            .with_recursive(self.recursive)
            .with_file_excludes(self.file_excludes)
            .with_include(compile_filter(self.include.as_deref())?)
            .with_exclude(compile_filter(self.exclude.as_deref())?)
            .with_follow_symlinks(self.follow_symlinks);

        let checker = SequenceChecker::from_parts(collector, range, self.full_paths);
        debug!("Built {}", checker);
        Ok(checker)
    }
}

impl Default for SequenceCheckerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_filter(pattern: Option<&str>) -> Result<Option<Regex>> {
    let Some(pattern) = pattern else {
        return Ok(None);
    };
    let pattern = strip_wrapping_quotes(pattern);
    if pattern.is_empty() {
        return Ok(None);
    }
    Regex::new(pattern)
        .map(Some)
        .map_err(|e| SeqError::pattern(pattern, e))
}
