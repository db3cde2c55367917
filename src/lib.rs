//! # fileseq - Find the gaps in numbered file sequences
//!
//! A library for checking directories of numbered files (render frames,
//! scans, exported takes) and reporting every file missing from each
//! sequence.
//!
//! ## Overview
//!
//! Given a directory holding `image.001.png`, `image.002.png` and
//! `image.005.png`, fileseq reports `image.003.png` and `image.004.png` as
//! missing. It handles:
//! - Index before or after the bare name (`shot.0001.exr`, `001 shot.exr`, `v12_shot.exr`)
//! - Zero-padded indices, reproduced in the missing names
//! - Several sequences in one directory, and whole directory trees
//! - An optional `[start, end)` window on the indices
//! - Include / exclude regexes on paths
//! - Custom split patterns with a template for the missing names
//!
//! ## Architecture
//!
//! A check runs as a small pipeline:
//!
//! - **Splitting**: each file name is taken apart into bare name, index,
//!   extension and an optional secondary fragment by an ordered list of
//!   grammars ([`splitter`])
//! - **Collecting**: a directory walk filters entries and gathers the split
//!   names per directory ([`collector`]), sorted by index then bare name
//!   ([`sorting`])
//! - **Comparing**: a state machine walks adjacent records and reports every
//!   index skipped within a run of one bare name ([`comparator`])
//! - **Orchestrating**: [`SequenceChecker`] wires these together and keeps
//!   the [`MissingReport`] plus a few metrics
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fileseq::SequenceChecker;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut checker = SequenceChecker::new();
//! let report = checker.process_dir("./renders")?;
//!
//! for (dir, names) in report.iter() {
//!     println!("In {}:", dir.display());
//!     for name in names {
//!         println!("  Missing {}", name);
//!     }
//! }
//! println!("Processed {} files", checker.total_processed());
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust,no_run
//! use fileseq::SequenceChecker;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut checker = SequenceChecker::builder()
//!     .recursive(true)
//!     .range(Some(1001), Some(1100))
//!     .include_pattern(r"\.exr$")
//!     .split_pattern(r"(?P<bare>[a-z]+)_v(?P<index>\d+)", "{bare}_v{index}")
//!     .build()?;
//! let report = checker.process_dir("./comp")?;
//! println!("{} files missing", report.total_files());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Operations return `Result<T, SeqError>`. Invalid settings fail when the
//! checker is built; a missing or non-directory target fails the call to
//! [`SequenceChecker::process_dir`]. File names that don't look like part of
//! a sequence are skipped silently.
//!
//! ## Module Organization
//!
//! - [`checker`]: orchestrator and its builder
//! - [`collector`]: directory walking and filtering
//! - [`comparator`]: gap detection state machine
//! - [`config`]: JSON configuration files
//! - [`splitter`]: grammars and templates
//! - [`sorting`]: natural record ordering
//! - [`types`]: common types and data structures
//! - [`error`]: error types and handling
//! - [`utils`]: string and path helpers

// Public API modules
pub mod checker;
pub mod collector;
pub mod comparator;
pub mod config;
pub mod error;
pub mod sorting;
pub mod splitter;
pub mod types;
pub mod utils;

// Internal modules (not part of public API)
mod collections;

// Re-export main types for convenience
pub use checker::{SequenceChecker, SequenceCheckerBuilder};
pub use collector::DirectoryCollector;
pub use comparator::SequenceComparator;
pub use config::CheckerConfig;
pub use error::{Result, SeqError};
pub use splitter::{Grammar, NameSplitter, Template};
pub use types::*;
