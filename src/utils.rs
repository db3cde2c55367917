//! Utility functions for fileseq
//!
//! Small string and path helpers shared by the splitter, the checker and the
//! command line front end.

use crate::error::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Split a file name into stem and extension
///
/// The extension starts at the last dot and keeps it. Leading dots belong to
/// the stem, so `.hidden` has no extension. `stem + extension` always equals
/// the input.
///
/// # Examples
///
/// ```rust
/// use fileseq::utils::split_extension;
///
/// assert_eq!(split_extension("image.001.png"), ("image.001", ".png"));
/// assert_eq!(split_extension(".001"), (".001", ""));
/// assert_eq!(split_extension("frame"), ("frame", ""));
/// ```
pub fn split_extension(file_name: &str) -> (&str, &str) {
    let leading_dots = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name.rfind('.') {
        Some(pos) if pos >= leading_dots => file_name.split_at(pos),
        _ => (file_name, ""),
    }
}

/// Strip one quote character from each end of a pattern
///
/// Shells and config files sometimes hand patterns over still wrapped in the
/// quotes they were typed with. Either end is stripped independently.
pub fn strip_wrapping_quotes(pattern: &str) -> &str {
    let pattern = pattern
        .strip_prefix('"')
        .or_else(|| pattern.strip_prefix('\''))
        .unwrap_or(pattern);
    pattern
        .strip_suffix('"')
        .or_else(|| pattern.strip_suffix('\''))
        .unwrap_or(pattern)
}

/// True if the string contains at least one decimal digit
///
/// Uses the same `\d` class as the grammars, so any Unicode decimal digit
/// counts while numerals such as `Ⅻ` or `½` do not.
pub fn has_digit(s: &str) -> bool {
    static DIGIT: OnceLock<Regex> = OnceLock::new();
    DIGIT
        .get_or_init(|| Regex::new(r"\d").expect("digit class compiles"))
        .is_match(s)
}

/// Make a path absolute relative to the current working directory
///
/// Unlike `canonicalize` this neither touches the filesystem nor resolves
/// symbolic links.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Pluralize a count for summary lines
pub fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}
