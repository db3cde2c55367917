//! Natural ordering of split file names
//!
//! Records are sorted in two stable passes: first by the integer value of the
//! index, then by bare name. The second pass clusters each sequence together
//! while keeping its indices ascending, which is what the comparator relies
//! on when it walks adjacent pairs.

use crate::types::NameRecord;

/// Sort records by index value, then (stably) by bare name
///
/// Bare names compare by code point. Records whose index does not parse as
/// an integer sort ahead of parseable ones within their bare name.
///
/// # Examples
///
/// ```rust
/// use fileseq::sorting::sort_records;
/// use fileseq::splitter::NameSplitter;
///
/// let splitter = NameSplitter::new();
/// let mut records: Vec<_> = ["b10.png", "a2.png", "b9.png", "a10.png"]
///     .iter()
///     .filter_map(|n| splitter.split(n))
///     .collect();
/// sort_records(&mut records);
///
/// let names: Vec<String> = records.iter().map(|r| r.file_name()).collect();
/// assert_eq!(names, ["a2.png", "a10.png", "b9.png", "b10.png"]);
/// ```
pub fn sort_records(records: &mut [NameRecord]) {
    records.sort_by_key(|r| r.index_value().ok());
    records.sort_by(|a, b| a.bare_name.cmp(&b.bare_name));
}
