//! Gap detection over sorted record lists
//!
//! The [`SequenceComparator`] walks one directory's sorted records as
//! adjacent pairs and reports every index missing from each run of records
//! sharing a bare name.
//!
//! ## States
//!
//! The comparator keeps three pieces of state between pairs: the bare name of
//! the run in progress, the next index it expects, and the digit width of the
//! run's first index.
//!
//! - **Idle** (no run): the current record opens a run unless its index is
//!   below the window start. A run whose next expected index is already past
//!   the window end is dropped right away.
//! - **In run** (same bare name): every index between the expected one and the
//!   current one is reported, zero-padded to the run's width and laid out like
//!   the current record, stopping at the window end.
//! - **Run boundary**: when the *next* record has another bare name the run is
//!   over and the comparator goes idle.
//! - **Mismatch**: a current record from another sequence than the run in
//!   progress resets the comparator.
//!
//! An index that fails to parse as an integer, or that is `u64::MAX` and so has
//! no successor, resets the comparator as well.
//!
//! ## Pairing
//!
//! Records are paired cyclically: `(r0, r1), (r1, r2), ..., (rN, r0)`. The
//! wrap-around pair lets the last record of the last run be compared like any
//! other. A single record yields no pairs at all.

use crate::splitter::Template;
use crate::types::{MissingReport, NameRecord, SequenceRange};
use std::ops::ControlFlow;
use std::path::Path;
use tracing::{debug, trace};

/// Per-run bookkeeping, reset between runs and directories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparatorState {
    /// Bare name of the run in progress, `None` when idle
    pub last_bare_name: Option<String>,
    /// Index the next record of the run should carry
    pub next_expected_index: u64,
    /// Digit count of the run's first index
    pub index_width: usize,
}

impl ComparatorState {
    /// True when no run is in progress
    pub fn is_idle(&self) -> bool {
        self.last_bare_name.is_none()
    }
}

/// Streaming pairwise comparator for one directory's records
#[derive(Debug, Clone)]
pub struct SequenceComparator<'a> {
    range: SequenceRange,
    template: Option<&'a Template>,
    state: ComparatorState,
}

impl<'a> SequenceComparator<'a> {
    /// Create an idle comparator
    ///
    /// With a `template`, missing names are rendered through it instead of
    /// from the record's own part order.
    pub fn new(range: SequenceRange, template: Option<&'a Template>) -> Self {
        Self {
            range,
            template,
            state: ComparatorState::default(),
        }
    }

    /// Current state, mostly of interest to tests
    pub fn state(&self) -> &ComparatorState {
        &self.state
    }

    /// Drop the run in progress
    pub fn reset(&mut self) {
        self.state = ComparatorState::default();
    }

    /// Compare every cyclic pair of `records`, appending missing names found
    /// under `dir` to `report`
    ///
    /// The comparator is reset first, so one instance can serve several
    /// directories in turn.
    pub fn walk(&mut self, dir: &Path, records: &[NameRecord], report: &mut MissingReport) {
        self.reset();
        for (current, next) in cyclic_pairs(records) {
            if self.compare_adjacent(dir, current, next, report).is_break() {
                break;
            }
        }
        self.reset();
    }

    /// Advance the state machine by one pair
    ///
    /// `current` and `next` are not necessarily from the same sequence; a
    /// differing `next` marks `current` as the last record of its run.
    pub fn compare_adjacent(
        &mut self,
        dir: &Path,
        current: &NameRecord,
        next: &NameRecord,
        report: &mut MissingReport,
    ) -> ControlFlow<()> {
        let index = match current.index_value() {
            Ok(index) => index,
            Err(e) => {
                trace!("Index {:?} of {:?} is not an integer ({}), resetting", current.index, current.file_name(), e);
                self.reset();
                return ControlFlow::Continue(());
            }
        };
        let Some(following) = index.checked_add(1) else {
            trace!("Index {} of {:?} has no successor, resetting", index, current.file_name());
            self.reset();
            return ControlFlow::Continue(());
        };

        let Some(last_bare_name) = self.state.last_bare_name.as_deref() else {
            self.open_run(current, index, following);
            if next.bare_name != current.bare_name {
                self.reset();
            }
            return ControlFlow::Continue(());
        };

        if last_bare_name != current.bare_name {
            trace!("{:?} doesn't continue run {:?}, resetting", current.file_name(), last_bare_name);
            self.reset();
            return ControlFlow::Continue(());
        }

        if index != self.state.next_expected_index {
            for missing in self.state.next_expected_index..index {
                if !self.range.admits_missing(missing) {
                    break;
                }
                let name = self.missing_name(current, missing);
                debug!("Missing {}", name);
                report.push(dir, name);
            }
            if self.range.is_past_end(index) {
                trace!("Index {} is past the end of {}, resetting", index, self.range);
                self.reset();
                return ControlFlow::Continue(());
            }
        }
        self.state.next_expected_index = following;

        if next.bare_name != current.bare_name {
            self.reset();
        }
        ControlFlow::Continue(())
    }

    fn open_run(&mut self, record: &NameRecord, index: u64, following: u64) {
        if self.range.is_before_start(index) {
            trace!("Index {} of {:?} is before the start of {}", index, record.file_name(), self.range);
            return;
        }
        self.state = ComparatorState {
            last_bare_name: Some(record.bare_name.clone()),
            next_expected_index: following,
            index_width: record.index_width(),
        };
        if self.range.is_past_end(self.state.next_expected_index) {
            trace!("Run {:?} starts past the end of {}", record.bare_name, self.range);
            self.reset();
        }
    }

    fn missing_name(&self, record: &NameRecord, index: u64) -> String {
        let index = format!("{:0width$}", index, width = self.state.index_width);
        match self.template {
            Some(template) => template.render(record, &index),
            None => record.file_name_with_index(&index),
        }
    }
}

/// Pair each item with its successor, the last one with the first
///
/// Fewer than two items yield no pairs.
pub fn cyclic_pairs<T>(items: &[T]) -> impl Iterator<Item = (&T, &T)> {
    let count = if items.len() < 2 { 0 } else { items.len() };
    items.iter().zip(items.iter().cycle().skip(1)).take(count)
}
