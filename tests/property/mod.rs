//! Property-based testing for fileseq
//!
//! Uses proptest to check the splitting and gap detection invariants across
//! randomly generated names and sequences.

use ::fileseq::*;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

/// Bare names that no default grammar can mistake for an index
fn bare_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,7}\\.?"
}

fn extension_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "\\.[a-z]{1,4}"]
}

/// File names in the layouts the default grammars accept
fn file_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // bare + index + ext
        (bare_strategy(), 0u32..100_000, extension_strategy())
            .prop_map(|(bare, i, ext)| format!("{}{}{}", bare, i, ext)),
        // index + separator + bare + ext
        ("[a-z]{1,6}", 0u32..100_000, extension_strategy())
            .prop_map(|(bare, i, ext)| format!("{} {}{}", i, bare, ext)),
        // prefix + index + bare + ext
        ("[a-z]", 0u32..100_000, "_[a-z]{1,6}", extension_strategy())
            .prop_map(|(prefix, i, bare, ext)| format!("{}{}{}{}", prefix, i, bare, ext)),
        // bare + index + secondary + ext
        (bare_strategy(), 0u32..100_000, "-[a-z]{1,5}", extension_strategy())
            .prop_map(|(bare, i, sec, ext)| format!("{}{}{}{}", bare, i, sec, ext)),
    ]
}

fn reconstruct(record: &NameRecord) -> String {
    let secondary = record.secondary_name.as_deref().unwrap_or("");
    match record.order {
        Order::Normal => format!("{}{}{}{}", record.bare_name, record.index, secondary, record.extension),
        Order::Reverse => format!("{}{}{}{}", secondary, record.index, record.bare_name, record.extension),
    }
}

/// Write `prefix{i:0width$}.png` for every index and check the directory
fn check_sequence(indices: &BTreeSet<u64>, width: usize) -> (TempDir, MissingReport) {
    let temp = TempDir::new().unwrap();
    for i in indices {
        fs::write(temp.path().join(format!("frame.{:0w$}.png", i, w = width)), b"").unwrap();
    }
    let mut checker = SequenceChecker::new();
    let report = checker.process_dir(temp.path()).unwrap();
    (temp, report)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_split_reconstructs_name(name in file_name_strategy()) {
        let splitter = NameSplitter::new();
        let record = splitter.split(&name);
        prop_assert!(record.is_some(), "{} did not split", name);
        let record = record.unwrap();
        prop_assert_eq!(reconstruct(&record), name.clone());
        prop_assert_eq!(record.file_name(), name);
    }

    #[test]
    fn prop_split_never_panics(name in "\\PC{0,24}") {
        let splitter = NameSplitter::new();
        if let Some(record) = splitter.split(&name) {
            prop_assert_eq!(reconstruct(&record), name);
        }
    }

    #[test]
    fn prop_contiguous_run_reports_nothing(start in 0u64..5_000, len in 1u64..40, width in 1usize..6) {
        let indices: BTreeSet<u64> = (start..start + len).collect();
        let (_temp, report) = check_sequence(&indices, width);
        prop_assert!(report.is_empty());
    }

    #[test]
    fn prop_removed_indices_reported_exactly(
        len in 3u64..60,
        removed in prop::collection::btree_set(1u64..59, 0..12),
    ) {
        // first and last stay so every removed index lies inside the run
        let removed: BTreeSet<u64> = removed.into_iter().filter(|i| *i < len - 1).collect();
        let present: BTreeSet<u64> = (0..len).filter(|i| !removed.contains(i)).collect();
        let (temp, report) = check_sequence(&present, 3);

        let expected: Vec<String> = removed.iter().map(|i| format!("frame.{:03}.png", i)).collect();
        let reported = report.get(temp.path()).map(<[String]>::to_vec).unwrap_or_default();
        prop_assert_eq!(reported, expected);
    }

    #[test]
    fn prop_reports_stay_inside_window(
        present in prop::collection::btree_set(0u64..200, 2..30),
        start in 0i64..100,
        span in 1i64..100,
    ) {
        let temp = TempDir::new().unwrap();
        for i in &present {
            fs::write(temp.path().join(format!("f{:03}.png", i)), b"").unwrap();
        }
        let end = start + span;
        let mut checker = SequenceChecker::builder().range(Some(start), Some(end)).build().unwrap();
        let report = checker.process_dir(temp.path()).unwrap();

        for names in report.iter().map(|(_, names)| names) {
            for name in names {
                let index: i64 = name[1..4].parse().unwrap();
                prop_assert!(index < end, "{} is outside [{}, {})", name, start, end);
                prop_assert!(!present.contains(&(index as u64)));
            }
        }
    }

    #[test]
    fn prop_idempotent(present in prop::collection::btree_set(0u64..100, 1..20)) {
        let (temp, first) = check_sequence(&present, 2);
        let mut checker = SequenceChecker::new();
        let second = checker.process_dir(temp.path()).unwrap();
        let third = checker.process_dir(temp.path()).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(second, third);
    }
}
