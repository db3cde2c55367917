//! Main test module for fileseq
//!
//! This module includes all test suites:
//! - Integration tests for realistic directory layouts
//! - Property-based tests for invariants

pub mod integration;
pub mod property;

#[cfg(test)]
mod edge_cases {
    use ::fileseq::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut checker = SequenceChecker::new();
        let report = checker.process_dir(temp_dir.path()).unwrap();
        assert!(report.is_empty());
        assert_eq!(checker.total_processed(), 0);
    }

    #[test]
    fn test_directory_without_sequences() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["README.md", "notes.txt", ".hidden", "0001.png"] {
            fs::write(temp_dir.path().join(name), b"").unwrap();
        }
        let mut checker = SequenceChecker::new();
        assert!(checker.process_dir(temp_dir.path()).unwrap().is_empty());
        assert_eq!(checker.total_processed(), 0);
    }

    #[test]
    fn test_single_file_sequence() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("frame.0100.exr"), b"").unwrap();
        let mut checker = SequenceChecker::new();
        assert!(checker.process_dir(temp_dir.path()).unwrap().is_empty());
        assert_eq!(checker.total_processed(), 1);
    }

    #[test]
    fn test_duplicate_indices_with_other_padding() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a1.png", "a01.png", "a2.png"] {
            fs::write(temp_dir.path().join(name), b"").unwrap();
        }
        let mut checker = SequenceChecker::new();
        let report = checker.process_dir(temp_dir.path()).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_huge_index() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a99999999999999999999999.png", "a1.png", "a3.png"] {
            fs::write(temp_dir.path().join(name), b"").unwrap();
        }
        let mut checker = SequenceChecker::new();
        let report = checker.process_dir(temp_dir.path()).unwrap();
        assert_eq!(report.get(temp_dir.path()).unwrap(), ["a2.png"]);
    }

    #[test]
    fn test_largest_representable_index() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a18446744073709551614.png", "a18446744073709551615.png", "b1.png", "b3.png"] {
            fs::write(temp_dir.path().join(name), b"").unwrap();
        }
        let mut checker = SequenceChecker::new();
        let report = checker.process_dir(temp_dir.path()).unwrap();
        assert_eq!(report.get(temp_dir.path()).unwrap(), ["b2.png"]);
        assert_eq!(checker.total_processed(), 4);
    }

    #[test]
    fn test_unicode_names() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["écran_01.png", "écran_04.png"] {
            fs::write(temp_dir.path().join(name), b"").unwrap();
        }
        let mut checker = SequenceChecker::new();
        let report = checker.process_dir(temp_dir.path()).unwrap();
        assert_eq!(report.get(temp_dir.path()).unwrap(), ["écran_02.png", "écran_03.png"]);
    }

    #[test]
    fn test_trailing_separator_keys_same_directory() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a1.png", "a3.png"] {
            fs::write(temp_dir.path().join(name), b"").unwrap();
        }
        let with_sep = format!("{}{}", temp_dir.path().display(), std::path::MAIN_SEPARATOR);
        let mut checker = SequenceChecker::new();
        let report = checker.process_dir(&with_sep).unwrap();
        assert_eq!(report.total_dirs(), 1);
        assert_eq!(report.total_files(), 1);
    }
}
