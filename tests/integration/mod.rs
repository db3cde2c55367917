//! Integration tests for fileseq
//!
//! Builds realistic render and scan trees on disk and checks the reports the
//! public API produces for them.

use ::fileseq::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::info;

/// Test harness laying out sequences below a temporary root
pub struct SequenceFixture {
    pub temp_dir: TempDir,
    pub created: Vec<PathBuf>,
}

impl SequenceFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            created: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create empty files `dir/name` (dir relative to the root)
    pub fn files(&mut self, dir: &str, names: &[&str]) -> PathBuf {
        let dir = self.root().join(dir);
        fs::create_dir_all(&dir).unwrap();
        for name in names {
            let path = dir.join(name);
            fs::write(&path, b"").unwrap();
            self.created.push(path);
        }
        dir
    }

    /// Create `format(i)` for every index in `indices`
    pub fn sequence<F>(&mut self, dir: &str, indices: impl IntoIterator<Item = u64>, format: F) -> PathBuf
    where
        F: Fn(u64) -> String,
    {
        let names: Vec<String> = indices.into_iter().map(format).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        self.files(dir, &refs)
    }
}

#[test]
fn test_reverse_order_fixture() {
    let mut fixture = SequenceFixture::new();
    let dir = fixture.files(
        "reverse_order",
        &[
            "1 Write30.png",
            "3 Write30.png",
            "6 Write30.png",
            "v13_Write.png",
            "v14_Write.png",
            "r101_Write30.png",
            "r102_Write30.png",
            "r103_Write30.png",
            "r104_Write30.png",
        ],
    );

    let mut checker = SequenceChecker::new();
    let report = checker.process_dir(&dir).unwrap();
    assert_eq!(
        report.get(&dir).unwrap(),
        ["2 Write30.png", "4 Write30.png", "5 Write30.png"]
    );
}

#[test]
fn test_mixed_layouts_in_one_directory() {
    let mut fixture = SequenceFixture::new();
    let dir = fixture.files(
        "mixed",
        &[
            "image.001.png",
            "image.003.png",
            "Name20.01.png",
            "Name20.04.png",
            "line.1.bmp",
            "line.2.bmp",
            "v01_take.wav",
            "v03_take.wav",
            "-N0name001-png",
            "-N0name003-png",
        ],
    );

    let mut checker = SequenceChecker::new();
    let report = checker.process_dir(&dir).unwrap();
    let mut missing = report.get(&dir).unwrap().to_vec();
    missing.sort();
    assert_eq!(
        missing,
        [
            "-N0name002-png",
            "Name20.02.png",
            "Name20.03.png",
            "image.002.png",
            "v02_take.wav",
        ]
    );
    assert_eq!(checker.total_processed(), 10);
}

#[test]
fn test_render_tree_recursive() {
    let mut fixture = SequenceFixture::new();
    let beauty = fixture.sequence("shot010/beauty", (1001..=1024).filter(|i| i % 7 != 0), |i| {
        format!("shot010_beauty.{:04}.exr", i)
    });
    let depth = fixture.sequence("shot010/depth", 1001..=1024, |i| format!("shot010_depth.{:04}.exr", i));
    fixture.files("shot010", &["shot010.nk", "notes_v2.txt"]);

    let mut checker = SequenceChecker::builder()
        .recursive(true)
        .include_pattern(r"\.exr$")
        .build()
        .unwrap();
    let report = checker.process_dir(fixture.root()).unwrap();
    info!("Report: {:?}", report);

    assert_eq!(
        report.get(&beauty).unwrap(),
        [
            "shot010_beauty.1008.exr",
            "shot010_beauty.1015.exr",
            "shot010_beauty.1022.exr",
        ]
    );
    assert!(report.get(&depth).is_none());
    assert_eq!(checker.total_dirs_with_missing(), 1);
    assert_eq!(checker.total_processed(), 24 + 20);
}

#[test]
fn test_frame_window() {
    let mut fixture = SequenceFixture::new();
    let dir = fixture.sequence("plates", [1, 5, 12, 20], |i| format!("plate_{:03}.dpx", i));

    let mut checker = SequenceChecker::builder().range(Some(0), Some(10)).build().unwrap();
    let report = checker.process_dir(&dir).unwrap();
    assert_eq!(
        report.get(&dir).unwrap(),
        [
            "plate_002.dpx",
            "plate_003.dpx",
            "plate_004.dpx",
            "plate_006.dpx",
            "plate_007.dpx",
            "plate_008.dpx",
            "plate_009.dpx",
        ]
    );

    let mut late = SequenceChecker::builder().start(4).build().unwrap();
    let report = late.process_dir(&dir).unwrap();
    let missing = report.get(&dir).unwrap();
    assert_eq!(missing.first().map(String::as_str), Some("plate_006.dpx"));
    assert_eq!(missing.last().map(String::as_str), Some("plate_019.dpx"));
    assert_eq!(missing.len(), 6 + 7);
}

#[test]
fn test_custom_pattern_with_secondary() {
    let mut fixture = SequenceFixture::new();
    let dir = fixture.files("scans", &["scan-p1-final.tif", "scan-p4-final.tif", "cover.tif"]);

    let mut checker = SequenceChecker::builder()
        .split_pattern(
            r"(?P<bare>[a-z]+)-p(?P<index>\d+)-(?P<secondary>[a-z]+)",
            "{bare}-p{index}-{secondary}{ext}",
        )
        .build()
        .unwrap();
    let report = checker.process_dir(&dir).unwrap();
    assert_eq!(report.get(&dir).unwrap(), ["scan-p2-final.tif", "scan-p3-final.tif"]);
    assert_eq!(checker.total_processed(), 2);
}

#[test]
fn test_file_excludes_replace_platform_list() {
    let mut fixture = SequenceFixture::new();
    let dir = fixture.files("frames", &["f1.png", "f2.png", "f4.png", "f9.png"]);

    let mut checker = SequenceChecker::builder().file_excludes(["f9.png"]).build().unwrap();
    let report = checker.process_dir(&dir).unwrap();
    assert_eq!(report.get(&dir).unwrap(), ["f3.png"]);
}

#[test]
fn test_config_file_drives_checker() {
    let mut fixture = SequenceFixture::new();
    let dir = fixture.files("frames", &["a1.png", "a3.png", "a12.png"]);
    let config_path = fixture.root().join("fileseq.json");
    fs::write(&config_path, r#"{"end": 5, "full_paths": true}"#).unwrap();

    let mut checker = CheckerConfig::load(&config_path).unwrap().into_builder().build().unwrap();
    let report = checker.process_dir(&dir).unwrap();
    let (key, names) = report.iter().next().unwrap();
    assert!(key.is_absolute());
    assert_eq!(names, ["a2.png", "a4.png"]);
}

#[test]
fn test_directory_removed_between_runs() {
    let mut fixture = SequenceFixture::new();
    let dir = fixture.files("gone", &["a1.png", "a3.png"]);
    let mut checker = SequenceChecker::new();
    assert_eq!(checker.process_dir(&dir).unwrap().total_files(), 1);

    fs::remove_dir_all(&dir).unwrap();
    let err = checker.process_dir(&dir).unwrap_err();
    assert!(err.is_path_error());
}
