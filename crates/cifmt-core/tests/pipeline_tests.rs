//! Integration tests for the per-file pipeline.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use cifmt_core::{
    Error, ExternalFormatter, FormatOutcome, Formatter, ProcessingMode, Result, format_file,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// In-process formatter that rewrites the file with a closure.
struct Rewrite<F: Fn(&str) -> String> {
    rewrite: F,
    seen: RefCell<Vec<PathBuf>>,
}

impl<F: Fn(&str) -> String> Rewrite<F> {
    fn new(rewrite: F) -> Self {
        Self {
            rewrite,
            seen: RefCell::new(Vec::new()),
        }
    }

    fn seen(&self) -> Vec<PathBuf> {
        self.seen.borrow().clone()
    }
}

impl<F: Fn(&str) -> String> Formatter for Rewrite<F> {
    fn name(&self) -> &str {
        "rewrite"
    }

    fn format(&self, path: &Path) -> Result<FormatOutcome> {
        self.seen.borrow_mut().push(path.to_path_buf());
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        fs::write(path, (self.rewrite)(&content)).map_err(|e| Error::io(path, e))?;
        Ok(FormatOutcome::Formatted { success: true })
    }
}

/// Formatter whose spawn always fails.
struct Broken {
    seen: RefCell<Option<PathBuf>>,
}

impl Formatter for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn format(&self, path: &Path) -> Result<FormatOutcome> {
        *self.seen.borrow_mut() = Some(path.to_path_buf());
        Err(Error::Spawn {
            program: "broken".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        })
    }
}

fn write_fixture(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("user-data.yaml");
    fs::write(&path, content).unwrap();
    path
}

const CLOUD_CONFIG: &str = "\
#cloud-config
packages:
  - git

#include
https://example.com/one
  https://example.com/two

runcmd:
  - echo hi
";

#[test]
fn test_no_directive_formats_file_directly() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "a:    1\n\n\n\nb: 2\n");
    let formatter = Rewrite::new(|text: &str| text.replace(":    ", ": "));

    let report = format_file(&path, &formatter).unwrap();

    assert_eq!(report.mode, ProcessingMode::PassThrough);
    assert_eq!(report.blocks, 0);
    assert_eq!(formatter.seen(), vec![path.clone()]);
    // Blank-line normalization only applies to sanitized files
    assert_eq!(fs::read_to_string(&path).unwrap(), "a: 1\n\n\n\nb: 2\n");
}

#[test]
fn test_formatter_never_sees_include_lines() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, CLOUD_CONFIG);
    let formatter = Rewrite::new(|text: &str| {
        assert!(!text.contains("#include"));
        assert!(!text.contains("https://"));
        text.to_string()
    });

    let report = format_file(&path, &formatter).unwrap();

    assert_eq!(report.mode, ProcessingMode::Sanitized);
    assert_eq!(report.blocks, 1);
    assert_eq!(report.restored, 1);
    assert_ne!(formatter.seen()[0], path);
}

#[test]
fn test_noop_formatter_leaves_file_identical() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, CLOUD_CONFIG);
    let formatter = Rewrite::new(str::to_string);

    format_file(&path, &formatter).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), CLOUD_CONFIG);
}

#[test]
fn test_formatter_changes_kept_around_blocks() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "packages:\n    - git\n#include\nhttps://x\n\n\n\nruncmd:\n    - ls\n");
    let formatter = Rewrite::new(|text: &str| text.replace("    - ", "  - "));

    format_file(&path, &formatter).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "packages:\n  - git\n#include\nhttps://x\n\nruncmd:\n  - ls\n"
    );
}

#[test]
fn test_blank_runs_collapsed_everywhere() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "a: 1\n\n\n\nb: 2\n#include\nhttps://x\n");
    let formatter = Rewrite::new(str::to_string);

    format_file(&path, &formatter).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "a: 1\n\nb: 2\n#include\nhttps://x\n\n"
    );
}

#[test]
fn test_working_copy_removed_after_success() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, CLOUD_CONFIG);
    let formatter = Rewrite::new(str::to_string);

    format_file(&path, &formatter).unwrap();

    let working_copy = &formatter.seen()[0];
    assert!(working_copy.to_string_lossy().ends_with(".yaml"));
    assert!(!working_copy.exists());
}

#[test]
fn test_working_copy_removed_when_formatter_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, CLOUD_CONFIG);
    let formatter = Broken {
        seen: RefCell::new(None),
    };

    let err = format_file(&path, &formatter).unwrap_err();

    assert!(matches!(err, Error::Spawn { .. }));
    let working_copy = formatter.seen.borrow().clone().unwrap();
    assert!(!working_copy.exists());
    assert_eq!(fs::read_to_string(&path).unwrap(), CLOUD_CONFIG);
}

#[test]
fn test_missing_formatter_still_restores_and_normalizes() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "a: 1\n\n#include\nhttps://x\n\n\n\nb: 2");
    let formatter = ExternalFormatter::new("cifmt-test-no-such-formatter");

    let report = format_file(&path, &formatter).unwrap();

    assert_eq!(report.outcome, FormatOutcome::Unavailable);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "a: 1\n\n#include\nhttps://x\n\nb: 2\n"
    );
}

#[test]
fn test_placeholder_dropped_by_formatter_loses_block() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "#include\nhttps://x\n\nkey: 1\n");
    let formatter = Rewrite::new(|text: &str| {
        text.lines()
            .filter(|line| !line.starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n")
    });

    let report = format_file(&path, &formatter).unwrap();

    assert_eq!(report.blocks, 1);
    assert_eq!(report.restored, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), "key: 1\n");
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = TempDir::new().unwrap();
    let formatter = Rewrite::new(str::to_string);

    let err = format_file(&dir.path().join("absent.yaml"), &formatter).unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
    assert!(formatter.seen().is_empty());
}

#[test]
fn test_reindented_placeholder_keeps_block() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "runcmd:\n  - ls\n#include\nhttps://x\n");
    let formatter = Rewrite::new(|text: &str| text.replace("# CLOUD", "  # CLOUD"));

    let report = format_file(&path, &formatter).unwrap();

    assert_eq!(report.restored, 1);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "runcmd:\n  - ls\n#include\nhttps://x\n\n"
    );
}

#[cfg(unix)]
#[test]
fn test_symlinked_input_updates_target() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("real.yaml");
    let link = dir.path().join("link.yaml");
    fs::write(&target, "a: 1\n#include\nhttps://x\n\n\n\nb: 2\n").unwrap();
    std::os::unix::fs::symlink(&target, &link).unwrap();
    let formatter = Rewrite::new(str::to_string);

    format_file(&link, &formatter).unwrap();

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "a: 1\n#include\nhttps://x\n\nb: 2\n"
    );
}
