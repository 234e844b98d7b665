//! Integration tests for unreadable files and directories

#![cfg(unix)]

use super::test_utils::{running_as_root, write_tree};
use custody::tree::fingerprint;
use custody::tree::hasher::tree_digest;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

fn set_mode(path: &Path, mode: u32) {
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
}

#[test]
fn test_unreadable_file_is_contained() {
    if running_as_root() {
        eprintln!("skipping: permission checks do not apply to root");
        return;
    }

    let temp_dir = TempDir::new().unwrap();
    write_tree(
        temp_dir.path(),
        &[
            ("one.txt", "1"),
            ("two.txt", "2"),
            ("sub/three.txt", "3"),
            ("sub/four.txt", "4"),
            ("locked.bin", "secret"),
        ],
    );
    let locked = temp_dir.path().join("locked.bin");
    set_mode(&locked, 0o000);

    let result = fingerprint(temp_dir.path());
    set_mode(&locked, 0o644);
    let fp = result.unwrap();

    assert_eq!(fp.entry_count, 5);
    assert_eq!(fp.failed_count, 1);

    let failed = fp
        .entries
        .iter()
        .find(|e| e.relative_path == "locked.bin")
        .unwrap();
    assert!(failed.content_digest.is_empty());
    assert!(failed.error.is_some());
    assert_eq!(failed.size_bytes, Some(6));

    // Digest covers exactly the four readable files
    let expected = tree_digest(
        fp.entries
            .iter()
            .filter(|e| e.relative_path != "locked.bin")
            .map(|e| (e.relative_path.as_str(), e.content_digest.as_str())),
    );
    assert_eq!(fp.digest, expected);
    assert!(fp
        .entries
        .iter()
        .filter(|e| e.relative_path != "locked.bin")
        .all(|e| !e.content_digest.is_empty()));
}

#[test]
fn test_unreadable_subdirectory_is_reported() {
    if running_as_root() {
        eprintln!("skipping: permission checks do not apply to root");
        return;
    }

    let temp_dir = TempDir::new().unwrap();
    write_tree(
        temp_dir.path(),
        &[("visible.txt", "v"), ("sealed/hidden.txt", "h")],
    );
    let sealed = temp_dir.path().join("sealed");
    set_mode(&sealed, 0o000);

    let result = fingerprint(temp_dir.path());
    set_mode(&sealed, 0o755);
    let fp = result.unwrap();

    assert_eq!(fp.entry_count, 1);
    assert_eq!(fp.skipped_directories.len(), 1);
    assert!(fp.skipped_directories[0].path.ends_with("sealed"));
    assert!(!fp.is_complete());
}

#[test]
fn test_unreadable_root_aborts() {
    if running_as_root() {
        eprintln!("skipping: permission checks do not apply to root");
        return;
    }

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    write_tree(&root, &[("file.txt", "x")]);
    set_mode(&root, 0o000);

    let result = fingerprint(&root);
    set_mode(&root, 0o755);

    assert!(matches!(
        result,
        Err(custody::error::FingerprintError::WalkAborted { .. })
    ));
}
