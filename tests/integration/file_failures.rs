//! Per-file failures that do not depend on permission bits

use super::test_utils::write_tree;
use custody::tree::hasher::{sha256_hex, tree_digest};
use custody::tree::FingerprintEngine;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const FILES: [(&str, &str); 5] = [
    ("one.txt", "1"),
    ("two.txt", "2"),
    ("sub/three.txt", "3"),
    ("sub/four.txt", "4"),
    ("gone.bin", "secret"),
];

fn readable_digest() -> custody::types::TreeDigest {
    let lines: Vec<(String, String)> = vec![
        ("one.txt".to_string(), sha256_hex(b"1")),
        ("sub/four.txt".to_string(), sha256_hex(b"4")),
        ("sub/three.txt".to_string(), sha256_hex(b"3")),
        ("two.txt".to_string(), sha256_hex(b"2")),
    ];
    tree_digest(lines.iter().map(|(p, h)| (p.as_str(), h.as_str())))
}

fn all_paths() -> Vec<PathBuf> {
    FILES.iter().map(|(p, _)| PathBuf::from(p)).collect()
}

#[test]
fn test_vanished_file_is_contained() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &FILES);
    fs::remove_file(temp_dir.path().join("gone.bin")).unwrap();

    let fp = FingerprintEngine::default()
        .fingerprint_paths(temp_dir.path(), all_paths())
        .unwrap();

    assert_eq!(fp.entry_count, 5);
    assert_eq!(fp.failed_count, 1);
    assert_eq!(fp.entries.iter().filter(|e| e.is_hashed()).count(), 4);

    let failed = fp
        .entries
        .iter()
        .find(|e| e.relative_path == "gone.bin")
        .unwrap();
    assert!(failed.content_digest.is_empty());
    assert!(failed.error.is_some());
    assert_eq!(failed.size_bytes, None);
    assert_eq!(failed.modified_at, None);

    assert_eq!(fp.digest, readable_digest());
}

#[test]
fn test_directory_in_file_list_is_contained() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &FILES[..4]);
    fs::create_dir(temp_dir.path().join("gone.bin")).unwrap();

    let fp = FingerprintEngine::default()
        .fingerprint_paths(temp_dir.path(), all_paths())
        .unwrap();

    assert_eq!(fp.entry_count, 5);
    assert_eq!(fp.failed_count, 1);
    assert!(!fp.is_complete());
    assert_eq!(fp.digest, readable_digest());
}

#[test]
fn test_failure_does_not_depend_on_workers() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &FILES);
    fs::remove_file(temp_dir.path().join("gone.bin")).unwrap();

    let engine = FingerprintEngine::new(custody::tree::FingerprintConfig {
        workers: 3,
        ..Default::default()
    });
    let fp = engine.fingerprint_paths(temp_dir.path(), all_paths()).unwrap();
    assert_eq!(fp.failed_count, 1);
    assert_eq!(fp.digest, readable_digest());
}
