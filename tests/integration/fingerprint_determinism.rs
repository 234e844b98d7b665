//! Integration tests for fingerprint determinism and sensitivity

use super::test_utils::write_tree;
use custody::tree::hasher::sha256_hex;
use custody::tree::{fingerprint, FingerprintConfig, FingerprintEngine, TreeWalker, WalkItem};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const FILES: &[(&str, &str)] = &[
    ("a/x.txt", "hello"),
    ("b.txt", "world"),
    ("photos/2024/IMG_0001.JPG", "jpeg bytes"),
    ("photos/2024/IMG_0002.JPG", "more jpeg bytes"),
    ("notes", "no extension"),
    ("deep/er/and/deeper/clip.mp4", "video"),
];

/// The documented composition for {a/x.txt: "hello", b.txt: "world"}
#[test]
fn test_literal_end_to_end_composition() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), &[("a/x.txt", "hello"), ("b.txt", "world")]);

    let fp = fingerprint(temp_dir.path()).unwrap();
    let expected = sha256_hex(
        b"a/x.txt:2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824\
b.txt:486ea46224d1bb4fb680f34f7c9ad96a8f24ec88be73ea8e5a6c65260e9cb8a7",
    );
    assert_eq!(fp.digest.as_str(), expected);
    assert_eq!(fp.entry_count, 2);
    assert_eq!(fp.failed_count, 0);
}

/// Same content written in a different order under a different root
#[test]
fn test_creation_order_and_root_do_not_matter() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    write_tree(first.path(), FILES);
    let mut reversed: Vec<(&str, &str)> = FILES.to_vec();
    reversed.reverse();
    let nested_root = second.path().join("copy").join("of").join("evidence");
    fs::create_dir_all(&nested_root).unwrap();
    write_tree(&nested_root, &reversed);

    let a = fingerprint(first.path()).unwrap();
    let b = fingerprint(&nested_root).unwrap();
    assert_eq!(a.digest, b.digest);
    assert_ne!(a.root, b.root);

    let paths_a: Vec<&str> = a.entries.iter().map(|e| e.relative_path.as_str()).collect();
    let paths_b: Vec<&str> = b.entries.iter().map(|e| e.relative_path.as_str()).collect();
    assert_eq!(paths_a, paths_b);
}

#[test]
fn test_repeated_runs_are_identical() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), FILES);

    let engine = FingerprintEngine::default();
    let a = engine.fingerprint(temp_dir.path()).unwrap();
    let b = engine.fingerprint(temp_dir.path()).unwrap();
    assert_eq!(a.digest, b.digest);
    assert_eq!(a.entries, b.entries);
}

#[test]
fn test_single_byte_change_changes_digest() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), FILES);
    let before = fingerprint(temp_dir.path()).unwrap();

    fs::write(temp_dir.path().join("b.txt"), "worle").unwrap();
    let after = fingerprint(temp_dir.path()).unwrap();
    assert_ne!(before.digest, after.digest);
}

#[test]
fn test_rename_changes_digest() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), FILES);
    let before = fingerprint(temp_dir.path()).unwrap();

    fs::rename(temp_dir.path().join("b.txt"), temp_dir.path().join("c.txt")).unwrap();
    let after = fingerprint(temp_dir.path()).unwrap();
    assert_ne!(before.digest, after.digest);
}

#[test]
fn test_add_and_remove_change_digest() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), FILES);
    let original = fingerprint(temp_dir.path()).unwrap();

    fs::write(temp_dir.path().join("extra.bin"), "").unwrap();
    let added = fingerprint(temp_dir.path()).unwrap();
    assert_ne!(original.digest, added.digest);
    assert_eq!(added.entry_count, original.entry_count + 1);

    fs::remove_file(temp_dir.path().join("extra.bin")).unwrap();
    fs::remove_file(temp_dir.path().join("notes")).unwrap();
    let removed = fingerprint(temp_dir.path()).unwrap();
    assert_ne!(original.digest, removed.digest);
}

#[test]
fn test_empty_directories_do_not_contribute() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), FILES);
    let before = fingerprint(temp_dir.path()).unwrap();

    fs::create_dir_all(temp_dir.path().join("empty").join("nested")).unwrap();
    let after = fingerprint(temp_dir.path()).unwrap();
    assert_eq!(before.digest, after.digest);
}

#[test]
fn test_permuted_walker_output_same_digest() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), FILES);

    let walked: Vec<PathBuf> = TreeWalker::new(temp_dir.path())
        .unwrap()
        .filter_map(|item| match item {
            WalkItem::File(path) => Some(path),
            _ => None,
        })
        .collect();

    let engine = FingerprintEngine::default();
    let baseline = engine.fingerprint(temp_dir.path()).unwrap();
    for rotation in 0..walked.len() {
        let mut permuted = walked.clone();
        permuted.rotate_left(rotation);
        if rotation % 2 == 1 {
            permuted.reverse();
        }
        let fp = engine.fingerprint_paths(temp_dir.path(), permuted).unwrap();
        assert_eq!(fp.digest, baseline.digest);
    }
}

#[test]
fn test_parallel_and_chunk_size_do_not_matter() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), FILES);
    let large: String = "0123456789abcdef".repeat(4096);
    fs::write(temp_dir.path().join("large.bin"), &large).unwrap();

    let baseline = fingerprint(temp_dir.path()).unwrap();
    for (chunk_size, workers) in [(1, 0), (13, 2), (65536, 8)] {
        let fp = FingerprintEngine::new(FingerprintConfig {
            chunk_size,
            workers,
        })
        .fingerprint(temp_dir.path())
        .unwrap();
        assert_eq!(fp.digest, baseline.digest);
    }
}

#[test]
fn test_inventory_metadata() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), FILES);

    let fp = fingerprint(temp_dir.path()).unwrap();
    let photo = fp
        .entries
        .iter()
        .find(|e| e.relative_path == "photos/2024/IMG_0001.JPG")
        .unwrap();
    assert_eq!(photo.extension, ".jpg");
    assert_eq!(photo.content_type, "image/jpeg");
    assert_eq!(photo.file_name, "IMG_0001.JPG");
    assert_eq!(photo.size_bytes, Some(10));

    let bare = fp.entries.iter().find(|e| e.relative_path == "notes").unwrap();
    assert_eq!(bare.extension, "");
    assert_eq!(bare.content_type, "application/octet-stream");

    let total: u64 = FILES.iter().map(|(_, c)| c.len() as u64).sum();
    assert_eq!(fp.total_size_bytes, total);
}
