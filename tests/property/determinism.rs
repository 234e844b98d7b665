//! Property-based tests for fingerprint determinism

use custody::tree::hasher::{combine_lines, sha256_hex, tree_digest};
use custody::tree::FingerprintEngine;
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Small trees: relative path -> content
fn tree_strategy() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    let segment = "[a-z0-9]{1,6}";
    let path = prop::collection::vec(segment, 1..4).prop_map(|parts| parts.join("/"));
    prop::collection::btree_map(path, any::<Vec<u8>>(), 0..12)
}

/// Drop paths that are a directory prefix of another path
fn materializable(tree: &BTreeMap<String, Vec<u8>>) -> bool {
    tree.keys().all(|a| {
        tree.keys()
            .all(|b| a == b || !b.starts_with(&format!("{}/", a)))
    })
}

fn write(root: &std::path::Path, tree: &BTreeMap<String, Vec<u8>>) {
    for (relative, content) in tree {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// The filesystem digest equals the digest of the sorted pairs
    #[test]
    fn filesystem_digest_matches_pure_fold(tree in tree_strategy()) {
        prop_assume!(materializable(&tree));
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), &tree);

        let fp = FingerprintEngine::default().fingerprint(temp_dir.path()).unwrap();
        let hashes: Vec<(String, String)> = tree
            .iter()
            .map(|(p, c)| (p.clone(), sha256_hex(c)))
            .collect();
        let expected = tree_digest(hashes.iter().map(|(p, h)| (p.as_str(), h.as_str())));

        prop_assert_eq!(fp.digest, expected);
        prop_assert_eq!(fp.entry_count, tree.len());
    }

    /// Any permutation of the input paths yields the same digest
    #[test]
    fn permutation_does_not_change_digest(tree in tree_strategy(), seed in any::<u64>()) {
        prop_assume!(materializable(&tree));
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), &tree);

        let mut paths: Vec<PathBuf> = tree.keys().map(PathBuf::from).collect();
        let len = paths.len().max(1);
        paths.rotate_left((seed as usize) % len);
        if seed % 2 == 0 {
            paths.reverse();
        }

        let engine = FingerprintEngine::default();
        let permuted = engine.fingerprint_paths(temp_dir.path(), paths).unwrap();
        let walked = engine.fingerprint(temp_dir.path()).unwrap();
        prop_assert_eq!(permuted.digest, walked.digest);
    }

    /// combine_lines is plain concatenation of "path:digest" records
    #[test]
    fn combine_lines_is_concatenation(pairs in prop::collection::vec(("[a-z/]{1,8}", "[0-9a-f]{64}"), 0..8)) {
        let combined = combine_lines(pairs.iter().map(|(p, h)| (p.as_str(), h.as_str())));
        let expected: String = pairs.iter().map(|(p, h)| format!("{}:{}", p, h)).collect();
        prop_assert_eq!(combined, expected);
    }
}
