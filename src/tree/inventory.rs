//! Inventory types produced by fingerprinting

use crate::types::TreeDigest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Label used in statistics for files without an extension
pub const NO_EXTENSION: &str = "(no extension)";

/// One file in an evidence tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Forward-slash separated path relative to the root
    pub relative_path: String,
    #[serde(with = "crate::tree::path::lossy")]
    pub absolute_path: PathBuf,
    pub file_name: String,
    /// Lowercased extension with leading dot, empty when absent
    pub extension: String,
    pub size_bytes: Option<u64>,
    pub modified_at: Option<DateTime<Utc>>,
    pub content_type: String,
    /// Lowercase hex SHA-256, empty when the content could not be read
    pub content_digest: String,
    pub error: Option<String>,
}

impl FileEntry {
    /// Whether the content was hashed
    pub fn is_hashed(&self) -> bool {
        self.error.is_none() && !self.content_digest.is_empty()
    }
}

/// Subdirectory whose contents are missing from the inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDirectory {
    #[serde(with = "crate::tree::path::lossy")]
    pub path: PathBuf,
    pub reason: String,
}

/// Result of fingerprinting one directory tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeFingerprint {
    #[serde(with = "crate::tree::path::lossy")]
    pub root: PathBuf,
    pub digest: TreeDigest,
    /// Sorted by `relative_path`, byte-wise
    pub entries: Vec<FileEntry>,
    pub total_size_bytes: u64,
    pub entry_count: usize,
    pub failed_count: usize,
    pub skipped_directories: Vec<SkippedDirectory>,
    pub computed_at: DateTime<Utc>,
}

impl TreeFingerprint {
    /// Entries whose content could not be read
    pub fn failed_entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter().filter(|e| !e.is_hashed())
    }

    /// True when every file was hashed and no directory was skipped
    pub fn is_complete(&self) -> bool {
        self.failed_count == 0 && self.skipped_directories.is_empty()
    }
}

/// Per-extension counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionStats {
    pub files: usize,
    pub total_size_bytes: u64,
}

/// Group entries by extension, sorted by extension label
pub fn extension_stats(entries: &[FileEntry]) -> BTreeMap<String, ExtensionStats> {
    let mut stats: BTreeMap<String, ExtensionStats> = BTreeMap::new();
    for entry in entries {
        let label = if entry.extension.is_empty() {
            NO_EXTENSION.to_string()
        } else {
            entry.extension.clone()
        };
        let slot = stats.entry(label).or_default();
        slot.files += 1;
        slot.total_size_bytes += entry.size_bytes.unwrap_or(0);
    }
    stats
}
