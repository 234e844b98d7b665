//! Evidence tree fingerprinting
//!
//! Walks a directory, hashes every regular file and folds the sorted
//! `(relative_path, content_digest)` pairs into one deterministic digest.

pub mod fingerprint;
pub mod hasher;
pub mod inventory;
pub mod mime;
pub mod path;
pub mod probe;
pub mod walker;

pub use fingerprint::{fingerprint, FingerprintConfig, FingerprintEngine};
pub use inventory::{extension_stats, ExtensionStats, FileEntry, SkippedDirectory, TreeFingerprint};
pub use probe::{FileMetadata, FileProber};
pub use walker::{TreeWalker, WalkItem};
