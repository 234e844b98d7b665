//! Tree fingerprinting: walk, probe, sort and fold into one digest

use crate::error::FingerprintError;
use crate::tree::hasher::{self, DEFAULT_CHUNK_SIZE};
use crate::tree::inventory::{FileEntry, SkippedDirectory, TreeFingerprint};
use crate::tree::path::{canonicalize_root, relative_path_string};
use crate::tree::probe::FileProber;
use crate::tree::walker::{TreeWalker, WalkItem};
use chrono::Utc;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Fingerprinting settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintConfig {
    /// Read size for content hashing
    pub chunk_size: usize,
    /// Worker threads for probing; 0 probes on the calling thread
    pub workers: usize,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: 0,
        }
    }
}

/// Computes [`TreeFingerprint`]s. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct FingerprintEngine {
    config: FingerprintConfig,
    prober: FileProber,
}

impl FingerprintEngine {
    pub fn new(config: FingerprintConfig) -> Self {
        Self {
            prober: FileProber::new(config.chunk_size),
            config,
        }
    }

    pub fn config(&self) -> &FingerprintConfig {
        &self.config
    }

    /// Fingerprint every regular file below `root`
    #[instrument(skip(self, root), fields(root = %root.as_ref().display(), workers = self.config.workers))]
    pub fn fingerprint(&self, root: impl AsRef<Path>) -> Result<TreeFingerprint, FingerprintError> {
        let start = Instant::now();
        let walker = TreeWalker::new(root.as_ref())?;
        let root = walker.root().to_path_buf();

        let mut paths = Vec::new();
        let mut skipped = Vec::new();
        for item in walker {
            match item {
                WalkItem::File(path) => paths.push(path),
                WalkItem::Skipped { path, reason } => {
                    warn!(path = %path.display(), reason = %reason, "Skipped unreadable directory");
                    skipped.push(SkippedDirectory { path, reason });
                }
                WalkItem::Fatal { path, reason } => {
                    return Err(FingerprintError::WalkAborted { path, reason });
                }
            }
        }
        debug!(file_count = paths.len(), "Walked evidence tree");

        let fingerprint = self.fold(root, paths, skipped)?;
        info!(
            digest = %fingerprint.digest,
            files = fingerprint.entry_count,
            failed = fingerprint.failed_count,
            skipped_dirs = fingerprint.skipped_directories.len(),
            total_bytes = fingerprint.total_size_bytes,
            duration_ms = start.elapsed().as_millis() as u64,
            "Fingerprint computed"
        );
        Ok(fingerprint)
    }

    /// Fingerprint an explicit list of files under `root`
    ///
    /// The input order is irrelevant. Relative paths are resolved against
    /// `root`.
    pub fn fingerprint_paths(
        &self,
        root: impl AsRef<Path>,
        paths: impl IntoIterator<Item = PathBuf>,
    ) -> Result<TreeFingerprint, FingerprintError> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(FingerprintError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        if !root.is_dir() {
            return Err(FingerprintError::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        let root = canonicalize_root(root)?;
        let paths = paths
            .into_iter()
            .map(|p| if p.is_absolute() { p } else { root.join(p) })
            .collect();
        self.fold(root, paths, Vec::new())
    }

    fn fold(
        &self,
        root: PathBuf,
        paths: Vec<PathBuf>,
        skipped_directories: Vec<SkippedDirectory>,
    ) -> Result<TreeFingerprint, FingerprintError> {
        let mut keyed: Vec<(String, PathBuf)> = paths
            .into_iter()
            .map(|p| (relative_path_string(&root, &p), p))
            .collect();
        keyed.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()).then_with(|| a.1.cmp(&b.1)));
        keyed.dedup_by(|a, b| a.1 == b.1);

        let mut entries = self.probe_all(&keyed)?;

        // Distinct files that encode to the same relative path stay listed
        // but only the first one enters the digest.
        for i in 1..entries.len() {
            if entries[i].relative_path == entries[i - 1].relative_path {
                warn!(path = %entries[i].relative_path, "Relative path collides with another file");
                entries[i].content_digest.clear();
                entries[i].error = Some("relative path collides with another file".to_string());
            }
        }

        let digest = hasher::tree_digest(
            entries
                .iter()
                .filter(|e| e.is_hashed())
                .map(|e| (e.relative_path.as_str(), e.content_digest.as_str())),
        );
        let total_size_bytes = entries.iter().filter_map(|e| e.size_bytes).sum();
        let failed_count = entries.iter().filter(|e| !e.is_hashed()).count();

        Ok(TreeFingerprint {
            root,
            digest,
            entry_count: entries.len(),
            total_size_bytes,
            failed_count,
            entries,
            skipped_directories,
            computed_at: Utc::now(),
        })
    }

    fn probe_all(&self, keyed: &[(String, PathBuf)]) -> Result<Vec<FileEntry>, FingerprintError> {
        let prober = self.prober;
        if self.config.workers == 0 {
            return Ok(keyed
                .iter()
                .map(|(relative, absolute)| prober.probe(relative, absolute))
                .collect());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("custody-probe-{}", i))
            .build()
            .map_err(|e| FingerprintError::WorkerPool(e.to_string()))?;

        // par_iter().collect() preserves input order
        Ok(pool.install(|| {
            keyed
                .par_iter()
                .map(|(relative, absolute)| prober.probe(relative, absolute))
                .collect()
        }))
    }
}

/// Fingerprint `root` with default settings
pub fn fingerprint(root: impl AsRef<Path>) -> Result<TreeFingerprint, FingerprintError> {
    FingerprintEngine::default().fingerprint(root)
}
