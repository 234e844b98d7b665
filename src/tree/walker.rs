//! Filesystem walker for enumerating evidence files

use crate::error::FingerprintError;
use crate::tree::path::canonicalize_root;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// One item produced by the walker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkItem {
    /// A regular file (or a symlink resolving to one), absolute path
    File(PathBuf),
    /// A subdirectory that could not be read; its contents are missing
    Skipped { path: PathBuf, reason: String },
    /// The root itself could not be read; the walk cannot continue
    Fatal { path: PathBuf, reason: String },
}

/// Lazy, single-use walk over every regular file below a root directory
///
/// Yields entries in whatever order the filesystem returns them. Directory
/// symlinks are not followed; file symlinks are yielded when their target is
/// a regular file.
pub struct TreeWalker {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

impl TreeWalker {
    /// Create a walker, checking that `root` exists and is a directory
    ///
    /// Fails before any entry is produced.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, FingerprintError> {
        let root = root.as_ref();
        let metadata = std::fs::metadata(root).map_err(|_| FingerprintError::RootNotFound {
            path: root.to_path_buf(),
        })?;
        if !metadata.is_dir() {
            return Err(FingerprintError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let root = canonicalize_root(root)?;
        let inner = WalkDir::new(&root)
            .follow_links(false)
            .min_depth(1)
            .into_iter();

        Ok(Self { root, inner })
    }

    /// Canonical root being walked
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Iterator for TreeWalker {
    type Item = WalkItem;

    fn next(&mut self) -> Option<WalkItem> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    let reason = err
                        .io_error()
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| err.to_string());
                    if path == self.root {
                        return Some(WalkItem::Fatal { path, reason });
                    }
                    return Some(WalkItem::Skipped { path, reason });
                }
            };

            let file_type = entry.file_type();
            if file_type.is_file() {
                return Some(WalkItem::File(entry.into_path()));
            }

            if file_type.is_symlink() {
                match std::fs::metadata(entry.path()) {
                    Ok(target) if target.is_file() => {
                        return Some(WalkItem::File(entry.into_path()));
                    }
                    _ => trace!(path = %entry.path().display(), "Skipping non-file symlink"),
                }
            }
        }
    }
}
