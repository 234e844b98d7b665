//! Per-file hashing and metadata extraction

use crate::error::ProbeError;
use crate::tree::hasher::{hash_reader, DEFAULT_CHUNK_SIZE};
use crate::tree::inventory::FileEntry;
use crate::tree::mime::content_type_for_extension;
use crate::tree::path::{encode_segment, extension_of};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::path::Path;
use tracing::{trace, warn};

/// Best-effort filesystem metadata; fields are `None` when unavailable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMetadata {
    pub size_bytes: Option<u64>,
    pub modified_at: Option<DateTime<Utc>>,
}

/// Reads files and produces inventory entries
///
/// Read-only. A file that cannot be opened or read still produces an entry,
/// with an empty digest and `error` set.
#[derive(Debug, Clone, Copy)]
pub struct FileProber {
    chunk_size: usize,
}

impl Default for FileProber {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl FileProber {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Build the inventory entry for one file
    pub fn probe(&self, relative_path: &str, absolute_path: &Path) -> FileEntry {
        let metadata = self.read_metadata(absolute_path);
        let extension = extension_of(absolute_path);
        let file_name = absolute_path
            .file_name()
            .map(encode_segment)
            .unwrap_or_else(|| relative_path.to_string());

        let (content_digest, error) = match self.hash_file(absolute_path) {
            Ok(digest) => {
                trace!(path = relative_path, digest = %digest, "Hashed file");
                (digest, None)
            }
            Err(err) => {
                warn!(path = relative_path, error = %err, "Unreadable file excluded from digest");
                (String::new(), Some(err.to_string()))
            }
        };

        FileEntry {
            relative_path: relative_path.to_string(),
            absolute_path: absolute_path.to_path_buf(),
            file_name,
            content_type: content_type_for_extension(&extension).to_string(),
            extension,
            size_bytes: metadata.size_bytes,
            modified_at: metadata.modified_at,
            content_digest,
            error,
        }
    }

    /// Stream the file through SHA-256, returning lowercase hex
    pub fn hash_file(&self, path: &Path) -> Result<String, ProbeError> {
        let mut file = File::open(path).map_err(|source| ProbeError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let (digest, _) = hash_reader(&mut file, self.chunk_size).map_err(|source| {
            ProbeError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(digest)
    }

    /// Size and modification time; missing on failure, never an error
    pub fn read_metadata(&self, path: &Path) -> FileMetadata {
        match std::fs::metadata(path) {
            Ok(meta) => FileMetadata {
                size_bytes: Some(meta.len()),
                modified_at: meta.modified().ok().map(DateTime::<Utc>::from),
            },
            Err(err) => {
                trace!(path = %path.display(), error = %err, "Metadata unavailable");
                FileMetadata::default()
            }
        }
    }
}
