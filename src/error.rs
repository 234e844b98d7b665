//! Error types for the custody fingerprinting system.

use crate::types::TreeDigest;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal fingerprinting errors. Per-file problems never surface here.
#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("Root not found: {}", .path.display())]
    RootNotFound { path: PathBuf },

    #[error("Root is not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("Walk aborted at {}: {reason}", .path.display())]
    WalkAborted { path: PathBuf, reason: String },

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(String),
}

impl FingerprintError {
    /// True for the "invalid root" class of failures.
    pub fn is_invalid_root(&self) -> bool {
        matches!(
            self,
            FingerprintError::RootNotFound { .. } | FingerprintError::NotADirectory { .. }
        )
    }
}

/// Per-file failure while opening or reading content.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Digest already registered: {0}")]
    DuplicateDigest(TreeDigest),

    #[error("Document number already in use: {0}")]
    DuplicateDocument(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Record encoding error: {0}")]
    Codec(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

impl From<bincode::Error> for StorageError {
    fn from(err: bincode::Error) -> Self {
        StorageError::Codec(err.to_string())
    }
}

/// Registration errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate fingerprint {digest}{}", existing_suffix(.document_number))]
    DuplicateFingerprint {
        digest: TreeDigest,
        document_number: Option<String>,
    },

    #[error("Invalid registration request: {0}")]
    InvalidRequest(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

fn existing_suffix(document_number: &Option<String>) -> String {
    match document_number {
        Some(doc) => format!(" (already registered as {})", doc),
        None => String::new(),
    }
}

/// Intake validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Path is not a folder: {0}")]
    NotAFolder(String),

    #[error("No files found in folder: {0}")]
    EmptyFolder(String),

    #[error("Badge number must contain only letters and digits: {0:?}")]
    InvalidBadge(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid collection time {0:?} (expected RFC 3339 or YYYY-MM-DD HH:MM)")]
    InvalidTimestamp(String),
}

/// Report rendering errors
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level errors surfaced by the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Integrity check failed for {document}: expected {expected}, found {actual}")]
    IntegrityMismatch {
        document: String,
        expected: TreeDigest,
        actual: TreeDigest,
    },

    #[error("Output error: {0}")]
    Output(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Output(err.to_string())
    }
}
