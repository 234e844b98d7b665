//! Registration of fingerprinted evidence trees
//!
//! [`RegistrationGuard`] pre-checks the digest against the store and then
//! hands the record to [`CustodyStore::insert`], which enforces uniqueness
//! atomically. Two racing registrations of the same tree end with exactly one
//! success.

use crate::error::{ApiError, RegistryError, StorageError};
use crate::intake::require;
use crate::store::{CaseDetails, CustodyRecord, CustodyStore, Officer};
use crate::tree::{FingerprintEngine, TreeFingerprint};
use crate::types::TreeDigest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Prefix of generated document numbers
pub const DOCUMENT_PREFIX: &str = "CUST";

/// Human-facing document number: `CUST-<case>-<YYYYmmddHHMMSS>`
///
/// Only ASCII letters, digits, `-` and `_` of the procedure number are kept.
pub fn document_number(procedure_number: &str, at: DateTime<Utc>) -> String {
    format!(
        "{}-{}-{}",
        DOCUMENT_PREFIX,
        clean_identifier(procedure_number),
        at.format("%Y%m%d%H%M%S")
    )
}

/// Keep ASCII letters, digits, `-` and `_`
pub fn clean_identifier(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Validate an operator-supplied document number
///
/// Document numbers end up in report file names, so path separators, control
/// characters and `.`/`..` are rejected.
pub fn validate_document_number(document: &str) -> Result<String, RegistryError> {
    let document =
        require(document, "document number").map_err(|e| RegistryError::InvalidRequest(e.to_string()))?;
    let bad_char = document
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_control());
    if bad_char || document == "." || document == ".." {
        return Err(RegistryError::InvalidRequest(format!(
            "document number {:?} must not contain path separators or control characters",
            document
        )));
    }
    Ok(document)
}

/// Everything needed to register one fingerprinted tree
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub fingerprint: TreeFingerprint,
    pub officer: Officer,
    pub case: CaseDetails,
    pub notes: Option<String>,
    /// Generated from the procedure number when absent
    pub document_number: Option<String>,
}

/// Enforces "a tree is registered at most once"
pub struct RegistrationGuard<'a> {
    store: &'a dyn CustodyStore,
}

impl<'a> RegistrationGuard<'a> {
    pub fn new(store: &'a dyn CustodyStore) -> Self {
        Self { store }
    }

    /// Fail with `DuplicateFingerprint` if `digest` is already registered
    pub fn check(&self, digest: &TreeDigest) -> Result<(), RegistryError> {
        match self.store.get_by_digest(digest)? {
            Some(existing) => Err(RegistryError::DuplicateFingerprint {
                digest: digest.clone(),
                document_number: Some(existing.document_number),
            }),
            None => Ok(()),
        }
    }

    /// Check, build and persist a custody record
    #[instrument(skip_all, fields(digest = %request.fingerprint.digest))]
    pub fn register(&self, request: RegistrationRequest) -> Result<CustodyRecord, RegistryError> {
        let RegistrationRequest {
            fingerprint,
            officer,
            case,
            notes,
            document_number: requested,
        } = request;

        if fingerprint.entry_count == 0 {
            return Err(RegistryError::InvalidRequest(
                "evidence tree contains no files".to_string(),
            ));
        }
        self.check(&fingerprint.digest)?;

        let created_at = Utc::now();
        let document = match requested {
            Some(doc) => validate_document_number(&doc)?,
            None => document_number(&case.procedure_number, created_at),
        };

        let record = CustodyRecord {
            document_number: document,
            digest: fingerprint.digest,
            created_at,
            folder_path: fingerprint.root,
            total_size_bytes: fingerprint.total_size_bytes,
            file_count: fingerprint.entry_count,
            failed_count: fingerprint.failed_count,
            officer,
            case,
            notes,
            files: fingerprint.entries,
            report_path: None,
        };

        match self.store.insert(&record) {
            Ok(()) => {
                info!(
                    document = %record.document_number,
                    files = record.file_count,
                    "Registered evidence tree"
                );
                Ok(record)
            }
            Err(StorageError::DuplicateDigest(digest)) => {
                warn!(digest = %digest, "Lost registration race");
                let existing = match self.store.get_by_digest(&digest) {
                    Ok(found) => found.map(|r| r.document_number),
                    Err(err) => {
                        warn!(digest = %digest, error = %err, "Could not look up winning registration");
                        None
                    }
                };
                Err(RegistryError::DuplicateFingerprint {
                    digest,
                    document_number: existing,
                })
            }
            Err(StorageError::DuplicateDocument(doc)) => Err(RegistryError::InvalidRequest(
                format!("document number {} is already in use", doc),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

/// Result of re-fingerprinting a registered tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verification {
    pub document_number: String,
    pub expected: TreeDigest,
    pub actual: TreeDigest,
    pub matches: bool,
    pub fingerprint: TreeFingerprint,
}

/// Re-fingerprint `path` and compare against the record for `document_number`
pub fn verify(
    store: &dyn CustodyStore,
    engine: &FingerprintEngine,
    document_number: &str,
    path: &Path,
) -> Result<Verification, ApiError> {
    let record = store
        .get_by_document(document_number)?
        .ok_or_else(|| ApiError::DocumentNotFound(document_number.to_string()))?;
    let fingerprint = engine.fingerprint(path)?;
    let matches = fingerprint.digest == record.digest;
    if !matches {
        warn!(
            document = document_number,
            expected = %record.digest,
            actual = %fingerprint.digest,
            "Evidence tree no longer matches registered digest"
        );
    }
    Ok(Verification {
        document_number: record.document_number,
        expected: record.digest,
        actual: fingerprint.digest.clone(),
        matches,
        fingerprint,
    })
}
