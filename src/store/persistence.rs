//! Persistence layer for the Custody Store

use crate::error::StorageError;
use crate::store::{CustodyRecord, CustodyStore};
use crate::types::TreeDigest;
use sled::transaction::{ConflictableTransactionError, TransactionError, Transactional};
use std::path::Path;
use tracing::{debug, trace};

const RECORDS_TREE: &str = "records";
const DOCUMENTS_TREE: &str = "documents";
const CHRONOLOGY_TREE: &str = "chronology";

/// Which uniqueness constraint rejected an insert
#[derive(Debug, Clone, Copy)]
enum InsertConflict {
    Digest,
    Document,
}

/// Sled-based implementation of CustodyStore
///
/// Three trees: `records` (digest -> bincode record), `documents`
/// (document number -> digest) and `chronology` (creation time + document
/// number -> digest) for newest-first listing.
pub struct SledCustodyStore {
    db: sled::Db,
    records: sled::Tree,
    documents: sled::Tree,
    chronology: sled::Tree,
}

impl SledCustodyStore {
    /// Open (or create) a store at the given directory
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let db = sled::open(path).map_err(|e| {
            StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to open sled database at {}: {}", path.display(), e),
            ))
        })?;
        let records = db.open_tree(RECORDS_TREE)?;
        let documents = db.open_tree(DOCUMENTS_TREE)?;
        let chronology = db.open_tree(CHRONOLOGY_TREE)?;
        debug!(path = %path.display(), records = records.len(), "Opened custody store");
        Ok(Self {
            db,
            records,
            documents,
            chronology,
        })
    }

    /// Number of registered records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn decode(bytes: &[u8]) -> Result<CustodyRecord, StorageError> {
        Ok(bincode::deserialize(bytes)?)
    }

    fn digest_for_document(&self, document_number: &str) -> Result<Option<sled::IVec>, StorageError> {
        Ok(self.documents.get(document_number.as_bytes())?)
    }
}

/// Sort key for the chronology tree: big-endian micros, then document number
fn chronology_key(record: &CustodyRecord) -> Vec<u8> {
    let micros = u64::try_from(record.created_at.timestamp_micros()).unwrap_or(0);
    let mut key = Vec::with_capacity(8 + record.document_number.len());
    key.extend_from_slice(&micros.to_be_bytes());
    key.extend_from_slice(record.document_number.as_bytes());
    key
}

impl CustodyStore for SledCustodyStore {
    fn contains_digest(&self, digest: &TreeDigest) -> Result<bool, StorageError> {
        Ok(self.records.contains_key(digest.as_str().as_bytes())?)
    }

    fn get_by_digest(&self, digest: &TreeDigest) -> Result<Option<CustodyRecord>, StorageError> {
        match self.records.get(digest.as_str().as_bytes())? {
            Some(value) => Ok(Some(Self::decode(&value)?)),
            None => Ok(None),
        }
    }

    fn get_by_document(
        &self,
        document_number: &str,
    ) -> Result<Option<CustodyRecord>, StorageError> {
        let Some(digest) = self.digest_for_document(document_number)? else {
            return Ok(None);
        };
        match self.records.get(&digest)? {
            Some(value) => Ok(Some(Self::decode(&value)?)),
            None => Ok(None),
        }
    }

    fn insert(&self, record: &CustodyRecord) -> Result<(), StorageError> {
        let digest_key = record.digest.as_str().as_bytes();
        let document_key = record.document_number.as_bytes();
        let order_key = chronology_key(record);
        let value = bincode::serialize(record)?;

        let result = (&self.records, &self.documents, &self.chronology).transaction(
            |(records, documents, chronology)| {
                if records.get(digest_key)?.is_some() {
                    return Err(ConflictableTransactionError::Abort(InsertConflict::Digest));
                }
                if documents.get(document_key)?.is_some() {
                    return Err(ConflictableTransactionError::Abort(InsertConflict::Document));
                }
                records.insert(digest_key, value.as_slice())?;
                documents.insert(document_key, digest_key)?;
                chronology.insert(order_key.as_slice(), digest_key)?;
                Ok(())
            },
        );

        match result {
            Ok(()) => {
                self.db.flush()?;
                trace!(document = %record.document_number, digest = %record.digest, "Inserted custody record");
                Ok(())
            }
            Err(TransactionError::Abort(InsertConflict::Digest)) => {
                Err(StorageError::DuplicateDigest(record.digest.clone()))
            }
            Err(TransactionError::Abort(InsertConflict::Document)) => {
                Err(StorageError::DuplicateDocument(record.document_number.clone()))
            }
            Err(TransactionError::Storage(e)) => Err(e.into()),
        }
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<CustodyRecord>, StorageError> {
        let mut out = Vec::new();
        for item in self.chronology.iter().rev().take(limit) {
            let (_, digest) = item?;
            if let Some(value) = self.records.get(&digest)? {
                out.push(Self::decode(&value)?);
            }
        }
        Ok(out)
    }

    fn attach_report(
        &self,
        document_number: &str,
        path: &Path,
    ) -> Result<CustodyRecord, StorageError> {
        let digest = self
            .digest_for_document(document_number)?
            .ok_or_else(|| StorageError::RecordNotFound(document_number.to_string()))?;

        loop {
            let current = self
                .records
                .get(&digest)?
                .ok_or_else(|| StorageError::RecordNotFound(document_number.to_string()))?;
            let mut record = Self::decode(&current)?;
            record.report_path = Some(path.to_path_buf());
            let updated = bincode::serialize(&record)?;

            match self
                .records
                .compare_and_swap(&digest, Some(&current), Some(updated))?
            {
                Ok(()) => {
                    self.db.flush()?;
                    return Ok(record);
                }
                Err(_) => trace!(document = document_number, "Record changed concurrently, retrying"),
            }
        }
    }
}
