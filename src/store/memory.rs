//! In-memory Custody Store

use crate::error::StorageError;
use crate::store::{CustodyRecord, CustodyStore};
use crate::types::TreeDigest;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Default)]
struct MemoryState {
    records: BTreeMap<TreeDigest, CustodyRecord>,
    documents: BTreeMap<String, TreeDigest>,
}

/// Mutex-guarded map store with the same uniqueness contract as the sled store
#[derive(Default)]
pub struct MemoryCustodyStore {
    state: Mutex<MemoryState>,
}

impl MemoryCustodyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CustodyStore for MemoryCustodyStore {
    fn contains_digest(&self, digest: &TreeDigest) -> Result<bool, StorageError> {
        Ok(self.state.lock().records.contains_key(digest))
    }

    fn get_by_digest(&self, digest: &TreeDigest) -> Result<Option<CustodyRecord>, StorageError> {
        Ok(self.state.lock().records.get(digest).cloned())
    }

    fn get_by_document(
        &self,
        document_number: &str,
    ) -> Result<Option<CustodyRecord>, StorageError> {
        let state = self.state.lock();
        Ok(state
            .documents
            .get(document_number)
            .and_then(|digest| state.records.get(digest))
            .cloned())
    }

    fn insert(&self, record: &CustodyRecord) -> Result<(), StorageError> {
        let mut state = self.state.lock();
        if state.records.contains_key(&record.digest) {
            return Err(StorageError::DuplicateDigest(record.digest.clone()));
        }
        if state.documents.contains_key(&record.document_number) {
            return Err(StorageError::DuplicateDocument(record.document_number.clone()));
        }
        state
            .documents
            .insert(record.document_number.clone(), record.digest.clone());
        state.records.insert(record.digest.clone(), record.clone());
        Ok(())
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<CustodyRecord>, StorageError> {
        let state = self.state.lock();
        let mut records: Vec<CustodyRecord> = state.records.values().cloned().collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.document_number.cmp(&a.document_number))
        });
        records.truncate(limit);
        Ok(records)
    }

    fn attach_report(
        &self,
        document_number: &str,
        path: &Path,
    ) -> Result<CustodyRecord, StorageError> {
        let mut state = self.state.lock();
        let digest = state
            .documents
            .get(document_number)
            .cloned()
            .ok_or_else(|| StorageError::RecordNotFound(document_number.to_string()))?;
        let record = state
            .records
            .get_mut(&digest)
            .ok_or_else(|| StorageError::RecordNotFound(document_number.to_string()))?;
        record.report_path = Some(path.to_path_buf());
        Ok(record.clone())
    }
}
