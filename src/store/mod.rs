//! Custody Store
//!
//! Persists registered custody records. The store owns the uniqueness
//! constraint on tree digests: `insert` must reject a second record with the
//! same digest even when two callers race.

pub mod memory;
pub mod persistence;
pub mod record;

pub use memory::MemoryCustodyStore;
pub use persistence::SledCustodyStore;
pub use record::{CaseDetails, CustodyRecord, Officer};

use crate::error::StorageError;
use crate::types::TreeDigest;
use std::path::Path;

/// Custody store interface
pub trait CustodyStore: Send + Sync {
    fn contains_digest(&self, digest: &TreeDigest) -> Result<bool, StorageError>;

    fn get_by_digest(&self, digest: &TreeDigest) -> Result<Option<CustodyRecord>, StorageError>;

    fn get_by_document(&self, document_number: &str)
        -> Result<Option<CustodyRecord>, StorageError>;

    /// Atomically insert a new record
    ///
    /// Fails with `DuplicateDigest` when the digest is already present and
    /// `DuplicateDocument` when the document number is taken. Nothing is
    /// written in either case.
    fn insert(&self, record: &CustodyRecord) -> Result<(), StorageError>;

    /// Most recent records first, at most `limit`
    fn list_recent(&self, limit: usize) -> Result<Vec<CustodyRecord>, StorageError>;

    /// Set the report path of an existing record and return the updated record
    fn attach_report(&self, document_number: &str, path: &Path)
        -> Result<CustodyRecord, StorageError>;
}
