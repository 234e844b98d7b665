//! Custody record domain types

use crate::error::IntakeError;
use crate::intake::{require, validate_badge_number};
use crate::tree::inventory::FileEntry;
use crate::types::TreeDigest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Officer responsible for the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Officer {
    pub full_name: String,
    /// Letters and digits only
    pub badge_number: String,
    pub rank: Option<String>,
    pub unit: Option<String>,
}

impl Officer {
    /// Validated officer. Blank optional fields become `None`.
    pub fn new(
        full_name: &str,
        badge_number: &str,
        rank: Option<&str>,
        unit: Option<&str>,
    ) -> Result<Self, IntakeError> {
        Ok(Self {
            full_name: require(full_name, "officer name")?,
            badge_number: validate_badge_number(badge_number)?,
            rank: optional(rank),
            unit: optional(unit),
        })
    }
}

/// Case the evidence belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDetails {
    pub procedure_number: String,
    pub crime_scene: String,
    pub collected_at: DateTime<Utc>,
    pub notes: Option<String>,
}

impl CaseDetails {
    pub fn new(
        procedure_number: &str,
        crime_scene: &str,
        collected_at: DateTime<Utc>,
        notes: Option<&str>,
    ) -> Result<Self, IntakeError> {
        Ok(Self {
            procedure_number: require(procedure_number, "procedure number")?,
            crime_scene: require(crime_scene, "crime scene")?,
            collected_at,
            notes: optional(notes),
        })
    }
}

/// A registered evidence tree
///
/// Created once at registration. The only later change is attaching a
/// report path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyRecord {
    pub document_number: String,
    pub digest: TreeDigest,
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::tree::path::lossy")]
    pub folder_path: PathBuf,
    pub total_size_bytes: u64,
    pub file_count: usize,
    pub failed_count: usize,
    pub officer: Officer,
    pub case: CaseDetails,
    /// Remarks recorded at registration, separate from the case notes
    pub notes: Option<String>,
    pub files: Vec<FileEntry>,
    pub report_path: Option<PathBuf>,
}

pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
