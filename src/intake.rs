//! Intake validation for registration input

use crate::error::IntakeError;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Trimmed, non-empty value of a required text field
pub fn require(value: &str, field: &'static str) -> Result<String, IntakeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Badge numbers are letters and digits; spaces are dropped
pub fn validate_badge_number(badge: &str) -> Result<String, IntakeError> {
    let compact: String = badge.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(IntakeError::MissingField("badge number"));
    }
    if !compact.chars().all(char::is_alphanumeric) {
        return Err(IntakeError::InvalidBadge(badge.to_string()));
    }
    Ok(compact)
}

/// Check an evidence folder and return its canonical path
///
/// The folder must exist, be a directory and hold at least one regular file
/// somewhere below it.
pub fn validate_evidence_folder(path: &str) -> Result<PathBuf, IntakeError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::MissingField("folder path"));
    }

    let candidate = PathBuf::from(trimmed);
    let metadata = std::fs::metadata(&candidate)
        .map_err(|_| IntakeError::FolderNotFound(trimmed.to_string()))?;
    if !metadata.is_dir() {
        return Err(IntakeError::NotAFolder(trimmed.to_string()));
    }

    let has_file = WalkDir::new(&candidate)
        .min_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .any(|entry| entry.file_type().is_file());
    if !has_file {
        return Err(IntakeError::EmptyFolder(trimmed.to_string()));
    }

    dunce::canonicalize(&candidate).map_err(|_| IntakeError::FolderNotFound(trimmed.to_string()))
}

/// Parse a collection time: RFC 3339, or `YYYY-MM-DD HH:MM` taken as UTC
pub fn parse_collected_at(input: &str) -> Result<DateTime<Utc>, IntakeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::MissingField("collection time"));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(IntakeError::InvalidTimestamp(trimmed.to_string()))
}
