//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, RegistryError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Registry(RegistryError::DuplicateFingerprint {
            digest,
            document_number: Some(doc),
        }) => format!(
            "Error: this folder is already registered as {}\n  digest: {}",
            doc, digest
        ),
        _ => format!("Error: {}", e),
    }
}

/// Process exit code for an error
pub fn exit_code(e: &ApiError) -> i32 {
    match e {
        ApiError::IntegrityMismatch { .. } => 3,
        ApiError::Registry(RegistryError::DuplicateFingerprint { .. }) => 2,
        _ => 1,
    }
}
