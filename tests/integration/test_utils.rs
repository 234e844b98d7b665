//! Shared test utilities for integration tests

use chrono::{TimeZone, Utc};
use custody::registration::RegistrationRequest;
use custody::store::{CaseDetails, Officer};
use custody::tree::FingerprintEngine;
use std::fs;
use std::path::Path;

/// Write `(relative_path, content)` pairs below `root`, creating parents
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

pub fn officer() -> Officer {
    Officer::new("Ana Souza", "AB1234", Some("Inspector"), Some("Digital Forensics")).unwrap()
}

pub fn case(procedure_number: &str) -> CaseDetails {
    let collected_at = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
    CaseDetails::new(procedure_number, "Warehouse 4, dock B", collected_at, None).unwrap()
}

/// Registration request for the tree at `root`
pub fn request_for(root: &Path, document_number: Option<&str>) -> RegistrationRequest {
    RegistrationRequest {
        fingerprint: FingerprintEngine::default().fingerprint(root).unwrap(),
        officer: officer(),
        case: case("123/2024"),
        notes: None,
        document_number: document_number.map(str::to_string),
    }
}

/// True when the test process runs as root (permission tests are meaningless then)
#[cfg(unix)]
pub fn running_as_root() -> bool {
    use std::os::unix::fs::MetadataExt;
    let temp_dir = tempfile::TempDir::new().unwrap();
    let probe = temp_dir.path().join("owner");
    fs::write(&probe, "x").unwrap();
    fs::metadata(&probe).unwrap().uid() == 0
}
