//! Integration tests for report rendering of registered trees

use super::test_utils::{request_for, write_tree};
use chrono::{TimeZone, Utc};
use custody::registration::RegistrationGuard;
use custody::report::{format_size, ReportRenderer};
use custody::store::{CustodyStore, MemoryCustodyStore};
use tempfile::TempDir;

#[test]
fn test_report_for_registered_tree() {
    let evidence = TempDir::new().unwrap();
    write_tree(
        evidence.path(),
        &[
            ("video/a.mp4", "aaaa"),
            ("video/b.MP4", "bbbbbbbb"),
            ("docs/statement.pdf", "pdf"),
            ("LICENSE", "text"),
        ],
    );
    let out = TempDir::new().unwrap();

    let store = MemoryCustodyStore::new();
    let record = RegistrationGuard::new(&store)
        .register(request_for(evidence.path(), None))
        .unwrap();

    let at = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
    let path = ReportRenderer::new(out.path())
        .render_at(&record, at)
        .unwrap();
    assert_eq!(
        path.file_name().unwrap().to_string_lossy(),
        format!("custody_{}_20240506_070809.txt", record.document_number)
    );

    let updated = store.attach_report(&record.document_number, &path).unwrap();
    assert_eq!(updated.report_path.as_deref(), Some(path.as_path()));

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains(record.digest.as_str()));
    assert!(text.contains("Warehouse 4, dock B"));
    assert!(text.contains("AB1234"));
    assert!(text.contains("video/b.MP4"));
    assert!(text.contains(".mp4"));
    assert!(text.contains(".pdf"));
    assert!(text.contains("(no extension)"));
    assert!(text.contains(&format_size(record.total_size_bytes)));
}

#[test]
fn test_renderer_creates_output_dir() {
    let evidence = TempDir::new().unwrap();
    write_tree(evidence.path(), &[("a.txt", "a")]);
    let out = TempDir::new().unwrap();
    let nested = out.path().join("reports").join("2024");

    let store = MemoryCustodyStore::new();
    let record = RegistrationGuard::new(&store)
        .register(request_for(evidence.path(), None))
        .unwrap();
    let path = ReportRenderer::new(&nested).render(&record).unwrap();
    assert!(path.starts_with(&nested));
    assert!(path.exists());
}
