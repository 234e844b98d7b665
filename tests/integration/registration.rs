//! Integration tests for duplicate detection through RegistrationGuard

use super::test_utils::{request_for, write_tree};
use custody::error::RegistryError;
use custody::registration::RegistrationGuard;
use custody::store::{CustodyStore, MemoryCustodyStore, SledCustodyStore};
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

const EVIDENCE: &[(&str, &str)] = &[
    ("cam1/0001.mp4", "frame data 1"),
    ("cam1/0002.mp4", "frame data 2"),
    ("phone/chat.txt", "messages"),
];

#[test]
fn test_copy_at_different_root_is_duplicate() {
    let original = TempDir::new().unwrap();
    let copy = TempDir::new().unwrap();
    write_tree(original.path(), EVIDENCE);
    write_tree(&copy.path().join("usb-export"), EVIDENCE);

    let store = MemoryCustodyStore::new();
    let guard = RegistrationGuard::new(&store);

    let first = guard.register(request_for(original.path(), None)).unwrap();
    let second = guard.register(request_for(&copy.path().join("usb-export"), None));

    match second {
        Err(RegistryError::DuplicateFingerprint {
            digest,
            document_number,
        }) => {
            assert_eq!(digest, first.digest);
            assert_eq!(document_number.as_deref(), Some(first.document_number.as_str()));
        }
        other => panic!("expected duplicate, got {:?}", other.map(|r| r.document_number)),
    }
}

#[test]
fn test_check_before_and_after_register() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), EVIDENCE);

    let store = MemoryCustodyStore::new();
    let guard = RegistrationGuard::new(&store);
    let request = request_for(temp_dir.path(), Some("CUST-FIXED-1"));
    let digest = request.fingerprint.digest.clone();

    assert!(guard.check(&digest).is_ok());
    let record = guard.register(request).unwrap();
    assert_eq!(record.document_number, "CUST-FIXED-1");
    assert!(matches!(
        guard.check(&digest),
        Err(RegistryError::DuplicateFingerprint { .. })
    ));
}

#[test]
fn test_explicit_document_number_collision() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_tree(first.path(), &[("a.txt", "a")]);
    write_tree(second.path(), &[("b.txt", "b")]);

    let store = MemoryCustodyStore::new();
    let guard = RegistrationGuard::new(&store);
    guard
        .register(request_for(first.path(), Some("CUST-SAME")))
        .unwrap();
    let err = guard
        .register(request_for(second.path(), Some("CUST-SAME")))
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidRequest(_)));
}

/// Every thread passes the pre-check; the store still admits only one record
#[test]
fn test_racing_registrations_single_success() {
    let temp_dir = TempDir::new().unwrap();
    write_tree(temp_dir.path(), EVIDENCE);
    let store_dir = TempDir::new().unwrap();
    let store = Arc::new(SledCustodyStore::new(store_dir.path().join("store")).unwrap());

    const THREADS: usize = 8;
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            let request = request_for(temp_dir.path(), Some(&format!("CUST-RACE-{}", i)));
            thread::spawn(move || {
                let guard = RegistrationGuard::new(store.as_ref());
                guard.check(&request.fingerprint.digest).unwrap();
                barrier.wait();
                guard.register(request)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let successes = results.iter().filter(|r| r.is_ok()).count();
    let duplicates = results
        .iter()
        .filter(|r| matches!(r, Err(RegistryError::DuplicateFingerprint { .. })))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(duplicates, THREADS - 1);
    assert_eq!(store.list_recent(50).unwrap().len(), 1);
}
