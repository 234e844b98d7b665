//! Integration tests for the custody fingerprinting system

mod file_failures;
mod fingerprint_determinism;
mod partial_failure;
mod registration;
mod report;
mod test_utils;
