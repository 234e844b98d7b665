//! Property-based tests for fingerprint guarantees

mod determinism;
