//! Custody: Evidence Folder Fingerprinting and Chain of Custody
//!
//! Computes a deterministic SHA-256 fingerprint of a directory tree together
//! with a per-file inventory, and keeps a register of fingerprinted trees in
//! which each tree can be recorded only once.

pub mod cli;
pub mod config;
pub mod error;
pub mod intake;
pub mod logging;
pub mod registration;
pub mod report;
pub mod store;
pub mod tree;
pub mod types;
