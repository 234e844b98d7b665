//! Path canonicalization and relative-path normalization utilities

use crate::error::FingerprintError;
use std::ffi::OsStr;
use std::fmt::Write as _;
use std::path::{Component, Path, PathBuf};

/// Canonicalize a root directory for walking
///
/// Resolves `.`/`..` and symlinks with `dunce` so that Windows paths stay in
/// their familiar (non-UNC) form. Missing roots map to `RootNotFound`.
pub fn canonicalize_root(path: &Path) -> Result<PathBuf, FingerprintError> {
    dunce::canonicalize(path).map_err(|_| FingerprintError::RootNotFound {
        path: path.to_path_buf(),
    })
}

/// Relative path of `path` under `root`, joined with `/`
///
/// The separator is always a forward slash regardless of platform, so that
/// identical trees produce identical digest input on every OS. Non-UTF-8
/// segments go through [`encode_segment`].
pub fn relative_path_string(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(encode_segment(name)),
            _ => None,
        })
        .collect();
    segments.join("/")
}

/// One path segment as text
///
/// UTF-8 names are returned unchanged. Otherwise each invalid byte becomes
/// `\xNN` and a literal backslash becomes `\\`, so two distinct non-UTF-8
/// names never share an encoding.
pub fn encode_segment(name: &OsStr) -> String {
    match name.to_str() {
        Some(text) => text.to_string(),
        None => escape_invalid_utf8(&segment_bytes(name)),
    }
}

#[cfg(unix)]
fn segment_bytes(name: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    name.as_bytes().to_vec()
}

// Non-unix names are UTF-16; unpaired surrogates become U+FFFD.
#[cfg(not(unix))]
fn segment_bytes(name: &OsStr) -> Vec<u8> {
    name.to_string_lossy().into_owned().into_bytes()
}

fn escape_invalid_utf8(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                push_escaped(&mut out, valid);
                return out;
            }
            Err(err) => {
                let (valid, rest) = bytes.split_at(err.valid_up_to());
                push_escaped(&mut out, std::str::from_utf8(valid).unwrap_or_default());
                let invalid = err.error_len().unwrap_or(rest.len());
                for byte in &rest[..invalid] {
                    let _ = write!(out, "\\x{:02x}", byte);
                }
                bytes = &rest[invalid..];
            }
        }
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        if ch == '\\' {
            out.push_str("\\\\");
        } else {
            out.push(ch);
        }
    }
}

/// Serde adapter writing paths as lossy UTF-8 strings; the `PathBuf` impl
/// rejects non-UTF-8 paths.
pub mod lossy {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::path::{Path, PathBuf};

    pub fn serialize<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&path.to_string_lossy())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PathBuf, D::Error> {
        String::deserialize(deserializer).map(PathBuf::from)
    }
}

/// Lowercased extension with a leading dot, or an empty string
pub fn extension_of(path: &Path) -> String {
    match path.extension() {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_string_lossy().to_lowercase()),
        _ => String::new(),
    }
}
