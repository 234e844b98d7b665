//! Core types for the custody fingerprinting system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hash: raw 256-bit SHA-256 output
pub type Hash = [u8; 32];

/// Length of a hex-encoded SHA-256 digest
pub const DIGEST_HEX_LEN: usize = 64;

/// Tree digest in its canonical textual form: 64 lowercase hex characters.
///
/// This is the form that is persisted, compared and displayed. Truncated
/// forms (see [`TreeDigest::short`]) are for display only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TreeDigest(String);

impl TreeDigest {
    /// Wrap raw hash bytes.
    pub fn from_bytes(bytes: &Hash) -> Self {
        Self(hex::encode(bytes))
    }

    /// Parse a digest from user input. Upper-case hex is accepted and lowered.
    pub fn parse(input: &str) -> Result<Self, InvalidDigest> {
        let trimmed = input.trim();
        if trimmed.len() != DIGEST_HEX_LEN {
            return Err(InvalidDigest {
                input: trimmed.to_string(),
                reason: format!("expected {} hex characters, got {}", DIGEST_HEX_LEN, trimmed.len()),
            });
        }
        if !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidDigest {
                input: trimmed.to_string(),
                reason: "contains non-hex characters".to_string(),
            });
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display prefix, e.g. `e3b0c44298fc1c14...`
    pub fn short(&self) -> String {
        format!("{}...", self.0.get(..16).unwrap_or(&self.0))
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TreeDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TreeDigest {
    type Err = InvalidDigest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TreeDigest {
    type Error = InvalidDigest;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TreeDigest> for String {
    fn from(digest: TreeDigest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for TreeDigest {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Rejected digest text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid digest {input:?}: {reason}")]
pub struct InvalidDigest {
    pub input: String,
    pub reason: String,
}
