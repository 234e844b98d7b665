//! Hash computation for evidence files and trees using SHA-256

use crate::types::{Hash, TreeDigest};
use sha2::{Digest, Sha256};
use std::io::Read;

/// Default read size for streaming content hashes
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Compute a SHA-256 hash of arbitrary bytes
pub fn compute_hash(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Lowercase hex SHA-256 of arbitrary bytes
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(compute_hash(data))
}

/// Stream a reader through SHA-256 in `chunk_size` pieces
///
/// Returns the lowercase hex digest and the number of bytes consumed.
pub fn hash_reader<R: Read>(reader: &mut R, chunk_size: usize) -> std::io::Result<(String, u64)> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut total: u64 = 0;

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..read]);
        total += read as u64;
    }

    Ok((hex::encode(hasher.finalize()), total))
}

/// Canonical digest line for one file: `<relative_path>:<content_digest>`
pub fn digest_line(relative_path: &str, content_digest: &str) -> String {
    format!("{}:{}", relative_path, content_digest)
}

/// Concatenate digest lines with no separator between records
///
/// Pairs must already be in sorted order. The missing delimiter is the legacy
/// combination rule and is kept bit-for-bit; names containing `:` can in
/// principle make two different trees produce the same concatenation.
pub fn combine_lines<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut combined = String::new();
    for (relative_path, content_digest) in pairs {
        combined.push_str(&digest_line(relative_path, content_digest));
    }
    combined
}

/// Tree digest over sorted `(relative_path, content_digest)` pairs
pub fn tree_digest<'a, I>(pairs: I) -> TreeDigest
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let combined = combine_lines(pairs);
    TreeDigest::from_bytes(&compute_hash(combined.as_bytes()))
}
