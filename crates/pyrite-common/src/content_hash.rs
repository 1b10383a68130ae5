//! Content hashing for source text and the persistent cache key.
//!
//! Every `SourceFile` carries a `ContentHash` of its current text; the
//! persistent cache key is `hash(toolVersion || configHash || contentHash)`.
//! Centralizing the hash function here means the binder, the cache, and the
//! CLI's `--stats` output all agree on one hex encoding.

use sha2::{Digest, Sha256};
use std::fmt;

/// A SHA-256 digest, rendered as lowercase hex when displayed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        ContentHash(out)
    }

    #[must_use]
    pub fn of_str(text: &str) -> Self {
        Self::of_bytes(text.as_bytes())
    }

    /// Combine this hash with another, producing a new hash that changes if
    /// either input changes. Used to fold `toolVersion`, `configHash`, and
    /// `contentHash` into one cache key.
    #[must_use]
    pub fn combine(&self, other: &ContentHash) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(self.0);
        hasher.update(other.0);
        let digest = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        ContentHash(out)
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        let mut s = String::with_capacity(64);
        for byte in &self.0 {
            use std::fmt::Write;
            let _ = write!(s, "{byte:02x}");
        }
        s
    }

    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 64 {
            return None;
        }
        let mut out = [0u8; 32];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let byte_str = std::str::from_utf8(chunk).ok()?;
            out[i] = u8::from_str_radix(byte_str, 16).ok()?;
        }
        Some(ContentHash(out))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.to_hex())
    }
}

#[cfg(test)]
#[path = "../tests/content_hash_tests.rs"]
mod tests;
