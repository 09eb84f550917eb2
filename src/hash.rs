//! Content hashing
//!
//! A record's identity is the SHA-256 hex digest of its content bytes.
//! Hashing is deterministic, so storing identical content twice always
//! produces the same digest.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 hex digest identifying a stored record
///
/// Exposed to clients as an opaque string. Client-supplied values are not
/// validated; an unknown digest simply misses on lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Compute the digest of the given content
    pub fn of(content: &str) -> Self {
        let digest = Sha256::digest(content.as_bytes());
        Self(digest.iter().map(|b| format!("{:02x}", b)).collect())
    }

    /// Wrap a digest string received from a client
    pub fn from_string(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The digest as a hex string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
