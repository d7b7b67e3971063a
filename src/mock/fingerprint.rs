//! Hash Key Deriver
//!
//! Derives the store key for a (path, canonical payload) pair.

use std::fmt;

use serde::Serialize;
use sha1::{Digest, Sha1};

// == Fingerprint ==
/// 40-character lowercase hex SHA-1 digest identifying a mock record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// The hex digest as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// SHA-1 over `path` immediately followed by `canonical_payload`.
///
/// SHA-1 serves as a well-distributed fixed-length key here, not as a
/// security primitive.
pub fn fingerprint(path: &str, canonical_payload: &str) -> Fingerprint {
    let mut hasher = Sha1::new();
    hasher.update(path.as_bytes());
    hasher.update(canonical_payload.as_bytes());
    Fingerprint(hex::encode(hasher.finalize()))
}
