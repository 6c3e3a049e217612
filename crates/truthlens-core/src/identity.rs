//! Content-based news identifiers
//!
//! A [`NewsId`] is derived from the exact UTF-8 bytes of the submitted text,
//! so the same statement submitted twice always joins to the same feedback
//! rows. No normalization is applied first: a trailing space is a different
//! statement.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Width of the identifier in bytes (128 bits)
const ID_BYTES: usize = 16;

/// Stable 128-bit identifier of a news text, rendered as 32 lowercase hex digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsId(String);

impl NewsId {
    /// Derive the identifier of a raw, untrimmed news text
    pub fn from_text(text: &str) -> Self {
        let digest = Sha256::digest(text.as_bytes());
        let hex = digest[..ID_BYTES]
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<String>();
        Self(hex)
    }

    /// Wrap an identifier received from a client or read from storage
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Hex representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NewsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NewsId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
