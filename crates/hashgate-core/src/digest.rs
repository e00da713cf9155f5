//! # Content Digest — SHA-256 Identifier Hashing
//!
//! Defines [`Digest`], the SHA-256 digest type used for every identifier
//! in the hashstore: PID digests, metadata-document digests, and content
//! identifiers (CIDs) alike.
//!
//! ## Determinism Invariant
//!
//! `Digest::of` hashes the UTF-8 encoding of its input and nothing else.
//! The same input string always produces the same digest, including the
//! empty string. There is no error path — hashing is a total function.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256};
use thiserror::Error;

/// Number of bytes in a SHA-256 digest.
pub const DIGEST_LEN: usize = 32;

/// Number of hex characters in the rendered form of a digest.
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// A SHA-256 digest over the UTF-8 encoding of an identifier or over
/// object content.
///
/// Rendered as 64 lowercase hex characters. Both the externally-issued
/// PID and the content identifier (CID) of an object are addressed
/// through this type — the two are distinguished by how they are
/// *derived* (PID digests from the identifier string, CIDs from object
/// bytes by the writing store), never by shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Hash the UTF-8 encoding of `input`.
    ///
    /// Deterministic and total: any finite string, including the empty
    /// string, produces a digest.
    pub fn of(input: &str) -> Self {
        let hash = Sha256::digest(input.as_bytes());
        let mut bytes = [0u8; DIGEST_LEN];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    /// Construct a digest from raw bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Render the digest as a lowercase hex string (64 characters).
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// Error parsing a hex string into a [`Digest`].
///
/// Raised when interpreting reference-file contents: a pid-reference
/// file is expected to contain exactly the 64-hex-character CID of the
/// object it points at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestParseError {
    /// The string is not exactly 64 characters long.
    #[error("digest must be {DIGEST_HEX_LEN} hex chars, got {0}")]
    BadLength(usize),
    /// The string contains a non-hex character.
    #[error("invalid hex character at position {0}")]
    BadChar(usize),
}

impl FromStr for Digest {
    type Err = DigestParseError;

    /// Parse 64 hex characters (either case) into a digest.
    ///
    /// Surrounding whitespace is the caller's problem — reference files
    /// are trimmed before parsing, not here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != DIGEST_HEX_LEN {
            return Err(DigestParseError::BadLength(s.len()));
        }
        let mut bytes = [0u8; DIGEST_LEN];
        for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|_| DigestParseError::BadChar(i * 2))?;
            bytes[i] =
                u8::from_str_radix(pair, 16).map_err(|_| DigestParseError::BadChar(i * 2))?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
