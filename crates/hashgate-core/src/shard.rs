//! # Shard-Path Splitting
//!
//! Splits a hex digest into fixed-width prefix directories plus a
//! remainder segment, bounding directory fan-out in the hashstore.
//! With the standard layout (width 2, depth 3) a 64-character digest
//! becomes `ab/cd/ef/<58 remaining chars>`.
//!
//! ## Round-Trip Invariant
//!
//! Concatenating the segments of a split, in order, reproduces the input
//! string exactly. Segment count is always `depth + 1`.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::digest::{Digest, DIGEST_HEX_LEN};

/// Error splitting a hex string into shard segments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShardError {
    /// The input is shorter than `width * depth` characters.
    ///
    /// A well-formed SHA-256 digest is always 64 characters, so a short
    /// input means corrupted store state. Splitting it anyway would
    /// fabricate paths that can never match what the writing store laid
    /// down, so this is an explicit error rather than a truncation.
    #[error("digest too short to shard: {len} chars, need at least {need}")]
    DigestTooShort {
        /// Length of the offending input.
        len: usize,
        /// Minimum length required by the layout (`width * depth`).
        need: usize,
    },

    /// The layout's prefix region (`width * depth`) exceeds the digest
    /// hex length, so no digest could ever satisfy it.
    #[error("shard layout {width}x{depth} exceeds digest length {DIGEST_HEX_LEN}")]
    LayoutTooWide {
        /// Configured segment width.
        width: usize,
        /// Configured segment depth.
        depth: usize,
    },

    /// The input contains non-ASCII characters and cannot be a hex
    /// digest. Checked up front so segment slicing never lands inside a
    /// multi-byte character.
    #[error("digest contains non-ascii characters")]
    NotAscii,
}

/// Shard layout: `depth` directory levels of `width` hex characters each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardLayout {
    width: usize,
    depth: usize,
}

impl Default for ShardLayout {
    /// The standard hashstore layout: three levels of two characters.
    fn default() -> Self {
        Self { width: 2, depth: 3 }
    }
}

impl ShardLayout {
    /// Create a layout with the given segment width and depth.
    ///
    /// Rejects layouts whose prefix region exceeds the 64 hex characters
    /// of a SHA-256 digest; such a layout could never split any digest
    /// this system produces.
    pub fn new(width: usize, depth: usize) -> Result<Self, ShardError> {
        if width * depth > DIGEST_HEX_LEN {
            return Err(ShardError::LayoutTooWide { width, depth });
        }
        Ok(Self { width, depth })
    }

    /// Segment width in hex characters.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of prefix segments.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Minimum input length this layout can split.
    pub fn min_len(&self) -> usize {
        self.width * self.depth
    }

    /// Split an arbitrary hex string into `depth` prefix segments plus
    /// the remainder.
    ///
    /// Used for strings of unverified provenance (CID hex read from a
    /// reference file, operator input). Inputs shorter than
    /// `width * depth` are refused — see [`ShardError::DigestTooShort`].
    /// An input of exactly `width * depth` characters yields an empty
    /// remainder segment, preserving the round-trip invariant.
    pub fn split_hex(&self, hex: &str) -> Result<ShardedPath, ShardError> {
        if !hex.is_ascii() {
            return Err(ShardError::NotAscii);
        }
        if hex.len() < self.min_len() {
            return Err(ShardError::DigestTooShort {
                len: hex.len(),
                need: self.min_len(),
            });
        }
        let mut segments = Vec::with_capacity(self.depth + 1);
        for d in 0..self.depth {
            segments.push(hex[d * self.width..(d + 1) * self.width].to_string());
        }
        segments.push(hex[self.min_len()..].to_string());
        Ok(ShardedPath { segments })
    }

    /// Split a [`Digest`] into shard segments.
    ///
    /// Infallible: a digest is always 64 hex characters and the layout
    /// constructor guarantees the prefix region fits.
    pub fn split(&self, digest: &Digest) -> ShardedPath {
        // Digest hex length is fixed; the constructor bounds width*depth.
        self.split_hex(&digest.to_hex())
            .expect("64-char digest always satisfies a validated layout")
    }
}

/// An ordered sequence of path segments derived from a digest.
///
/// Joining all segments with `/` and removing the separators reproduces
/// the original digest hex exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShardedPath {
    segments: Vec<String>,
}

impl ShardedPath {
    /// The path segments, prefix groups first, remainder last.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Reassemble the original digest hex (the round-trip invariant).
    pub fn joined(&self) -> String {
        self.segments.concat()
    }

    /// Render as a relative filesystem path.
    pub fn to_rel_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }
}

impl fmt::Display for ShardedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn standard_layout_splits_into_four_segments() {
        let digest = Digest::of("doi:10.5072/FK2/ABC");
        let path = ShardLayout::default().split(&digest);
        assert_eq!(path.segments().len(), 4);
        assert_eq!(path.segments()[0].len(), 2);
        assert_eq!(path.segments()[1].len(), 2);
        assert_eq!(path.segments()[2].len(), 2);
        assert_eq!(path.segments()[3].len(), 58);
    }

    #[test]
    fn split_round_trips_to_digest_hex() {
        let digest = Digest::of("round-trip");
        let path = ShardLayout::default().split(&digest);
        assert_eq!(path.joined(), digest.to_hex());
    }

    #[test]
    fn split_hex_rejects_short_input() {
        let err = ShardLayout::default().split_hex("ab12").unwrap_err();
        assert_eq!(err, ShardError::DigestTooShort { len: 4, need: 6 });
    }

    #[test]
    fn split_hex_exact_prefix_length_has_empty_remainder() {
        let path = ShardLayout::default().split_hex("aabbcc").unwrap();
        assert_eq!(path.segments(), &["aa", "bb", "cc", ""]);
        assert_eq!(path.joined(), "aabbcc");
    }

    #[test]
    fn split_hex_rejects_non_ascii_input() {
        assert_eq!(
            ShardLayout::default().split_hex("ααββγγdd").unwrap_err(),
            ShardError::NotAscii
        );
    }

    #[test]
    fn layout_rejects_prefix_wider_than_digest() {
        assert_eq!(
            ShardLayout::new(8, 9).unwrap_err(),
            ShardError::LayoutTooWide { width: 8, depth: 9 }
        );
    }

    #[test]
    fn custom_layout_width_and_depth() {
        let layout = ShardLayout::new(4, 2).unwrap();
        let digest = Digest::of("custom");
        let path = layout.split(&digest);
        assert_eq!(path.segments().len(), 3);
        assert_eq!(path.segments()[0].len(), 4);
        assert_eq!(path.segments()[1].len(), 4);
        assert_eq!(path.joined(), digest.to_hex());
    }

    #[test]
    fn display_joins_with_slashes() {
        let path = ShardLayout::default().split_hex("a1b2c3d4").unwrap();
        assert_eq!(path.to_string(), "a1/b2/c3/d4");
    }

    #[test]
    fn rel_path_has_one_component_per_segment() {
        let digest = Digest::of("components");
        let rel = ShardLayout::default().split(&digest).to_rel_path();
        assert_eq!(rel.components().count(), 4);
    }

    #[test]
    fn serializes_as_segment_array() {
        let path = ShardLayout::default().split_hex("a1b2c3d4").unwrap();
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!(["a1", "b2", "c3", "d4"]));
    }

    proptest! {
        /// Any hex string at least as long as the prefix region splits
        /// into depth+1 segments whose concatenation is the input.
        #[test]
        fn split_hex_round_trip(hex in "[0-9a-f]{6,64}") {
            let layout = ShardLayout::default();
            let path = layout.split_hex(&hex).unwrap();
            prop_assert_eq!(path.segments().len(), layout.depth() + 1);
            prop_assert_eq!(path.joined(), hex);
        }

        /// Splitting is deterministic across repeated calls.
        #[test]
        fn split_is_pure(input in ".*") {
            let digest = Digest::of(&input);
            let a = ShardLayout::default().split(&digest);
            let b = ShardLayout::default().split(&digest);
            prop_assert_eq!(a, b);
        }
    }
}
