#![deny(missing_docs)]

//! # hashgate-core — Foundational Types for the Hashgate Gateway
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `sha2`, and
//! `thiserror` from the external ecosystem, and it performs no I/O.
//!
//! ## Design Principles
//!
//! 1. **[`Digest`] is a newtype, not a string.** A digest that exists has
//!    already been validated (32 bytes, hex-parseable). Raw strings from
//!    reference files must pass through `FromStr` before they can be used
//!    to derive paths.
//!
//! 2. **Path derivation is pure.** [`StoreLayout`] builds every hashstore
//!    path from digests alone — no filesystem access, no error paths for
//!    well-formed digests. The same input always produces the same path.
//!
//! 3. **Malformed shard input is an explicit error.** A hex string shorter
//!    than `width * depth` is corrupted store state; [`ShardLayout`]
//!    refuses it with [`ShardError::DigestTooShort`] rather than silently
//!    truncating or padding.

pub mod digest;
pub mod layout;
pub mod shard;

pub use digest::Digest;
pub use layout::{StoreLayout, SYSMETA_FORMAT_ID};
pub use shard::{ShardError, ShardLayout, ShardedPath};
