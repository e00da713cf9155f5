#![deny(missing_docs)]

//! # hashgate-store — Read Side of the Hashstore
//!
//! Everything that touches the store's filesystem lives here: the
//! two-hop resolution from PID to object bytes, retrieval of the system
//! metadata document, and the typed access-policy model parsed from it.
//!
//! ## Two-Hop Invariant
//!
//! A PID never locates its object directly. The pid-reference file holds
//! the hex CID of the object's content digest, and the object lives at
//! the CID's shard path. Two different PIDs may point at the same CID
//! (deduplication); collapsing the hops would break that, so both are
//! preserved: `PID → pid-ref file → CID → object`.
//!
//! ## Failure Posture
//!
//! Reads of the metadata document fold every failure into "absent" —
//! the caller can never distinguish a missing document from an
//! unreadable one, by design. Reference resolution, by contrast,
//! surfaces a structured [`ResolveError`] so the orchestration layer can
//! map missing references onto a not-found response.

pub mod metadata;
pub mod resolve;
pub mod sysmeta;

pub use metadata::MetadataStore;
pub use resolve::{RefKind, Resolution, ResolveError, Resolver};
pub use sysmeta::{AccessPolicy, AllowRule, SystemMetadata};
