//! # Hashstore Path Layout
//!
//! Pure derivation of every on-disk location the gateway reads. No I/O
//! happens here — the layout turns digests into paths and nothing else,
//! so identical inputs always yield identical paths.
//!
//! ## On-Disk Shape
//!
//! ```text
//! <root>/refs/pids/<aa>/<bb>/<cc>/<rest>              pid-reference file,
//!                                                     content = hex CID
//! <root>/refs/cids/<aa>/<bb>/<cc>/<rest>              cid-reference entry
//! <root>/metadata/<aa>/<bb>/<cc>/<rest>/<meta-hex>    system metadata doc
//! <objects>/<aa>/<bb>/<cc>/<rest>                     raw object bytes
//! ```
//!
//! The metadata document sits *inside* the PID's shard directory under a
//! second, independent digest computed over the PID concatenated with
//! [`SYSMETA_FORMAT_ID`]. That constant must match what the writing
//! store used bit-exactly; a mismatch does not error, it simply resolves
//! to a path where no file exists.

use std::path::{Path, PathBuf};

use crate::digest::Digest;
use crate::shard::{ShardLayout, ShardedPath};

/// Format identifier mixed into the metadata-document digest.
///
/// Identifies the schema/version of the system metadata document. The
/// writing store derives the metadata filename from
/// `digest(pid + SYSMETA_FORMAT_ID)`; this constant being non-empty is
/// what keeps the metadata digest distinct from the PID's own digest.
pub const SYSMETA_FORMAT_ID: &str = "https://ns.dataone.org/service/types/v2.0#SystemMetadata";

/// Canonical path layout of a hashstore.
///
/// `root` holds references and metadata; `object_root` holds the raw
/// object bytes (typically `<root>/objects`, but the object tree may be
/// mounted elsewhere).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    root: PathBuf,
    object_root: PathBuf,
    shards: ShardLayout,
}

impl StoreLayout {
    /// Create the standard layout rooted at `root`, with objects under
    /// `<root>/objects` and the default 2x3 shard layout.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let object_root = root.join("objects");
        Self {
            root,
            object_root,
            shards: ShardLayout::default(),
        }
    }

    /// Override the object mount root.
    pub fn with_object_root(mut self, object_root: impl Into<PathBuf>) -> Self {
        self.object_root = object_root.into();
        self
    }

    /// Override the shard layout.
    pub fn with_shards(mut self, shards: ShardLayout) -> Self {
        self.shards = shards;
        self
    }

    /// The store root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The object mount root directory.
    pub fn object_root(&self) -> &Path {
        &self.object_root
    }

    /// The shard layout in effect.
    pub fn shards(&self) -> &ShardLayout {
        &self.shards
    }

    /// Digest of the PID itself.
    pub fn pid_digest(&self, pid: &str) -> Digest {
        Digest::of(pid)
    }

    /// Sharded form of the PID digest.
    pub fn pid_shards(&self, pid: &str) -> ShardedPath {
        self.shards.split(&Digest::of(pid))
    }

    /// Digest locating the system metadata document for a PID.
    ///
    /// Computed over the PID concatenated with [`SYSMETA_FORMAT_ID`] —
    /// a second, independent digest, never equal to the PID digest.
    pub fn sysmeta_digest(&self, pid: &str) -> Digest {
        Digest::of(&format!("{pid}{SYSMETA_FORMAT_ID}"))
    }

    /// Path of the pid-reference file for a PID.
    ///
    /// The file's content is the hex CID of the referenced object.
    pub fn pid_ref_path(&self, pid: &str) -> PathBuf {
        self.root
            .join("refs")
            .join("pids")
            .join(self.pid_shards(pid).to_rel_path())
    }

    /// Path of the system metadata document for a PID.
    pub fn metadata_path(&self, pid: &str) -> PathBuf {
        self.root
            .join("metadata")
            .join(self.pid_shards(pid).to_rel_path())
            .join(self.sysmeta_digest(pid).to_hex())
    }

    /// Path of the cid-reference entry for a CID.
    pub fn cid_ref_path(&self, cid: &Digest) -> PathBuf {
        self.root
            .join("refs")
            .join("cids")
            .join(self.shards.split(cid).to_rel_path())
    }

    /// Path of the raw object bytes for a CID, under the object mount.
    pub fn object_path(&self, cid: &Digest) -> PathBuf {
        self.object_root.join(self.shards.split(cid).to_rel_path())
    }
}
