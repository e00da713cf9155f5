//! # Two-Hop Resolution
//!
//! Walks `PID → pid-reference file → CID → object path`, reading the
//! reference files the writing store laid down. Missing references are
//! structured results, not faults: the orchestration layer maps them
//! onto not-found responses.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use hashgate_core::digest::DigestParseError;
use hashgate_core::{Digest, ShardedPath, StoreLayout};

/// Which reference file a resolution failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// `refs/pids/...` — maps a PID to its CID.
    PidRef,
    /// `refs/cids/...` — reverse index entry for a CID.
    CidRef,
}

impl RefKind {
    /// Human-readable name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PidRef => "pid reference",
            Self::CidRef => "cid reference",
        }
    }
}

/// Error resolving a PID through the store's reference files.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A reference file is missing — the PID (or its CID entry) is not
    /// in the store. Always recoverable; maps to a not-found response.
    #[error("{} not found at {}", kind.as_str(), path.display())]
    RefNotFound {
        /// Which reference file was missing.
        kind: RefKind,
        /// The path that was probed.
        path: PathBuf,
    },

    /// A pid-reference file exists but its content is not a hex CID.
    /// Corrupted store state.
    #[error("malformed cid in reference file {}: {source}", path.display())]
    BadRef {
        /// The offending reference file.
        path: PathBuf,
        /// The underlying parse failure.
        #[source]
        source: DigestParseError,
    },

    /// A reference file could not be read for a reason other than
    /// absence (permissions, I/O).
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ResolveError {
    fn from_read(kind: RefKind, path: PathBuf, e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            Self::RefNotFound { kind, path }
        } else {
            Self::Io { path, source: e }
        }
    }
}

/// A fully resolved PID: every derived location plus the reference-file
/// contents that connect the two hops.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// The PID as presented.
    pub pid: String,
    /// Digest of the PID.
    pub pid_digest: Digest,
    /// Sharded form of the PID digest.
    pub pid_shards: ShardedPath,
    /// Path of the pid-reference file.
    pub pid_ref_path: PathBuf,
    /// The CID parsed from the pid-reference file.
    pub cid: Digest,
    /// Path of the cid-reference entry.
    pub cid_ref_path: PathBuf,
    /// Raw contents of the cid-reference entry (the PIDs referencing
    /// this CID, one per line, as written by the store).
    pub cid_ref_value: String,
    /// Path of the object bytes under the object mount.
    pub object_path: PathBuf,
}

/// Resolves PIDs to object locations through the store's reference files.
#[derive(Debug, Clone)]
pub struct Resolver {
    layout: StoreLayout,
}

impl Resolver {
    /// Create a resolver over the given layout.
    pub fn new(layout: StoreLayout) -> Self {
        Self { layout }
    }

    /// The path layout this resolver derives locations from.
    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// First hop: read the pid-reference file and parse the CID it names.
    pub async fn read_pid_ref(&self, pid: &str) -> Result<Digest, ResolveError> {
        let path = self.layout.pid_ref_path(pid);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ResolveError::from_read(RefKind::PidRef, path.clone(), e))?;
        raw.trim()
            .parse()
            .map_err(|source| ResolveError::BadRef { path, source })
    }

    /// Second hop: read the cid-reference entry for a CID.
    pub async fn read_cid_ref(&self, cid: &Digest) -> Result<String, ResolveError> {
        let path = self.layout.cid_ref_path(cid);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ResolveError::from_read(RefKind::CidRef, path.clone(), e))
    }

    /// Resolve a PID all the way to its object location, reading both
    /// reference hops.
    pub async fn resolve(&self, pid: &str) -> Result<Resolution, ResolveError> {
        let cid = self.read_pid_ref(pid).await?;
        let cid_ref_value = self.read_cid_ref(&cid).await?;
        Ok(Resolution {
            pid: pid.to_string(),
            pid_digest: self.layout.pid_digest(pid),
            pid_shards: self.layout.pid_shards(pid),
            pid_ref_path: self.layout.pid_ref_path(pid),
            cid_ref_path: self.layout.cid_ref_path(&cid),
            object_path: self.layout.object_path(&cid),
            cid,
            cid_ref_value,
        })
    }
}
