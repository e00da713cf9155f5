//! # Application State & Configuration
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Statelessness
//!
//! The state holds no mutable data: a path layout, the read-side store
//! handles, and the coordinating-node client. Every resolution and
//! authorization is recomputed per request — there is no cache to
//! invalidate and no lock to hold. Cloning is cheap (`PathBuf`s and a
//! pooled `reqwest::Client`).

use std::path::PathBuf;

use hashgate_authz::{AuthzEngine, CnClient};
use hashgate_core::StoreLayout;
use hashgate_store::{MetadataStore, Resolver};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Root of the hashstore (references and metadata).
    pub store_root: PathBuf,
    /// Object mount root; defaults to `<store_root>/objects`.
    pub object_root: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 8080)
    /// - `HASHSTORE_ROOT` (default: `/data/hashstore`)
    /// - `HASHSTORE_OBJECT_ROOT` (default: `<HASHSTORE_ROOT>/objects`)
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let store_root = std::env::var("HASHSTORE_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/data/hashstore"));
        let object_root = std::env::var("HASHSTORE_OBJECT_ROOT").ok().map(PathBuf::from);
        Self {
            port,
            store_root,
            object_root,
        }
    }

    /// Build the store layout this configuration describes.
    pub fn layout(&self) -> StoreLayout {
        let layout = StoreLayout::new(&self.store_root);
        match &self.object_root {
            Some(root) => layout.with_object_root(root),
            None => layout,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            store_root: PathBuf::from("/data/hashstore"),
            object_root: None,
        }
    }
}

/// Shared application state accessible to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Two-hop PID resolution.
    pub resolver: Resolver,
    /// System metadata access.
    pub metadata: MetadataStore,
    /// Read-authorization engine.
    pub engine: AuthzEngine,
}

impl AppState {
    /// Assemble the state from a store layout and a coordinating-node
    /// client.
    pub fn new(layout: StoreLayout, cn: CnClient) -> Self {
        let metadata = MetadataStore::new(layout.clone());
        Self {
            resolver: Resolver::new(layout),
            engine: AuthzEngine::new(metadata.clone(), cn),
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_standard_root() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.store_root, PathBuf::from("/data/hashstore"));
        assert!(config.object_root.is_none());
    }

    #[test]
    fn layout_defaults_objects_under_store_root() {
        let layout = AppConfig::default().layout();
        assert_eq!(layout.root(), PathBuf::from("/data/hashstore").as_path());
        assert_eq!(
            layout.object_root(),
            PathBuf::from("/data/hashstore/objects").as_path()
        );
    }

    #[test]
    fn layout_honors_object_root_override() {
        let config = AppConfig {
            object_root: Some(PathBuf::from("/mnt/objects")),
            ..AppConfig::default()
        };
        assert_eq!(
            config.layout().object_root(),
            PathBuf::from("/mnt/objects").as_path()
        );
    }
}
