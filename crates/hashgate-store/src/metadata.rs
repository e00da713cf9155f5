//! # Metadata Accessor
//!
//! Retrieves the raw system metadata document for a PID. Every read
//! failure — not found, permission, I/O — folds into "absent". Callers
//! must treat absence as "no policy could be established", never as a
//! hard error; the authorization engine turns it into the default-open
//! decision.

use hashgate_core::StoreLayout;

use crate::sysmeta::SystemMetadata;

/// Read access to system metadata documents in the hashstore.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    layout: StoreLayout,
}

impl MetadataStore {
    /// Create a metadata store over the given layout.
    pub fn new(layout: StoreLayout) -> Self {
        Self { layout }
    }

    /// The path layout this store reads from.
    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// Read the raw system metadata document for `pid`.
    ///
    /// Returns `None` on any failure. The cause is logged at debug
    /// level and deliberately not surfaced — a missing document and an
    /// unreadable one are indistinguishable to callers.
    pub async fn read_sysmeta(&self, pid: &str) -> Option<Vec<u8>> {
        let path = self.layout.metadata_path(pid);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::debug!(
                    pid,
                    path = %path.display(),
                    error = %e,
                    "system metadata read failed; treating as absent"
                );
                None
            }
        }
    }

    /// Read and parse the system metadata document for `pid`.
    ///
    /// `None` when the document is absent; a present-but-malformed
    /// document parses to the empty policy model.
    pub async fn read_parsed(&self, pid: &str) -> Option<SystemMetadata> {
        self.read_sysmeta(pid)
            .await
            .map(|bytes| SystemMetadata::parse_lossy(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Lay a sysmeta document down at the path the layout derives.
    fn write_sysmeta(layout: &StoreLayout, pid: &str, xml: &str) {
        let path = layout.metadata_path(pid);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, xml).unwrap();
    }

    #[tokio::test]
    async fn reads_document_at_derived_path() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StoreLayout::new(dir.path());
        let pid = "doi:10.5072/FK2/ABC";
        write_sysmeta(&layout, pid, "<systemMetadata/>");

        let store = MetadataStore::new(layout);
        let bytes = store.read_sysmeta(pid).await.unwrap();
        assert_eq!(bytes, b"<systemMetadata/>");
    }

    #[tokio::test]
    async fn absent_document_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = MetadataStore::new(StoreLayout::new(dir.path()));
        assert!(store.read_sysmeta("doi:never/written").await.is_none());
    }

    #[tokio::test]
    async fn missing_store_root_reads_as_none() {
        // A dangling root is an I/O failure, folded like not-found.
        let store = MetadataStore::new(StoreLayout::new("/nonexistent/hashstore"));
        assert!(store.read_sysmeta("doi:any").await.is_none());
    }

    #[tokio::test]
    async fn read_parsed_returns_policy() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StoreLayout::new(dir.path());
        let pid = "doi:10.5072/FK2/PUB";
        write_sysmeta(
            &layout,
            pid,
            r#"<systemMetadata>
                 <accessPolicy>
                   <allow><subject>public</subject><permission>read</permission></allow>
                 </accessPolicy>
               </systemMetadata>"#,
        );

        let store = MetadataStore::new(layout);
        let doc = store.read_parsed(pid).await.unwrap();
        assert!(doc.is_public_readable());
    }

    #[tokio::test]
    async fn read_parsed_folds_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StoreLayout::new(dir.path());
        let pid = "doi:10.5072/FK2/BROKEN";
        write_sysmeta(&layout, pid, "<<<not-xml>>>");

        let store = MetadataStore::new(layout);
        let doc = store.read_parsed(pid).await.unwrap();
        assert!(doc.allow_rules().is_empty());
    }
}
