//! The authorization engine.
//!
//! Sequences the two information sources — local policy, then remote
//! authority — into a single [`ReadDecision`]. The local short-circuit
//! is mandatory, not an optimization: a publicly readable object stays
//! readable when the coordinating node is unreachable.

use hashgate_store::{MetadataStore, SystemMetadata};

use crate::client::CnClient;
use crate::decision::ReadDecision;

/// Whether a (possibly absent) metadata document grants public read.
///
/// **Default-open**: `None` — no metadata document could be read —
/// means the object is treated as publicly readable. Missing metadata
/// is open access, not denial. This mirrors the writing store's
/// semantics and is asserted by tests rather than ever changed quietly.
pub fn is_public(doc: Option<&SystemMetadata>) -> bool {
    doc.map_or(true, SystemMetadata::is_public_readable)
}

/// Combines policy evaluation with the remote read check.
#[derive(Debug, Clone)]
pub struct AuthzEngine {
    metadata: MetadataStore,
    cn: CnClient,
}

impl AuthzEngine {
    /// Create an engine over a metadata store and a coordinating-node
    /// client.
    pub fn new(metadata: MetadataStore, cn: CnClient) -> Self {
        Self { metadata, cn }
    }

    /// Decide whether `token` may read the object behind `pid`.
    ///
    /// The two awaits are strictly sequential: the remote check only
    /// happens when the metadata read produced a non-public policy.
    /// Exactly one remote round trip, no retries; every failure mode
    /// resolves to a decision value.
    pub async fn authorize(&self, token: &str, pid: &str) -> ReadDecision {
        let doc = self.metadata.read_parsed(pid).await;
        if is_public(doc.as_ref()) {
            tracing::debug!(pid, "read granted locally (public policy or absent metadata)");
            return ReadDecision::public();
        }

        match self.cn.is_authorized_read(token, pid).await {
            Ok(200) => ReadDecision::granted(),
            Ok(status) => {
                tracing::debug!(pid, status, "coordinating node denied read");
                ReadDecision::denied(status)
            }
            Err(e) => {
                tracing::warn!(pid, error = %e, "coordinating node unreachable; refusing read");
                ReadDecision::errored(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashgate_core::StoreLayout;
    use std::fs;
    use std::path::Path;
    use wiremock::matchers::{header, method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::CnConfig;

    const PUBLIC_XML: &str = r#"<systemMetadata>
        <accessPolicy>
          <allow><subject>public</subject><permission>read</permission></allow>
        </accessPolicy>
      </systemMetadata>"#;

    const PRIVATE_XML: &str = r#"<systemMetadata>
        <accessPolicy>
          <allow><subject>uid=owner</subject><permission>read</permission></allow>
        </accessPolicy>
      </systemMetadata>"#;

    fn write_sysmeta(layout: &StoreLayout, pid: &str, xml: &str) {
        let path = layout.metadata_path(pid);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, xml).unwrap();
    }

    fn engine(root: &Path, cn_base: &str) -> AuthzEngine {
        let metadata = MetadataStore::new(StoreLayout::new(root));
        let cn = CnClient::new(CnConfig::local_mock(cn_base).unwrap()).unwrap();
        AuthzEngine::new(metadata, cn)
    }

    #[test]
    fn absent_metadata_is_public() {
        assert!(is_public(None));
    }

    #[test]
    fn public_policy_is_public() {
        let doc = SystemMetadata::parse(PUBLIC_XML.as_bytes()).unwrap();
        assert!(is_public(Some(&doc)));
    }

    #[test]
    fn private_policy_is_not_public() {
        let doc = SystemMetadata::parse(PRIVATE_XML.as_bytes()).unwrap();
        assert!(!is_public(Some(&doc)));
    }

    #[tokio::test]
    async fn public_policy_short_circuits_remote_call() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockServer::start().await;
        // Any remote call fails the test.
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock)
            .await;

        let pid = "doi:10.5072/FK2/PUB";
        let e = engine(dir.path(), &mock.uri());
        write_sysmeta(e.metadata.layout(), pid, PUBLIC_XML);

        let decision = e.authorize("Bearer any", pid).await;
        assert_eq!(decision, ReadDecision::public());
    }

    #[tokio::test]
    async fn absent_metadata_short_circuits_remote_call() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock)
            .await;

        let decision = engine(dir.path(), &mock.uri())
            .authorize("", "doi:no/metadata")
            .await;
        assert!(decision.authorized);
        assert_eq!(decision.message.as_deref(), Some("Public access"));
    }

    #[tokio::test]
    async fn public_grant_holds_when_authority_is_unreachable() {
        // The short-circuit is mandatory: point the client at a dead
        // port and the public object must still be readable.
        let dir = tempfile::tempdir().unwrap();
        let pid = "doi:10.5072/FK2/PUB";
        let e = engine(dir.path(), "http://127.0.0.1:1");
        write_sysmeta(e.metadata.layout(), pid, PUBLIC_XML);

        let decision = e.authorize("", pid).await;
        assert!(decision.authorized);
    }

    #[tokio::test]
    async fn remote_200_grants_read() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex("^/isAuthorized/.+$"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock)
            .await;

        let pid = "doi:10.5072/FK2/PRIV";
        let e = engine(dir.path(), &mock.uri());
        write_sysmeta(e.metadata.layout(), pid, PRIVATE_XML);

        let decision = e.authorize("Bearer tok", pid).await;
        assert_eq!(decision, ReadDecision::granted());
    }

    #[tokio::test]
    async fn remote_403_denies_with_status_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex("^/isAuthorized/.+$"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock)
            .await;

        let pid = "doi:10.5072/FK2/PRIV";
        let e = engine(dir.path(), &mock.uri());
        write_sysmeta(e.metadata.layout(), pid, PRIVATE_XML);

        let decision = e.authorize("Bearer tok", pid).await;
        assert_eq!(decision, ReadDecision::denied(403));
    }

    #[tokio::test]
    async fn transport_failure_denies_with_message() {
        let dir = tempfile::tempdir().unwrap();
        let pid = "doi:10.5072/FK2/PRIV";
        let e = engine(dir.path(), "http://127.0.0.1:1");
        write_sysmeta(e.metadata.layout(), pid, PRIVATE_XML);

        let decision = e.authorize("Bearer tok", pid).await;
        assert!(!decision.authorized);
        assert!(decision.status.is_none());
        assert!(!decision.message.unwrap().is_empty());
    }

    #[tokio::test]
    async fn bearer_token_is_forwarded_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex("^/isAuthorized/.+$"))
            .and(header("Authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock)
            .await;

        let pid = "doi:10.5072/FK2/PRIV";
        let e = engine(dir.path(), &mock.uri());
        write_sysmeta(e.metadata.layout(), pid, PRIVATE_XML);

        let decision = e.authorize("Bearer secret-token", pid).await;
        assert!(decision.authorized);
    }
}
