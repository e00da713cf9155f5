//! # System Metadata — Typed Access-Policy Model
//!
//! Deserializes the system metadata XML document into a fixed structural
//! model instead of walking a dynamic tag tree. Only the parts this
//! gateway evaluates are modeled; unknown elements are ignored by serde.
//!
//! A document looks like:
//!
//! ```xml
//! <d1:systemMetadata xmlns:d1="http://ns.dataone.org/service/types/v2.0">
//!   <identifier>doi:10.5072/FK2/ABC</identifier>
//!   <formatId>text/csv</formatId>
//!   <accessPolicy>
//!     <allow>
//!       <subject>public</subject>
//!       <permission>read</permission>
//!     </allow>
//!   </accessPolicy>
//! </d1:systemMetadata>
//! ```
//!
//! quick-xml does not check the root element name against the struct
//! name, so the namespace prefix on the root is irrelevant; child
//! elements are matched by their unprefixed names.

use serde::{Deserialize, Serialize};

/// Subject literal granting world access.
pub const PUBLIC_SUBJECT: &str = "public";

/// Permission literal for read access.
pub const READ_PERMISSION: &str = "read";

/// The system metadata document associated 1:1 with a PID.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemMetadata {
    /// The PID this document describes, as recorded by the store.
    #[serde(default)]
    pub identifier: Option<String>,
    /// Media/format identifier of the object.
    #[serde(rename = "formatId", default)]
    pub format_id: Option<String>,
    /// The embedded access-control policy, if any.
    #[serde(rename = "accessPolicy", default)]
    pub access_policy: Option<AccessPolicy>,
}

/// An ordered list of allow rules.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessPolicy {
    /// Allow rules in document order. Order carries no semantics but is
    /// preserved for reproducible output.
    #[serde(rename = "allow", default)]
    pub allow: Vec<AllowRule>,
}

/// One allow rule: a subject and the permissions granted to it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AllowRule {
    /// The subject the rule grants to (a DN, an ORCID, or `"public"`).
    #[serde(default)]
    pub subject: String,
    /// Permissions granted, in document order.
    #[serde(rename = "permission", default)]
    pub permission: Vec<String>,
}

impl AllowRule {
    /// Whether this rule grants world read access.
    pub fn grants_public_read(&self) -> bool {
        self.subject == PUBLIC_SUBJECT && self.permission.iter().any(|p| p == READ_PERMISSION)
    }
}

impl SystemMetadata {
    /// Parse a system metadata document from raw bytes.
    ///
    /// Returns an error for malformed XML; see [`SystemMetadata::parse_lossy`]
    /// for the folding variant the authorization path uses.
    pub fn parse(bytes: &[u8]) -> Result<Self, quick_xml::DeError> {
        let text = String::from_utf8_lossy(bytes);
        quick_xml::de::from_str(&text)
    }

    /// Parse a document, folding malformed input into the empty model.
    ///
    /// Absence of structure is not an error: an unparseable document
    /// yields a model with no access policy, which evaluates exactly
    /// like a document that never had one.
    pub fn parse_lossy(bytes: &[u8]) -> Self {
        match Self::parse(bytes) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::debug!(error = %e, "malformed system metadata; treating policy as empty");
                Self::default()
            }
        }
    }

    /// The allow rules in document order; empty when no policy exists.
    pub fn allow_rules(&self) -> &[AllowRule] {
        self.access_policy
            .as_ref()
            .map(|p| p.allow.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the document grants public read access.
    ///
    /// True iff some allow rule names the literal subject `"public"`
    /// with a `"read"` permission.
    pub fn is_public_readable(&self) -> bool {
        self.allow_rules().iter().any(AllowRule::grants_public_read)
    }
}
