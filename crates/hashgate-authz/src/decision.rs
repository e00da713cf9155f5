//! The authorization decision type.
//!
//! Request-scoped and never persisted: each check computes a fresh
//! decision, and every outcome — including remote errors — is data,
//! not an exception.

use serde::{Deserialize, Serialize};

/// Outcome of a read-authorization check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadDecision {
    /// Whether the read may proceed.
    pub authorized: bool,
    /// HTTP status backing the decision: 200 for local public grants,
    /// the authority's status verbatim for remote answers, absent when
    /// the authority could not be reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Human-readable context: the public-access marker, or the
    /// transport-failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ReadDecision {
    /// Granted locally: the policy (or absence of one) makes the object
    /// world-readable. No remote authority was consulted.
    pub fn public() -> Self {
        Self {
            authorized: true,
            status: Some(200),
            message: Some("Public access".to_string()),
        }
    }

    /// Granted by the remote authority (it answered 200).
    pub fn granted() -> Self {
        Self {
            authorized: true,
            status: Some(200),
            message: None,
        }
    }

    /// Denied by the remote authority; its status is recorded verbatim.
    pub fn denied(status: u16) -> Self {
        Self {
            authorized: false,
            status: Some(status),
            message: None,
        }
    }

    /// The remote authority could not be reached; the answer is unknown
    /// and the read is refused.
    pub fn errored(message: impl Into<String>) -> Self {
        Self {
            authorized: false,
            status: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_decision_shape() {
        let d = ReadDecision::public();
        assert!(d.authorized);
        assert_eq!(d.status, Some(200));
        assert_eq!(d.message.as_deref(), Some("Public access"));
    }

    #[test]
    fn denied_records_status_verbatim() {
        let d = ReadDecision::denied(403);
        assert!(!d.authorized);
        assert_eq!(d.status, Some(403));
        assert!(d.message.is_none());
    }

    #[test]
    fn errored_has_no_status_but_a_message() {
        let d = ReadDecision::errored("connection refused");
        assert!(!d.authorized);
        assert!(d.status.is_none());
        assert_eq!(d.message.as_deref(), Some("connection refused"));
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let json = serde_json::to_value(ReadDecision::errored("boom")).unwrap();
        assert_eq!(json["authorized"], serde_json::json!(false));
        assert!(json.get("status").is_none());
    }
}
