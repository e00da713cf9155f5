//! Coordinating-node authorization client.
//!
//! Issues the single read-authorization check the engine falls back to:
//! `GET {base}/isAuthorized/{pid}?action=read`, with the caller's
//! bearer token forwarded verbatim when present. One round trip per
//! check — deliberately no retry layer, since a denial must reflect the
//! authority's answer at the moment of the request.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::CnConfig;

/// Permission value used for every check this gateway performs.
const READ_ACTION: &str = "read";

/// Error talking to the coordinating node.
#[derive(Debug, Error)]
pub enum CnError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build coordinating-node http client: {0}")]
    ClientInit(#[source] reqwest::Error),

    /// The request never produced an HTTP response (DNS, connect,
    /// timeout). Distinct from a denial: the authority's answer is
    /// unknown.
    #[error("authorization request failed: {source}")]
    Transport {
        /// The underlying transport failure.
        #[source]
        source: reqwest::Error,
    },
}

/// HTTP client for the coordinating node's `isAuthorized` endpoint.
#[derive(Debug, Clone)]
pub struct CnClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CnClient {
    /// Build a client from configuration.
    pub fn new(config: CnConfig) -> Result<Self, CnError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(CnError::ClientInit)?;
        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// The URL the read check for `pid` will be issued against.
    ///
    /// The PID is percent-encoded as a single path segment (PIDs
    /// routinely contain `/` and `:`).
    pub fn is_authorized_url(&self, pid: &str) -> Url {
        let mut url = self.base_url.clone();
        // Url::path_segments_mut only fails for cannot-be-a-base URLs,
        // which CnConfig never produces.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("isAuthorized").push(pid);
        }
        url.query_pairs_mut().append_pair("action", READ_ACTION);
        url
    }

    /// Ask the coordinating node whether `token` may read `pid`.
    ///
    /// `token` is the inbound request's `Authorization` header value,
    /// forwarded verbatim; an empty token sends no header. Returns the
    /// authority's HTTP status (200 means granted). A transport failure
    /// is an `Err` — the caller decides what an unknown answer means.
    pub async fn is_authorized_read(&self, token: &str, pid: &str) -> Result<u16, CnError> {
        let url = self.is_authorized_url(pid);
        let mut request = self.http.get(url.clone());
        if !token.is_empty() {
            request = request.header(reqwest::header::AUTHORIZATION, token);
        }

        let response = request
            .send()
            .await
            .map_err(|source| CnError::Transport { source })?;

        let status = response.status().as_u16();
        tracing::debug!(pid, %url, status, "coordinating node answered read check");
        Ok(status)
    }
}
