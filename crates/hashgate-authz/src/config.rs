//! Coordinating-node client configuration.
//!
//! Base URL and timeout for the remote authorization authority. Defaults
//! point at the production coordinating node; override via environment
//! variables for staging or tests.

use url::Url;

/// Configuration for the coordinating-node authorization client.
#[derive(Debug, Clone)]
pub struct CnConfig {
    /// Base URL of the coordinating node API,
    /// e.g. `https://cn.dataone.org/cn/v2`.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl CnConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CN_BASE_URL` (default: `https://cn.dataone.org/cn/v2`)
    /// - `CN_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_url("CN_BASE_URL", "https://cn.dataone.org/cn/v2")?,
            timeout_secs: std::env::var("CN_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Configuration pointing at a local mock server (for testing).
    pub fn local_mock(base: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Url::parse(base)
                .map_err(|e| ConfigError::InvalidUrl("local_mock".to_string(), e.to_string()))?,
            timeout_secs: 5,
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A URL-valued variable failed to parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
