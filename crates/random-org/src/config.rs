//! Client configuration.

use std::fmt;
use std::time::Duration;

/// Default JSON-RPC endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.random.org/json-rpc/2/invoke";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Credential and endpoint settings, built once and handed to the client.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    api_key: String,
    endpoint: String,
    timeout: Duration,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Create config from environment variables.
    ///
    /// Loads `.env` if present, then reads `RANDOM_ORG_API_KEY`,
    /// `RANDOM_ORG_ENDPOINT` and `RANDOM_ORG_TIMEOUT_SECS`, falling back to
    /// defaults if not set.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }

        let api_key = std::env::var("RANDOM_ORG_API_KEY").unwrap_or_default();
        let endpoint =
            std::env::var("RANDOM_ORG_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let timeout_secs = std::env::var("RANDOM_ORG_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self::new(api_key)
            .with_endpoint(endpoint)
            .with_timeout(Duration::from_secs(timeout_secs))
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for Config {
    /// An empty API key: the first real call fails with `WrongApiKey`.
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("Config")
            .field("api_key", &key)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}
