//! reqwest-backed HTTP transport.

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

use crate::error::{RandomOrgError, Result};
use crate::infrastructure::ports::{HttpTransport, RawResponse};

/// Blocking HTTP client for the JSON-RPC endpoint
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS))
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_json(&self, url: &str, body: &str) -> Result<RawResponse> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .map_err(|e| RandomOrgError::transport(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| RandomOrgError::transport(e.to_string()))?;

        Ok(if text.is_empty() {
            RawResponse::empty(status)
        } else {
            RawResponse::new(status, text)
        })
    }
}
