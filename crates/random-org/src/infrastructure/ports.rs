//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the client. Ports exist for:
//! - HTTP transport (could swap reqwest -> anything that can POST)
//! - Correlation ids (for testing)

use crate::error::Result;

/// What the transport hands back: a status code and the raw body, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Option<String>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: Some(body.into()),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }
}

/// Synchronous "send POST, get status + body" boundary.
///
/// Implementations must not retry; a failure to obtain any status at all is
/// reported as `RandomOrgError::Transport`.
#[cfg_attr(test, mockall::automock)]
pub trait HttpTransport: Send + Sync {
    fn post_json(&self, url: &str, body: &str) -> Result<RawResponse>;
}

/// Source of JSON-RPC correlation ids in `[1, 10000)`.
#[cfg_attr(test, mockall::automock)]
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> u32;
}
