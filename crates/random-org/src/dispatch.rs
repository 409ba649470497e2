//! Request dispatch and HTTP status interpretation.

use serde_json::Value;
use std::sync::Arc;

use crate::error::{RandomOrgError, Result};
use crate::infrastructure::ports::{HttpTransport, RawResponse};
use crate::protocol::RequestEnvelope;

/// What a single round trip produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// HTTP 200 with a JSON body
    Parsed(Value),
    /// Any status other than 200, 400 or 500; no data is available
    NoResult { status: u16 },
}

/// Sends envelopes to the endpoint, one POST per call, no retries.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn HttpTransport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    pub fn dispatch(&self, envelope: &RequestEnvelope) -> Result<Dispatch> {
        tracing::debug!(
            method = %envelope.method(),
            id = envelope.id(),
            "Dispatching random.org request"
        );

        let raw = self
            .transport
            .post_json(&self.endpoint, &envelope.to_json())?;

        tracing::debug!(status = raw.status, id = envelope.id(), "Received response");
        interpret(raw)
    }
}

/// Map a raw HTTP response onto the dispatch contract.
pub fn interpret(raw: RawResponse) -> Result<Dispatch> {
    match raw.status {
        200 => {
            let body = raw
                .body
                .ok_or_else(|| RandomOrgError::bad_response("empty response body"))?;
            let parsed = serde_json::from_str(&body).map_err(|e| {
                RandomOrgError::bad_response(format!("response body is not valid JSON ({e}): {body}"))
            })?;
            Ok(Dispatch::Parsed(parsed))
        }
        400 => {
            tracing::warn!("random.org rejected the API key");
            Err(RandomOrgError::WrongApiKey)
        }
        500 => {
            tracing::warn!("random.org reported a server error");
            Err(RandomOrgError::ApiServer)
        }
        status => {
            tracing::warn!(status, "Unexpected HTTP status from random.org, no result");
            Ok(Dispatch::NoResult { status })
        }
    }
}
