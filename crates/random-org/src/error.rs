//! Error taxonomy for the random.org client.
//!
//! Every fallible operation in this crate returns [`RandomOrgError`]. Argument
//! errors are raised before any network activity; the remaining variants
//! describe what happened on the wire.

use thiserror::Error;

/// Unified error type for client operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RandomOrgError {
    /// Caller-supplied parameters failed local validation
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// HTTP 400 from the service
    #[error("Wrong or missing API key, check your configuration")]
    WrongApiKey,

    /// HTTP 500 from the service
    #[error("Something went wrong from the random.org API. Try again or check their service for information")]
    ApiServer,

    /// The response parsed but lacks the expected `result`/`random`/`data` shape
    #[error("Something is wrong with the response: {0}")]
    Api(String),

    /// The service answered with a status that carries no result
    #[error("No result: service answered with HTTP status {status}")]
    NoResult { status: u16 },

    /// The request never produced an HTTP status (connection, TLS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// A timestamp field could not be parsed
    #[error("Invalid timestamp '{value}': {reason}")]
    Timestamp { value: String, reason: String },
}

impl RandomOrgError {
    /// Creates an argument error.
    ///
    /// # Example
    /// ```ignore
    /// if n < 1 {
    ///     return Err(RandomOrgError::argument("parameter 'n' must be in the [1, 10000] range."));
    /// }
    /// ```
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }

    /// Create a response-shape error embedding the offending response
    pub fn bad_response(response: impl std::fmt::Display) -> Self {
        Self::Api(response.to_string())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Whether retrying the same request may succeed.
    ///
    /// Only server faults and transport failures are transient. The client
    /// itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ApiServer | Self::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, RandomOrgError>;
