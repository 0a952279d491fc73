//! Search sink error types.

use thiserror::Error;

/// Unified errors from index service operations.
///
/// Covers connection setup and the bulk publish call itself. Note that a
/// `2xx` response with a raised `errors` flag is NOT a `SinkError` — the
/// flag is carried in `BulkPublishOutcome` and policy lives with the caller.
#[derive(Debug, Clone, Error)]
pub enum SinkError {
    /// Failed to set up the index service transport.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The bulk call failed at the transport or HTTP level.
    #[error("Bulk request error: {0}")]
    BulkError(String),

    /// The bulk response could not be interpreted.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SinkError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a bulk request error.
    pub fn bulk(msg: impl Into<String>) -> Self {
        Self::BulkError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
