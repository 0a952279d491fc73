//! Search sink trait definition.

use async_trait::async_trait;

use crate::errors::SinkError;
use crate::types::BulkPublishOutcome;
use search_feeder_shared::BulkRequestBody;

/// Abstracts the index service receiving bulk publishes.
///
/// One call submits one request body in a single network round trip. The
/// service's per-item `errors` flag is surfaced verbatim in the outcome;
/// deciding what to do about it (the feeder aborts) is the caller's policy,
/// not the sink's.
#[async_trait]
pub trait SearchSink: Send + Sync {
    /// Submit `body` to `index` in one bulk call.
    ///
    /// Returns `Ok` with the service-reported outcome when the call itself
    /// succeeded at the HTTP level, even if individual items were rejected.
    /// Transport failures and non-success statuses are a `SinkError`.
    async fn bulk_publish(
        &self,
        index: &str,
        body: &BulkRequestBody,
    ) -> Result<BulkPublishOutcome, SinkError>;
}
