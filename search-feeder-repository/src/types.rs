//! Request/response types exchanged with the external collaborators.

use serde::{Deserialize, Serialize};

/// Outcome of one bulk publish call, as reported by the index service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkPublishOutcome {
    /// True when the service rejected at least one item of the batch.
    ///
    /// The feeder treats a raised flag as a failed batch to be logged — never
    /// auto-retried.
    pub errors: bool,
    /// Milliseconds the service spent on the call, when reported.
    pub took_ms: Option<u64>,
}
