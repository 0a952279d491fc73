//! Injectable progress observation.
//!
//! Progress reporting is observable but non-essential to correctness, so it
//! hangs off a trait instead of being wired into the pipeline's control
//! flow. Tests inject recorders; the binary uses [`TracingObserver`].

use tracing::{info, warn};

/// Receives progress callbacks from the batch builder and pipeline driver.
pub trait ProgressObserver: Send + Sync {
    /// One document was appended to the in-flight request body.
    /// `ordinal` is 1-based within the current chunk.
    fn document_added(&self, ordinal: usize, document_id: &str);

    /// One chunk was handed to the sink. `success` reflects the
    /// service-reported error flag (or a transport failure).
    fn chunk_published(&self, ordinal: u64, documents: usize, success: bool);
}

/// Default observer: emits the progress lines through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ProgressObserver for TracingObserver {
    fn document_added(&self, ordinal: usize, document_id: &str) {
        info!(
            ordinal,
            document_id = %document_id,
            "Added document to request body"
        );
    }

    fn chunk_published(&self, ordinal: u64, documents: usize, success: bool) {
        if success {
            info!(chunk = ordinal, documents, "Chunk published");
        } else {
            warn!(chunk = ordinal, documents, "Chunk rejected by the index service");
        }
    }
}
