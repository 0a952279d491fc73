//! Pipeline driver: coordinates cursor, chunker, batch builder, and sink.
//!
//! The run is strictly sequential — one chunk is built and published to
//! completion before the next is requested. There is no retry state:
//! failures propagate and terminate the run. After a publish failure the
//! already-published prefix stays committed and the failing chunk's effect
//! on the index is indeterminate; this is a documented limitation, not
//! something the driver masks.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info, instrument};

use crate::batcher::BatchBuilder;
use crate::chunker::Chunker;
use crate::errors::PipelineError;
use crate::progress::{ProgressObserver, TracingObserver};
use search_feeder_repository::{RawDocument, SearchSink, SourceError};

/// Lifecycle states of one pipeline run.
///
/// `Idle` until the first non-empty chunk arrives, `Running` while chunks
/// flow, `Finished` once the chunker signals end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running,
    Finished,
}

/// Aggregate result of a clean run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Total documents published across all chunks.
    pub documents: u64,
    /// Number of chunks published.
    pub chunks: u64,
    /// Wall time of the whole run.
    pub elapsed: Duration,
}

/// Drives one feeder run from cursor to sink.
pub struct PipelineDriver {
    chunker: Chunker<RawDocument, SourceError>,
    batcher: BatchBuilder,
    sink: Arc<dyn SearchSink>,
    index_name: String,
    observer: Arc<dyn ProgressObserver>,
    state: PipelineState,
}

impl PipelineDriver {
    /// Create a driver with the default tracing observer.
    pub fn new(
        chunker: Chunker<RawDocument, SourceError>,
        batcher: BatchBuilder,
        sink: Arc<dyn SearchSink>,
        index_name: impl Into<String>,
    ) -> Self {
        Self::with_observer(chunker, batcher, sink, index_name, Arc::new(TracingObserver))
    }

    /// Create a driver with a custom progress observer.
    pub fn with_observer(
        chunker: Chunker<RawDocument, SourceError>,
        batcher: BatchBuilder,
        sink: Arc<dyn SearchSink>,
        index_name: impl Into<String>,
        observer: Arc<dyn ProgressObserver>,
    ) -> Self {
        Self {
            chunker,
            batcher,
            sink,
            index_name: index_name.into(),
            observer,
            state: PipelineState::Idle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Drive the full run: pull chunks, build batches, publish, accumulate.
    ///
    /// Consumes the driver — the underlying cursor is single-pass. Returns
    /// the aggregate report on a clean finish. Any encoder, source, or sink
    /// failure terminates the run; a raised service `errors` flag aborts
    /// without retrying the chunk.
    #[instrument(skip(self), fields(index = %self.index_name))]
    pub async fn run(mut self) -> Result<PipelineReport, PipelineError> {
        let start = Instant::now();
        let mut documents: u64 = 0;
        let mut chunks: u64 = 0;

        info!(index = %self.index_name, "Starting feeder run");

        loop {
            let ordinal = chunks + 1;

            let chunk = match self.chunker.next_chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    error!(chunk = ordinal, error = %e, "Source cursor failed");
                    return Err(e.into());
                }
            };
            if self.state == PipelineState::Idle {
                self.state = PipelineState::Running;
            }

            let (count, body) = match self.batcher.build(&chunk, self.observer.as_ref()) {
                Ok(built) => built,
                Err(e) => {
                    error!(chunk = ordinal, error = %e, "Failed to build bulk request");
                    return Err(e);
                }
            };

            info!(chunk = ordinal, documents = count, "Uploading chunk to the index service");
            let outcome = match self.sink.bulk_publish(&self.index_name, &body).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    self.observer.chunk_published(ordinal, count, false);
                    error!(chunk = ordinal, error = %e, "Bulk publish call failed");
                    return Err(e.into());
                }
            };

            self.observer.chunk_published(ordinal, count, !outcome.errors);
            if outcome.errors {
                error!(
                    chunk = ordinal,
                    documents = count,
                    "Index service reported item failures; aborting without retry"
                );
                return Err(PipelineError::publish_rejected(ordinal));
            }

            documents += count as u64;
            chunks += 1;
        }

        self.state = PipelineState::Finished;
        let elapsed = start.elapsed();
        info!(documents, chunks, elapsed = ?elapsed, "Feeder run finished");

        Ok(PipelineReport {
            documents,
            chunks,
            elapsed,
        })
    }
}
