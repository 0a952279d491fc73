//! Dependency initialization and wiring for the feeder.

use std::sync::Arc;

use tracing::info;

use crate::batcher::BatchBuilder;
use crate::chunker::Chunker;
use crate::config::Settings;
use crate::extractor::FieldExtractor;
use crate::pipeline::PipelineDriver;
use crate::{FeederError, PipelineError};
use search_feeder_repository::{DocumentSource, MongoSource, OpenSearchSink};

/// Container for a fully wired pipeline, ready to run.
pub struct Dependencies {
    /// The configured driver.
    pub driver: PipelineDriver,
}

impl Dependencies {
    /// Connect to both collaborators, open the source cursor, and wire the
    /// pipeline components together.
    pub async fn new(settings: &Settings) -> Result<Self, FeederError> {
        let source = MongoSource::connect(
            &settings.mongodb.url,
            &settings.mongodb.database,
            &settings.mongodb.collection,
        )
        .await
        .map_err(|e| FeederError::config(format!("Failed to connect to MongoDB: {}", e)))?;

        let sink = OpenSearchSink::new(
            &settings.opensearch.url,
            settings.opensearch.username.as_deref(),
            settings.opensearch.password.as_deref(),
        )
        .map_err(|e| FeederError::config(format!("Failed to create index service sink: {}", e)))?;

        let stream = source
            .find(&settings.mongodb.query)
            .await
            .map_err(PipelineError::from)?;
        let chunker = Chunker::new(stream, settings.chunk_size());

        let extractor = FieldExtractor::new(&settings.fields)?;
        let batcher = BatchBuilder::new(extractor);

        info!(
            chunk_size = settings.chunk_size,
            index = %settings.opensearch.index_name,
            "Pipeline wired"
        );

        let driver = PipelineDriver::new(
            chunker,
            batcher,
            Arc::new(sink),
            settings.opensearch.index_name.clone(),
        );

        Ok(Self { driver })
    }
}
