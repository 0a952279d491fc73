//! Search Feeder Main Entry Point
//!
//! Streams documents from a MongoDB collection and republishes the mapped
//! fields to a search index in bulk.

use clap::Parser;
use search_feeder::config::{Cli, Dependencies, Settings};
use search_feeder::FeederError;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("search_feeder=info,search_feeder_repository=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), FeederError> {
    init_tracing();

    let cli = Cli::parse();
    info!(config = %cli.config.display(), "Loading configuration");

    let mut settings = Settings::load(&cli.config)?;
    cli.apply_overrides(&mut settings);

    let deps = Dependencies::new(&settings).await?;

    match deps.driver.run().await {
        Ok(report) => {
            info!(
                documents = report.documents,
                chunks = report.chunks,
                elapsed = ?report.elapsed,
                "Feeder run complete"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Feeder run failed");
            Err(e.into())
        }
    }
}
