//! Command-line interface.
//!
//! The CLI carries the config file path and a handful of overrides for the
//! values most often varied between runs. The source query is deliberately
//! NOT overridable here: it is structured data in the config file, and a
//! free-form query string on the command line would reopen the injection
//! hazard the structured predicate exists to close.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;

/// Feed documents from a MongoDB collection into a search index.
#[derive(Debug, Parser)]
#[command(name = "search-feeder", version, about)]
pub struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Override the MongoDB database name.
    #[arg(long)]
    pub database: Option<String>,

    /// Override the MongoDB collection name.
    #[arg(long)]
    pub collection: Option<String>,

    /// Override the destination index name.
    #[arg(long)]
    pub index: Option<String>,

    /// Override the index service username.
    #[arg(long)]
    pub username: Option<String>,

    /// Override the index service password.
    #[arg(long)]
    pub password: Option<String>,
}

impl Cli {
    /// Apply command-line overrides on top of file-based settings.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(database) = &self.database {
            settings.mongodb.database = database.clone();
        }
        if let Some(collection) = &self.collection {
            settings.mongodb.collection = collection.clone();
        }
        if let Some(index) = &self.index {
            settings.opensearch.index_name = index.clone();
        }
        if let Some(username) = &self.username {
            settings.opensearch.username = Some(username.clone());
        }
        if let Some(password) = &self.password {
            settings.opensearch.password = Some(password.clone());
        }
    }
}
