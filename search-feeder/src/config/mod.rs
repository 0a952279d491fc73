//! Configuration and dependency wiring for the feeder.

mod cli;
mod dependencies;
mod settings;

pub use cli::Cli;
pub use dependencies::Dependencies;
pub use settings::{MongoSettings, OpenSearchSettings, Settings};
