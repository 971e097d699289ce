use pizzadb_core::ConfigError;
use pizzadb_db::StoreError;
use pizzadb_scraper::ScraperError;
use thiserror::Error;

/// Fatal run failures. Everything else is recovered inside the run and shows
/// up as a [`crate::Diagnostic`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to set up collectors: {0}")]
    Setup(#[from] ScraperError),

    #[error("failed to set up vendor store: {0}")]
    Store(#[from] StoreError),
}
