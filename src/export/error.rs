use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error writing '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to build or write the observation table '{0}'")]
    Polars(PathBuf, #[source] PolarsError),

    #[error("Failed to serialise the report to JSON")]
    Json(#[from] serde_json::Error),

    #[error("Export task panicked or was cancelled")]
    TaskJoin(#[from] tokio::task::JoinError),
}
