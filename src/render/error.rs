use crate::render::Chart;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to prepare output directory '{0}'")]
    OutputDir(PathBuf, #[source] std::io::Error),

    #[error("Failed to draw chart '{chart}' to '{path}'")]
    Draw {
        chart: Chart,
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Background render task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
