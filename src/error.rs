use crate::analysis::error::AnalysisError;
use crate::export::error::ExportError;
use crate::power::error::FetchError;
use crate::render::error::RenderError;
use crate::settings::error::SettingsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateOddsError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Failed to create output directory '{0}'")]
    OutputDir(PathBuf, #[source] std::io::Error),
}
