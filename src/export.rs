//! Writes the report as `report.json` and the per-year table as `observations.csv`.

pub mod error;

use crate::report::ClimateReport;
use error::ExportError;
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const JSON_FILE_NAME: &str = "report.json";
pub const CSV_FILE_NAME: &str = "observations.csv";

/// One row per usable year: the five readings, the verdict and the failed checks.
pub fn observations_frame(report: &ClimateReport) -> PolarsResult<DataFrame> {
    let observations = &report.observations;
    let verdicts = &report.evaluation.verdicts;

    df!(
        "year" => observations.iter().map(|o| o.year).collect::<Vec<i32>>(),
        "temp_max" => observations.iter().map(|o| o.temp_max).collect::<Vec<f64>>(),
        "temp_min" => observations.iter().map(|o| o.temp_min).collect::<Vec<f64>>(),
        "precipitation" => observations.iter().map(|o| o.precipitation).collect::<Vec<f64>>(),
        "wind" => observations.iter().map(|o| o.wind).collect::<Vec<f64>>(),
        "humidity" => observations.iter().map(|o| o.humidity).collect::<Vec<f64>>(),
        "ideal" => verdicts.iter().map(|v| v.ideal).collect::<Vec<bool>>(),
        "reasons" => verdicts.iter().map(|v| v.reasons()).collect::<Vec<String>>(),
    )
}

pub fn write_csv(report: &ClimateReport, path: &Path) -> Result<(), ExportError> {
    let mut df =
        observations_frame(report).map_err(|e| ExportError::Polars(path.to_path_buf(), e))?;
    let mut file = File::create(path).map_err(|e| ExportError::Io(path.to_path_buf(), e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| ExportError::Polars(path.to_path_buf(), e))?;
    Ok(())
}

pub fn write_json(report: &ClimateReport, path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_vec_pretty(report)?;
    std::fs::write(path, json).map_err(|e| ExportError::Io(path.to_path_buf(), e))
}

/// Writes the enabled exports into `dir` on a blocking task. Returns the written paths.
pub async fn export_all(
    report: Arc<ClimateReport>,
    dir: &Path,
    json: bool,
    csv: bool,
) -> Result<Vec<PathBuf>, ExportError> {
    let dir = dir.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let mut written = Vec::new();
        if json {
            let path = dir.join(JSON_FILE_NAME);
            write_json(&report, &path)?;
            written.push(path);
        }
        if csv {
            let path = dir.join(CSV_FILE_NAME);
            write_csv(&report, &path)?;
            written.push(path);
        }
        for path in &written {
            info!("Exported {}", path.display());
        }
        Ok(written)
    })
    .await?
}
