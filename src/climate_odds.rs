//! The main entry point: fetch, analyse, render and export in one client.

use crate::error::ClimateOddsError;
use crate::export::export_all;
use crate::power::fetcher::PowerFetcher;
use crate::render::{render_all, RenderSummary};
use crate::report::ClimateReport;
use crate::settings::AnalysisConfig;
use crate::types::history::ClimateHistory;
use crate::utils::ensure_dir_exists;
use bon::bon;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

/// Ties one [`AnalysisConfig`] to a configured [`PowerFetcher`].
///
/// # Examples
///
/// ```no_run
/// # use climate_odds::{AnalysisConfig, ClimateOdds, ClimateOddsError};
/// # async fn run() -> Result<(), ClimateOddsError> {
/// let client = ClimateOdds::new(AnalysisConfig::default())?;
/// let output = client.run().call().await?;
/// println!(
///     "{:.1}% chance of ideal weather ({})",
///     output.report.probability(),
///     output.report.level
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClimateOdds {
    config: AnalysisConfig,
    fetcher: PowerFetcher,
}

/// Everything produced by [`ClimateOdds::run`].
#[derive(Debug)]
pub struct RunOutput {
    pub report: Arc<ClimateReport>,
    pub charts: RenderSummary,
    pub exports: Vec<PathBuf>,
}

#[bon]
impl ClimateOdds {
    /// Validates `config` and prepares the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateOddsError::Settings`] for invalid configuration values and
    /// [`ClimateOddsError::Fetch`] if the HTTP client cannot be built.
    pub fn new(config: AnalysisConfig) -> Result<Self, ClimateOddsError> {
        config.validate()?;
        let fetcher = PowerFetcher::new(&config.source)?;
        Ok(Self { config, fetcher })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Downloads the readings for the configured location, date and window.
    ///
    /// `current_year` defaults to the current UTC year; the lookback ends the year before.
    #[builder]
    pub async fn fetch_history(
        &self,
        current_year: Option<i32>,
    ) -> Result<ClimateHistory, ClimateOddsError> {
        let history = self
            .fetcher
            .history()
            .location(self.config.location.lat_lon())
            .date(self.config.event)
            .window_days(self.config.analysis.window_days)
            .maybe_current_year(current_year)
            .call()
            .await?;
        Ok(history)
    }

    /// Builds the report for `history` with the configured criteria.
    pub fn analyze(&self, history: &ClimateHistory) -> Result<ClimateReport, ClimateOddsError> {
        Ok(ClimateReport::build(
            history,
            &self.config.location,
            &self.config.criteria(),
            &self.config.analysis,
        )?)
    }

    /// Renders all charts into the configured output directory.
    pub async fn render(&self, report: Arc<ClimateReport>) -> Result<RenderSummary, ClimateOddsError> {
        Ok(render_all(report, &self.config.output.directory).await?)
    }

    /// Writes the enabled JSON/CSV exports into the configured output directory.
    pub async fn export(&self, report: Arc<ClimateReport>) -> Result<Vec<PathBuf>, ClimateOddsError> {
        let output = &self.config.output;
        if !output.export_json && !output.export_csv {
            return Ok(Vec::new());
        }
        ensure_dir_exists(&output.directory)
            .await
            .map_err(|e| ClimateOddsError::OutputDir(output.directory.clone(), e))?;
        Ok(export_all(report, &output.directory, output.export_json, output.export_csv).await?)
    }

    /// Runs the whole pipeline: fetch, analyse, render and export.
    ///
    /// Chart failures do not abort the run; they are listed in [`RunOutput::charts`].
    ///
    /// # Errors
    ///
    /// Any fetch error (transport, HTTP status, JSON, insufficient sample) is returned
    /// as is, as are analysis and export errors.
    #[builder]
    pub async fn run(&self, current_year: Option<i32>) -> Result<RunOutput, ClimateOddsError> {
        let history = self.fetch_history().maybe_current_year(current_year).call().await?;
        let report = Arc::new(self.analyze(&history)?);
        info!(
            "{:.1}% of {} years were ideal ({})",
            report.probability(),
            report.total_years(),
            report.level
        );

        let charts = self.render(Arc::clone(&report)).await?;
        let exports = self.export(Arc::clone(&report)).await?;

        Ok(RunOutput {
            report,
            charts,
            exports,
        })
    }
}
