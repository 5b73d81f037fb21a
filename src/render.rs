//! Draws the ten summary charts as SVG files.
//!
//! Every chart reads the same immutable [`ClimateReport`] and writes its own file,
//! so they are rendered concurrently on blocking tasks. A chart that fails is
//! reported in [`RenderSummary::failures`] without affecting the others.

pub mod charts;
pub mod error;
pub mod style;

use crate::report::ClimateReport;
use crate::utils::ensure_dir_exists;
use error::RenderError;
use futures_util::future::join_all;
use log::{info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use style::DrawResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chart {
    TemperatureTimeseries,
    PrecipitationPattern,
    MultiParameterDashboard,
    CriteriaEvaluation,
    ProbabilityGauge,
    DateRangeHeatmap,
    TrendAnalysis,
    ProcessingPipeline,
    ProbabilityDistribution,
    SummaryInfographic,
}

impl Chart {
    pub const ALL: [Chart; 10] = [
        Chart::TemperatureTimeseries,
        Chart::PrecipitationPattern,
        Chart::MultiParameterDashboard,
        Chart::CriteriaEvaluation,
        Chart::ProbabilityGauge,
        Chart::DateRangeHeatmap,
        Chart::TrendAnalysis,
        Chart::ProcessingPipeline,
        Chart::ProbabilityDistribution,
        Chart::SummaryInfographic,
    ];

    /// Position in the output listing, starting at 1.
    pub fn number(self) -> u8 {
        match self {
            Chart::TemperatureTimeseries => 1,
            Chart::PrecipitationPattern => 2,
            Chart::MultiParameterDashboard => 3,
            Chart::CriteriaEvaluation => 4,
            Chart::ProbabilityGauge => 5,
            Chart::DateRangeHeatmap => 6,
            Chart::TrendAnalysis => 7,
            Chart::ProcessingPipeline => 8,
            Chart::ProbabilityDistribution => 9,
            Chart::SummaryInfographic => 10,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Chart::TemperatureTimeseries => "temperature_timeseries",
            Chart::PrecipitationPattern => "precipitation_pattern",
            Chart::MultiParameterDashboard => "multi_parameter_dashboard",
            Chart::CriteriaEvaluation => "criteria_evaluation",
            Chart::ProbabilityGauge => "probability_gauge",
            Chart::DateRangeHeatmap => "date_range_heatmap",
            Chart::TrendAnalysis => "trend_analysis",
            Chart::ProcessingPipeline => "processing_pipeline",
            Chart::ProbabilityDistribution => "probability_distribution",
            Chart::SummaryInfographic => "summary_infographic",
        }
    }

    /// `"01_temperature_timeseries.svg"`.
    pub fn file_name(self) -> String {
        format!("{:02}_{}.svg", self.number(), self.slug())
    }

    fn draw_fn(self) -> fn(&ClimateReport, &Path) -> DrawResult {
        match self {
            Chart::TemperatureTimeseries => charts::temperature::draw,
            Chart::PrecipitationPattern => charts::precipitation::draw,
            Chart::MultiParameterDashboard => charts::dashboard::draw,
            Chart::CriteriaEvaluation => charts::criteria::draw,
            Chart::ProbabilityGauge => charts::gauge::draw,
            Chart::DateRangeHeatmap => charts::heatmap::draw,
            Chart::TrendAnalysis => charts::trend::draw,
            Chart::ProcessingPipeline => charts::pipeline::draw,
            Chart::ProbabilityDistribution => charts::distribution::draw,
            Chart::SummaryInfographic => charts::infographic::draw,
        }
    }

    /// Draws this chart to `path`. Blocking.
    pub fn render(self, report: &ClimateReport, path: &Path) -> Result<(), RenderError> {
        (self.draw_fn())(report, path).map_err(|source| RenderError::Draw {
            chart: self,
            path: path.to_path_buf(),
            source,
        })
    }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}_{}", self.number(), self.slug())
    }
}

/// Outcome of [`render_all`]: files written, in chart order, and charts that failed.
#[derive(Debug, Default)]
pub struct RenderSummary {
    pub written: Vec<PathBuf>,
    pub failures: Vec<RenderError>,
}

impl RenderSummary {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Renders every chart into `dir`, creating it if needed.
///
/// # Errors
///
/// Only fails when `dir` cannot be created. Individual chart failures are
/// collected in the returned [`RenderSummary`].
pub async fn render_all(
    report: Arc<ClimateReport>,
    dir: &Path,
) -> Result<RenderSummary, RenderError> {
    ensure_dir_exists(dir)
        .await
        .map_err(|e| RenderError::OutputDir(dir.to_path_buf(), e))?;

    let tasks = Chart::ALL.iter().map(|&chart| {
        let report = Arc::clone(&report);
        let path = dir.join(chart.file_name());
        tokio::task::spawn_blocking(move || chart.render(&report, &path).map(|_| path))
    });

    let mut summary = RenderSummary::default();
    for result in join_all(tasks).await {
        match result {
            Ok(Ok(path)) => {
                info!("Generated {}", path.display());
                summary.written.push(path);
            }
            Ok(Err(e)) => {
                warn!("{}", e);
                summary.failures.push(e);
            }
            Err(e) => {
                warn!("Render task failed: {}", e);
                summary.failures.push(RenderError::TaskJoin(e));
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_file_names() {
        assert_eq!(
            Chart::TemperatureTimeseries.file_name(),
            "01_temperature_timeseries.svg"
        );
        assert_eq!(
            Chart::SummaryInfographic.file_name(),
            "10_summary_infographic.svg"
        );
        let names: HashSet<String> = Chart::ALL.iter().map(|c| c.file_name()).collect();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn test_numbers_follow_order() {
        for (i, chart) in Chart::ALL.iter().enumerate() {
            assert_eq!(chart.number() as usize, i + 1);
        }
    }
}
