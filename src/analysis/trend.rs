//! Recent versus historical odds, and the drift of the maximum temperature.

use crate::analysis::evaluator::is_ideal;
use crate::types::criteria::CriteriaSet;
use crate::types::observation::Observation;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_RECENT_YEARS: u32 = 10;
pub const DEFAULT_TREND_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Recent years are ideal more often.
    Positive,
    Negative,
    Stable,
}

impl TrendDirection {
    pub fn from_difference(difference: f64, threshold: f64) -> Self {
        if difference > threshold {
            TrendDirection::Positive
        } else if difference < -threshold {
            TrendDirection::Negative
        } else {
            TrendDirection::Stable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrendDirection::Positive => "POSITIVE",
            TrendDirection::Negative => "NEGATIVE",
            TrendDirection::Stable => "STABLE",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Odds over a contiguous run of years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodProbability {
    pub first_year: i32,
    pub last_year: i32,
    pub ideal_years: usize,
    pub total_years: usize,
    pub probability: f64,
}

impl PeriodProbability {
    /// `None` for an empty period.
    fn from_observations(observations: &[&Observation], criteria: &CriteriaSet) -> Option<Self> {
        let first_year = observations.iter().map(|o| o.year).min()?;
        let last_year = observations.iter().map(|o| o.year).max()?;
        let ideal_years = observations
            .iter()
            .filter(|o| is_ideal(o, criteria))
            .count();
        let total_years = observations.len();
        Some(Self {
            first_year,
            last_year,
            ideal_years,
            total_years,
            probability: ideal_years as f64 / total_years as f64 * 100.0,
        })
    }

    /// `"2005-2014"`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.first_year, self.last_year)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub historical: Option<PeriodProbability>,
    pub recent: Option<PeriodProbability>,
    /// Recent minus historical probability, in percentage points. 0 if either period is empty.
    pub difference: f64,
    pub direction: TrendDirection,
    /// Least-squares slope of `temp_max` against year, °C per year.
    pub temp_max_slope: Option<f64>,
    pub temp_max_intercept: Option<f64>,
}

impl TrendAnalysis {
    /// Fitted `temp_max` for `year`, if a fit exists.
    pub fn fitted_temp_max(&self, year: i32) -> Option<f64> {
        Some(self.temp_max_slope? * year as f64 + self.temp_max_intercept?)
    }
}

/// Splits `observations` at `end_year - recent_years + 1` and compares the two halves.
pub fn analyze_trend(
    observations: &[Observation],
    criteria: &CriteriaSet,
    end_year: i32,
    recent_years: u32,
    threshold: f64,
) -> TrendAnalysis {
    let recent_start = end_year - recent_years as i32 + 1;
    let (recent, historical): (Vec<&Observation>, Vec<&Observation>) = observations
        .iter()
        .partition(|o| o.year >= recent_start);

    let historical = PeriodProbability::from_observations(&historical, criteria);
    let recent = PeriodProbability::from_observations(&recent, criteria);
    let difference = match (&historical, &recent) {
        (Some(historical), Some(recent)) => recent.probability - historical.probability,
        _ => 0.0,
    };

    let points: Vec<(f64, f64)> = observations
        .iter()
        .map(|o| (o.year as f64, o.temp_max))
        .collect();
    let fit = linear_fit(&points);

    TrendAnalysis {
        historical,
        recent,
        difference,
        direction: TrendDirection::from_difference(difference, threshold),
        temp_max_slope: fit.map(|(slope, _)| slope),
        temp_max_intercept: fit.map(|(_, intercept)| intercept),
    }
}

/// Ordinary least squares `y = slope * x + intercept`.
///
/// Returns `None` with fewer than two points or when all `x` are equal.
pub fn linear_fit(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (covariance, variance) = points.iter().fold((0.0, 0.0), |(cov, var), (x, y)| {
        let dx = x - mean_x;
        (cov + dx * (y - mean_y), var + dx * dx)
    });
    if variance == 0.0 {
        return None;
    }

    let slope = covariance / variance;
    Some((slope, mean_y - slope * mean_x))
}
