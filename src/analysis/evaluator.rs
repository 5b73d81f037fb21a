//! Scores observations against a [`CriteriaSet`].
//!
//! A year is ideal when every configured threshold holds at once. There is no
//! weighting and no partial credit; readings exactly on a threshold pass.

use crate::analysis::error::AnalysisError;
use crate::types::classification::ProbabilityLevel;
use crate::types::criteria::CriteriaSet;
use crate::types::observation::Observation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A threshold a reading failed, with the offending value and the limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    TooCold { value: f64, limit: f64 },
    TooHot { value: f64, limit: f64 },
    NotEnoughRain { value: f64, limit: f64 },
    TooWet { value: f64, limit: f64 },
    TooWindy { value: f64, limit: f64 },
    TooDry { value: f64, limit: f64 },
    TooHumid { value: f64, limit: f64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Violation::TooCold { value, limit } => {
                write!(f, "too cold ({value:.1}°C < {limit:.1}°C)")
            }
            Violation::TooHot { value, limit } => {
                write!(f, "too hot ({value:.1}°C > {limit:.1}°C)")
            }
            Violation::NotEnoughRain { value, limit } => {
                write!(f, "too little rain ({value:.1}mm < {limit:.1}mm)")
            }
            Violation::TooWet { value, limit } => {
                write!(f, "too much rain ({value:.1}mm > {limit:.1}mm)")
            }
            Violation::TooWindy { value, limit } => {
                write!(f, "too windy ({value:.1}m/s > {limit:.1}m/s)")
            }
            Violation::TooDry { value, limit } => {
                write!(f, "too dry ({value:.1}% < {limit:.1}%)")
            }
            Violation::TooHumid { value, limit } => {
                write!(f, "too humid ({value:.1}% > {limit:.1}%)")
            }
        }
    }
}

/// Outcome for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearVerdict {
    pub year: i32,
    pub ideal: bool,
    /// Empty when `ideal` is true.
    pub violations: Vec<Violation>,
}

impl YearVerdict {
    /// Comma separated violations, or `"OK"`.
    pub fn reasons(&self) -> String {
        if self.violations.is_empty() {
            return "OK".to_string();
        }
        self.violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Checks every threshold and records the ones that fail.
pub fn assess(observation: &Observation, criteria: &CriteriaSet) -> YearVerdict {
    let mut violations = Vec::new();

    if observation.temp_min < criteria.temp_min {
        violations.push(Violation::TooCold {
            value: observation.temp_min,
            limit: criteria.temp_min,
        });
    }
    if observation.temp_max > criteria.temp_max {
        violations.push(Violation::TooHot {
            value: observation.temp_max,
            limit: criteria.temp_max,
        });
    }
    if let Some(limit) = criteria.precipitation_min {
        if observation.precipitation < limit {
            violations.push(Violation::NotEnoughRain {
                value: observation.precipitation,
                limit,
            });
        }
    }
    if observation.precipitation > criteria.precipitation_max {
        violations.push(Violation::TooWet {
            value: observation.precipitation,
            limit: criteria.precipitation_max,
        });
    }
    if observation.wind > criteria.wind_max {
        violations.push(Violation::TooWindy {
            value: observation.wind,
            limit: criteria.wind_max,
        });
    }
    if let Some(limit) = criteria.humidity_min {
        if observation.humidity < limit {
            violations.push(Violation::TooDry {
                value: observation.humidity,
                limit,
            });
        }
    }
    if observation.humidity > criteria.humidity_max {
        violations.push(Violation::TooHumid {
            value: observation.humidity,
            limit: criteria.humidity_max,
        });
    }

    YearVerdict {
        year: observation.year,
        ideal: violations.is_empty(),
        violations,
    }
}

pub fn is_ideal(observation: &Observation, criteria: &CriteriaSet) -> bool {
    assess(observation, criteria).ideal
}

/// Per-year verdicts and the share of ideal years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub verdicts: Vec<YearVerdict>,
    pub ideal_years: usize,
    pub total_years: usize,
    /// `ideal_years / total_years * 100`.
    pub probability: f64,
}

impl Evaluation {
    pub fn level(&self) -> ProbabilityLevel {
        ProbabilityLevel::from_probability(self.probability)
    }

    pub fn failed_years(&self) -> usize {
        self.total_years - self.ideal_years
    }
}

/// Evaluates every observation and aggregates the probability of an ideal year.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptySample`] when `observations` is empty.
pub fn evaluate(
    observations: &[Observation],
    criteria: &CriteriaSet,
) -> Result<Evaluation, AnalysisError> {
    if observations.is_empty() {
        return Err(AnalysisError::EmptySample);
    }

    let verdicts: Vec<YearVerdict> = observations
        .iter()
        .map(|observation| assess(observation, criteria))
        .collect();
    let ideal_years = verdicts.iter().filter(|verdict| verdict.ideal).count();
    let total_years = verdicts.len();

    Ok(Evaluation {
        verdicts,
        ideal_years,
        total_years,
        probability: ideal_years as f64 / total_years as f64 * 100.0,
    })
}
