//! Buckets a probability into the five levels used in summaries and chart colours.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbabilityLevel {
    Excellent,
    Good,
    Moderate,
    Low,
    VeryLow,
}

impl ProbabilityLevel {
    pub const ALL: [ProbabilityLevel; 5] = [
        ProbabilityLevel::Excellent,
        ProbabilityLevel::Good,
        ProbabilityLevel::Moderate,
        ProbabilityLevel::Low,
        ProbabilityLevel::VeryLow,
    ];

    /// Classifies a percentage in `0..=100`.
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 80.0 {
            ProbabilityLevel::Excellent
        } else if probability >= 60.0 {
            ProbabilityLevel::Good
        } else if probability >= 40.0 {
            ProbabilityLevel::Moderate
        } else if probability >= 20.0 {
            ProbabilityLevel::Low
        } else {
            ProbabilityLevel::VeryLow
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProbabilityLevel::Excellent => "EXCELLENT",
            ProbabilityLevel::Good => "GOOD",
            ProbabilityLevel::Moderate => "MODERATE",
            ProbabilityLevel::Low => "LOW",
            ProbabilityLevel::VeryLow => "VERY LOW",
        }
    }

    /// Range description for legends, e.g. `"Good (60-79%)"`.
    pub fn legend(self) -> &'static str {
        match self {
            ProbabilityLevel::Excellent => "Excellent (>=80%)",
            ProbabilityLevel::Good => "Good (60-79%)",
            ProbabilityLevel::Moderate => "Moderate (40-59%)",
            ProbabilityLevel::Low => "Low (20-39%)",
            ProbabilityLevel::VeryLow => "Very low (<20%)",
        }
    }

    /// One-line advice printed next to the probability.
    pub fn advice(self) -> &'static str {
        match self {
            ProbabilityLevel::Excellent => "Very high chance of ideal weather.",
            ProbabilityLevel::Good => "Good chance of favourable weather.",
            ProbabilityLevel::Moderate => "Moderate chance, have a plan B.",
            ProbabilityLevel::Low => "Low chance, consider another date.",
            ProbabilityLevel::VeryLow => "Ideal weather is very unlikely on this date.",
        }
    }
}

impl fmt::Display for ProbabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
