//! Descriptive statistics over the event date sample.

use crate::types::criteria::CriteriaSet;
use crate::types::observation::Observation;
use serde::{Deserialize, Serialize};

/// Mean of each field. All zero for an empty sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimateAverages {
    pub temp_max: f64,
    pub temp_min: f64,
    pub precipitation: f64,
    pub wind: f64,
    pub humidity: f64,
}

pub fn averages(observations: &[Observation]) -> ClimateAverages {
    if observations.is_empty() {
        return ClimateAverages::default();
    }
    let n = observations.len() as f64;
    let mean = |field: fn(&Observation) -> f64| observations.iter().map(field).sum::<f64>() / n;
    ClimateAverages {
        temp_max: mean(|o| o.temp_max),
        temp_min: mean(|o| o.temp_min),
        precipitation: mean(|o| o.precipitation),
        wind: mean(|o| o.wind),
        humidity: mean(|o| o.humidity),
    }
}

/// Years with more rain than the precipitation limit.
pub fn rainy_years(observations: &[Observation], criteria: &CriteriaSet) -> usize {
    observations
        .iter()
        .filter(|o| o.precipitation > criteria.precipitation_max)
        .count()
}

/// Years whose wind stayed within the limit.
pub fn wind_safe_years(observations: &[Observation], criteria: &CriteriaSet) -> usize {
    observations
        .iter()
        .filter(|o| o.wind <= criteria.wind_max)
        .count()
}

/// Population mean and standard deviation, `None` for an empty slice.
pub fn mean_and_std_dev(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Vec<Observation> {
        vec![
            Observation {
                year: 2010,
                temp_max: 30.0,
                temp_min: 24.0,
                precipitation: 0.0,
                wind: 4.0,
                humidity: 60.0,
            },
            Observation {
                year: 2011,
                temp_max: 34.0,
                temp_min: 26.0,
                precipitation: 8.0,
                wind: 16.0,
                humidity: 80.0,
            },
        ]
    }

    #[test]
    fn test_averages() {
        let avg = averages(&sample());
        assert_relative_eq!(avg.temp_max, 32.0);
        assert_relative_eq!(avg.temp_min, 25.0);
        assert_relative_eq!(avg.precipitation, 4.0);
        assert_relative_eq!(avg.wind, 10.0);
        assert_relative_eq!(avg.humidity, 70.0);
        assert_eq!(averages(&[]), ClimateAverages::default());
    }

    #[test]
    fn test_rain_and_wind_counts() {
        let criteria = CriteriaSet::default();
        assert_eq!(rainy_years(&sample(), &criteria), 1);
        assert_eq!(wind_safe_years(&sample(), &criteria), 1);
    }

    #[test]
    fn test_mean_and_std_dev() {
        let (mean, std_dev) = mean_and_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_relative_eq!(mean, 5.0);
        assert_relative_eq!(std_dev, 2.0);
        assert!(mean_and_std_dev(&[]).is_none());
    }
}
