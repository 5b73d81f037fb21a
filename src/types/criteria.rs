use serde::{Deserialize, Serialize};

/// Thresholds that define "ideal" weather for the event.
///
/// All bounds are inclusive: a reading exactly on a threshold satisfies it.
/// The two lower bounds are optional and unchecked when `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaSet {
    /// Lowest acceptable minimum temperature (°C).
    pub temp_min: f64,
    /// Highest acceptable maximum temperature (°C).
    pub temp_max: f64,
    /// Lowest acceptable precipitation (mm), for events that want rain.
    pub precipitation_min: Option<f64>,
    /// Highest acceptable precipitation (mm).
    pub precipitation_max: f64,
    /// Highest acceptable wind speed (m/s).
    pub wind_max: f64,
    /// Lowest acceptable relative humidity (%).
    pub humidity_min: Option<f64>,
    /// Highest acceptable relative humidity (%).
    pub humidity_max: f64,
}

impl CriteriaSet {
    /// Number of thresholds that are checked, optional lower bounds included.
    pub fn threshold_count(&self) -> usize {
        5 + usize::from(self.precipitation_min.is_some()) + usize::from(self.humidity_min.is_some())
    }
}

impl Default for CriteriaSet {
    // A warm, dry beach day.
    fn default() -> Self {
        Self {
            temp_min: 27.0,
            temp_max: 35.0,
            precipitation_min: None,
            precipitation_max: 1.0,
            wind_max: 15.0,
            humidity_min: None,
            humidity_max: 75.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_count() {
        assert_eq!(CriteriaSet::default().threshold_count(), 5);
        let bounded = CriteriaSet {
            humidity_min: Some(40.0),
            ..CriteriaSet::default()
        };
        assert_eq!(bounded.threshold_count(), 6);
    }
}
