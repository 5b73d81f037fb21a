use serde::{Deserialize, Serialize};

/// Value the POWER API reports when it has no reading for a parameter/date.
pub const MISSING_VALUE: f64 = -999.0;

/// One year's weather reading for the configured location and date.
///
/// For hourly events `temp_max` and `temp_min` hold the same `T2M` value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub year: i32,
    pub temp_max: f64,           // °C
    pub temp_min: f64,           // °C
    pub precipitation: f64,      // mm/day, or mm/hour for hourly events
    pub wind: f64,               // m/s at 10 m
    pub humidity: f64,           // relative humidity, %
}

impl Observation {
    /// Builds an observation from raw API values, or `None` if any of them is the
    /// missing-value sentinel (or otherwise not a finite number).
    pub fn from_readings(
        year: i32,
        temp_max: f64,
        temp_min: f64,
        precipitation: f64,
        wind: f64,
        humidity: f64,
    ) -> Option<Self> {
        let readings = [temp_max, temp_min, precipitation, wind, humidity];
        if readings.iter().any(|&value| is_missing(value)) {
            return None;
        }
        Some(Self {
            year,
            temp_max,
            temp_min,
            precipitation,
            wind,
            humidity,
        })
    }
}

pub fn is_missing(value: f64) -> bool {
    !value.is_finite() || value == MISSING_VALUE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_reading_is_kept() {
        let observation = Observation::from_readings(2010, 30.0, 28.0, 0.5, 10.0, 70.0);
        assert_eq!(
            observation,
            Some(Observation {
                year: 2010,
                temp_max: 30.0,
                temp_min: 28.0,
                precipitation: 0.5,
                wind: 10.0,
                humidity: 70.0,
            })
        );
    }

    #[test]
    fn test_sentinel_in_any_field_drops_the_reading() {
        let complete = [30.0, 28.0, 0.5, 10.0, 70.0];
        for field in 0..complete.len() {
            let mut values = complete;
            values[field] = MISSING_VALUE;
            let observation =
                Observation::from_readings(2010, values[0], values[1], values[2], values[3], values[4]);
            assert!(observation.is_none(), "sentinel in field {} was not dropped", field);
        }
    }

    #[test]
    fn test_nan_counts_as_missing() {
        assert!(is_missing(f64::NAN));
        assert!(!is_missing(-998.9));
    }
}
