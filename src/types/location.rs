//! Geographic types used to address a POWER point query.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use climate_odds::LatLon;
///
/// let rio = LatLon(-22.9068, -43.1729);
/// assert_eq!(rio.0, -22.9068); // Latitude
/// assert_eq!(rio.1, -43.1729); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(self) -> f64 {
        self.0
    }

    pub fn longitude(self) -> f64 {
        self.1
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lat={:.4}, lon={:.4}", self.0, self.1)
    }
}

/// A named place. The name is only used for chart titles and log lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

impl Location {
    pub fn lat_lon(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            latitude: -22.9068,
            longitude: -43.1729,
            name: "Rio de Janeiro, Brazil".to_string(),
        }
    }
}
