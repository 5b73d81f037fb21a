//! Per-year observations returned by the fetcher, grouped by day of the date window.

use crate::types::event_date::EventDate;
use crate::types::location::LatLon;
use crate::types::observation::Observation;
use serde::{Deserialize, Serialize};

/// All usable readings for one calendar day of the window, one per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayHistory {
    /// Days from the event date (0 is the event itself).
    pub offset: i64,
    pub month: u32,
    pub day: u32,
    /// Sorted by year. Years with missing readings are absent.
    pub observations: Vec<Observation>,
}

/// Result of a fetch: the lookback period and the readings for every window day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateHistory {
    pub location: LatLon,
    pub date: EventDate,
    /// First year of the lookback window (inclusive).
    pub start_year: i32,
    /// Last year of the lookback window (inclusive), the year before the current one.
    pub end_year: i32,
    /// Ordered by offset, from `-window_days` to `+window_days`.
    pub days: Vec<DayHistory>,
}

impl ClimateHistory {
    /// Readings for the event date itself.
    pub fn target(&self) -> &[Observation] {
        self.days
            .iter()
            .find(|day| day.offset == 0)
            .map(|day| day.observations.as_slice())
            .unwrap_or(&[])
    }

    /// Number of years in the lookback window, usable or not.
    pub fn span_years(&self) -> usize {
        (self.end_year - self.start_year + 1).max(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(offset: i64, years: &[i32]) -> DayHistory {
        DayHistory {
            offset,
            month: 12,
            day: (20 + offset) as u32,
            observations: years
                .iter()
                .map(|&year| Observation {
                    year,
                    temp_max: 30.0,
                    temp_min: 25.0,
                    precipitation: 0.0,
                    wind: 3.0,
                    humidity: 60.0,
                })
                .collect(),
        }
    }

    #[test]
    fn test_target_picks_offset_zero() {
        let history = ClimateHistory {
            location: LatLon(0.0, 0.0),
            date: EventDate::new(12, 20, None),
            start_year: 2005,
            end_year: 2024,
            days: vec![day(-1, &[2005]), day(0, &[2005, 2006]), day(1, &[])],
        };
        assert_eq!(history.target().len(), 2);
        assert_eq!(history.span_years(), 20);
    }

    #[test]
    fn test_target_is_empty_without_offset_zero() {
        let history = ClimateHistory {
            location: LatLon(0.0, 0.0),
            date: EventDate::default(),
            start_year: 2005,
            end_year: 2024,
            days: vec![day(1, &[2005])],
        };
        assert!(history.target().is_empty());
    }
}
