//! The calendar date (and optional hour) whose history is being scored.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// A leap year, so that every valid month/day pair (Feb 29 included) resolves.
const REFERENCE_YEAR: i32 = 2000;

/// Longest selectable range, counting both ends.
pub const MAX_RANGE_DAYS: i64 = 60;

/// Month, day and optional hour of the event, independent of any year.
///
/// When `hour` is `None` the daily POWER endpoint is used and both the
/// maximum and minimum temperature of the day are available. With an hour set,
/// the hourly endpoint is queried and a single `T2M` reading stands in for both.
///
/// An optional end day turns the event into a range of selected days
/// (`month/day` through `end_month/end_day`). A range may cross New Year.
///
/// # Examples
///
/// ```
/// use climate_odds::EventDate;
///
/// let christmas_afternoon = EventDate::new(12, 25, Some(14));
/// assert_eq!(christmas_afternoon.to_string(), "12/25 at 14:00");
/// assert!(christmas_afternoon.is_hourly());
///
/// let new_year = EventDate::new(12, 30, None).until(1, 2);
/// assert_eq!(new_year.selected_days(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDate {
    pub month: u32,
    pub day: u32,
    pub hour: Option<u32>,
    /// Last selected month, when the event spans several days.
    pub end_month: Option<u32>,
    pub end_day: Option<u32>,
}

impl EventDate {
    pub fn new(month: u32, day: u32, hour: Option<u32>) -> Self {
        Self {
            month,
            day,
            hour,
            end_month: None,
            end_day: None,
        }
    }

    /// Extends the event through `month`/`day`.
    pub fn until(self, month: u32, day: u32) -> Self {
        Self {
            end_month: Some(month),
            end_day: Some(day),
            ..self
        }
    }

    /// Whether more than one day is selected.
    pub fn is_range(&self) -> bool {
        self.last_offset() > 0
    }

    /// The last selected day, if an end day is set.
    pub fn end(&self) -> Option<(u32, u32)> {
        self.end_month.zip(self.end_day)
    }

    /// Offset of the last selected day from the first. `0` for a single day.
    ///
    /// An end day before the start day in the calendar wraps into the next year.
    pub fn last_offset(&self) -> i64 {
        let Some((month, day)) = self.end() else {
            return 0;
        };
        let (Some(start), Some(end)) = (
            self.in_year(REFERENCE_YEAR),
            NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day),
        ) else {
            return 0;
        };
        let days = (end - start).num_days();
        if days < 0 {
            days + 366
        } else {
            days
        }
    }

    /// Number of selected days, counting both ends.
    pub fn selected_days(&self) -> i64 {
        self.last_offset() + 1
    }

    pub fn is_selected(&self, offset: i64) -> bool {
        (0..=self.last_offset()).contains(&offset)
    }

    /// Offsets of the selected days plus `window_days` on either side.
    pub fn window_offsets(&self, window_days: i64) -> RangeInclusive<i64> {
        -window_days..=self.last_offset() + window_days
    }

    pub fn is_hourly(&self) -> bool {
        self.hour.is_some()
    }

    /// Resolves the event in a concrete year.
    ///
    /// Returns `None` when the month/day does not exist in that year, which only
    /// happens for February 29th outside leap years.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }

    /// Whether the month/day pair exists in at least one year.
    pub fn is_valid_day(&self) -> bool {
        self.in_year(REFERENCE_YEAR).is_some()
    }

    /// Month and day of the calendar day `offset` days away from the event.
    ///
    /// Computed against a leap reference year, so the labels are stable no
    /// matter which historical year a reading came from.
    pub fn shifted(&self, offset: i64) -> Option<(u32, u32)> {
        let date = self.in_year(REFERENCE_YEAR)? + Duration::days(offset);
        Some((date.month(), date.day()))
    }

    /// The concrete date `offset` days from the event in `year`'s occurrence of it.
    ///
    /// Month and day always match [`EventDate::shifted`]; the year rolls over when
    /// the window crosses New Year. `None` when that day does not exist in the
    /// resulting year (February 29th outside leap years).
    pub fn window_date(&self, year: i32, offset: i64) -> Option<NaiveDate> {
        let shifted = self.in_year(REFERENCE_YEAR)? + Duration::days(offset);
        let year = year + shifted.year() - REFERENCE_YEAR;
        NaiveDate::from_ymd_opt(year, shifted.month(), shifted.day())
    }

    /// `"Dec 20"`, or `"Dec 20 - Dec 27"` for a range.
    pub fn label(&self) -> String {
        let start = day_label(self.month, self.day);
        match self.end() {
            Some((month, day)) if self.is_range() => {
                format!("{start} - {}", day_label(month, day))
            }
            _ => start,
        }
    }

    /// `" at 14:00"` for hourly events, empty otherwise. Used in chart titles.
    pub fn time_suffix(&self) -> String {
        match self.hour {
            Some(hour) => format!(" at {:02}:00", hour),
            None => String::new(),
        }
    }
}

impl Default for EventDate {
    fn default() -> Self {
        Self {
            month: 12,
            day: 20,
            hour: None,
            end_month: None,
            end_day: None,
        }
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.day)?;
        if let Some((month, day)) = self.end().filter(|_| self.is_range()) {
            write!(f, "-{:02}/{:02}", month, day)?;
        }
        f.write_str(&self.time_suffix())
    }
}

/// Short month and day used on chart labels ("Dec 20"). Empty for invalid dates.
pub fn day_label(month: u32, day: u32) -> String {
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day)
        .map(|date| date.format("%b %d").to_string())
        .unwrap_or_default()
}
