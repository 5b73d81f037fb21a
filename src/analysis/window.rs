//! Odds for the days around the event date, and better alternatives among them.

use crate::analysis::evaluator::evaluate;
use crate::types::criteria::CriteriaSet;
use crate::types::event_date::day_label;
use crate::types::history::ClimateHistory;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOdds {
    pub offset: i64,
    pub month: u32,
    pub day: u32,
    pub ideal_years: usize,
    pub total_years: usize,
    pub probability: f64,
    /// Whether the day is part of the selected date range.
    pub selected: bool,
}

impl DayOdds {
    /// `"Dec 20"`.
    pub fn label(&self) -> String {
        day_label(self.month, self.day)
    }

    pub fn is_target(&self) -> bool {
        self.offset == 0
    }
}

/// Scores every day of the window that has at least one observation.
pub fn score_window(history: &ClimateHistory, criteria: &CriteriaSet) -> Vec<DayOdds> {
    history
        .days
        .iter()
        .filter_map(|day| {
            let evaluation = evaluate(&day.observations, criteria).ok()?;
            Some(DayOdds {
                offset: day.offset,
                month: day.month,
                day: day.day,
                ideal_years: evaluation.ideal_years,
                total_years: evaluation.total_years,
                probability: evaluation.probability,
                selected: history.date.is_selected(day.offset),
            })
        })
        .collect()
}

/// Higher probability first, then closer to the event date, then earlier.
fn rank(a: &DayOdds, b: &DayOdds) -> Ordering {
    b.probability
        .total_cmp(&a.probability)
        .then_with(|| a.offset.abs().cmp(&b.offset.abs()))
        .then_with(|| a.offset.cmp(&b.offset))
}

/// The day with the best odds. Ties go to the day closest to the event.
pub fn best_day(odds: &[DayOdds]) -> Option<&DayOdds> {
    odds.iter().min_by(|a, b| rank(a, b))
}

/// The best day among the selected ones.
pub fn best_selected(odds: &[DayOdds]) -> Option<&DayOdds> {
    odds.iter().filter(|day| day.selected).min_by(|a, b| rank(a, b))
}

/// Days outside the selection that beat `target_probability` by more than
/// `min_improvement` points, best first, at most `max_suggestions`.
pub fn suggest_alternatives(
    odds: &[DayOdds],
    target_probability: f64,
    min_improvement: f64,
    max_suggestions: usize,
) -> Vec<DayOdds> {
    let mut alternatives: Vec<DayOdds> = odds
        .iter()
        .filter(|day| !day.selected)
        .filter(|day| day.probability > target_probability + min_improvement)
        .cloned()
        .collect();
    alternatives.sort_by(rank);
    alternatives.truncate(max_suggestions);
    alternatives
}
