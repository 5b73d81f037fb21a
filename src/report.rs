//! The complete, serialisable result of one analysis run.

use crate::analysis::error::AnalysisError;
use crate::analysis::evaluator::{evaluate, Evaluation};
use crate::analysis::summary::{averages, rainy_years, wind_safe_years, ClimateAverages};
use crate::analysis::trend::{analyze_trend, TrendAnalysis};
use crate::analysis::window::{best_day, best_selected, score_window, suggest_alternatives, DayOdds};
use crate::settings::AnalysisSettings;
use crate::types::classification::ProbabilityLevel;
use crate::types::criteria::CriteriaSet;
use crate::types::event_date::EventDate;
use crate::types::history::ClimateHistory;
use crate::types::location::Location;
use crate::types::observation::Observation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the charts and exports need. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateReport {
    pub generated_at: DateTime<Utc>,
    pub location: Location,
    pub event: EventDate,
    pub criteria: CriteriaSet,
    pub start_year: i32,
    pub end_year: i32,
    /// Usable readings on the event date (the first selected day), sorted by year.
    pub observations: Vec<Observation>,
    pub evaluation: Evaluation,
    pub level: ProbabilityLevel,
    pub averages: ClimateAverages,
    pub rainy_years: usize,
    pub wind_safe_years: usize,
    pub trend: TrendAnalysis,
    /// Odds for each day of the date window that has data, ordered by offset.
    pub window: Vec<DayOdds>,
    pub best_day: Option<DayOdds>,
    /// Best day within the selected range. The event date itself for a single day.
    pub best_selected: Option<DayOdds>,
    /// Unselected days that beat `best_selected`.
    pub alternatives: Vec<DayOdds>,
}

impl ClimateReport {
    /// Runs every analysis over `history`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::EmptySample`] if the event date has no usable readings.
    pub fn build(
        history: &ClimateHistory,
        location: &Location,
        criteria: &CriteriaSet,
        settings: &AnalysisSettings,
    ) -> Result<Self, AnalysisError> {
        let observations = history.target().to_vec();
        let evaluation = evaluate(&observations, criteria)?;
        let trend = analyze_trend(
            &observations,
            criteria,
            history.end_year,
            settings.recent_years,
            settings.trend_threshold,
        );
        let window = score_window(history, criteria);
        let best_day = best_day(&window).cloned();
        let best_selected = best_selected(&window).cloned();
        let baseline = best_selected
            .as_ref()
            .map_or(evaluation.probability, |day| day.probability);
        let alternatives = suggest_alternatives(
            &window,
            baseline,
            settings.min_improvement,
            settings.max_suggestions,
        );

        Ok(Self {
            generated_at: Utc::now(),
            location: location.clone(),
            event: history.date,
            criteria: *criteria,
            start_year: history.start_year,
            end_year: history.end_year,
            averages: averages(&observations),
            rainy_years: rainy_years(&observations, criteria),
            wind_safe_years: wind_safe_years(&observations, criteria),
            level: evaluation.level(),
            observations,
            evaluation,
            trend,
            window,
            best_day,
            best_selected,
            alternatives,
        })
    }

    pub fn probability(&self) -> f64 {
        self.evaluation.probability
    }

    pub fn total_years(&self) -> usize {
        self.evaluation.total_years
    }

    pub fn dry_years(&self) -> usize {
        self.total_years() - self.rainy_years
    }

    pub fn is_hourly(&self) -> bool {
        self.event.is_hourly()
    }

    /// Whether the given year was ideal on the event date.
    pub fn is_ideal_year(&self, year: i32) -> bool {
        self.evaluation
            .verdicts
            .iter()
            .any(|verdict| verdict.year == year && verdict.ideal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::history::DayHistory;
    use crate::types::location::LatLon;
    use approx::assert_relative_eq;

    fn observation(year: i32, precipitation: f64) -> Observation {
        Observation {
            year,
            temp_max: 31.0,
            temp_min: 27.5,
            precipitation,
            wind: 6.0,
            humidity: 70.0,
        }
    }

    fn history() -> ClimateHistory {
        // Event day: every third year rains. The day after is always dry.
        let event: Vec<Observation> = (2005..=2024)
            .map(|year| observation(year, if year % 3 == 0 { 6.0 } else { 0.0 }))
            .collect();
        let after: Vec<Observation> = (2005..=2024).map(|year| observation(year, 0.0)).collect();
        ClimateHistory {
            location: LatLon(-22.9068, -43.1729),
            date: EventDate::new(12, 20, None),
            start_year: 2005,
            end_year: 2024,
            days: vec![
                DayHistory {
                    offset: 0,
                    month: 12,
                    day: 20,
                    observations: event,
                },
                DayHistory {
                    offset: 1,
                    month: 12,
                    day: 21,
                    observations: after,
                },
            ],
        }
    }

    #[test]
    fn test_build_report() -> Result<(), AnalysisError> {
        let report = ClimateReport::build(
            &history(),
            &Location::default(),
            &CriteriaSet::default(),
            &AnalysisSettings::default(),
        )?;

        // 2007, 2010, 2013, 2016, 2019, 2022 are divisible by 3
        assert_eq!(report.total_years(), 20);
        assert_eq!(report.evaluation.ideal_years, 14);
        assert_relative_eq!(report.probability(), 70.0);
        assert_eq!(report.level, ProbabilityLevel::Good);
        assert_eq!(report.rainy_years, 6);
        assert_eq!(report.dry_years(), 14);
        assert_eq!(report.wind_safe_years, 20);
        assert!(!report.is_ideal_year(2007));
        assert!(report.is_ideal_year(2008));

        assert_eq!(report.window.len(), 2);
        let best = report.best_day.as_ref().unwrap();
        assert_eq!(best.offset, 1);
        assert_relative_eq!(best.probability, 100.0);
        assert_eq!(report.best_selected.as_ref().map(|day| day.offset), Some(0));
        assert_eq!(report.alternatives.len(), 1);
        Ok(())
    }

    #[test]
    fn test_range_reports_best_selected_day() -> Result<(), AnalysisError> {
        let mut history = history();
        history.date = EventDate::new(12, 20, None).until(12, 21);
        let report = ClimateReport::build(
            &history,
            &Location::default(),
            &CriteriaSet::default(),
            &AnalysisSettings::default(),
        )?;

        // Headline odds stay on the first selected day
        assert_relative_eq!(report.probability(), 70.0);
        let best = report.best_selected.as_ref().unwrap();
        assert_eq!((best.month, best.day), (12, 21));
        assert_relative_eq!(best.probability, 100.0);
        // Both window days are selected, nothing is left to suggest
        assert!(report.alternatives.is_empty());
        Ok(())
    }

    #[test]
    fn test_report_serialises_to_json() -> Result<(), Box<dyn std::error::Error>> {
        let report = ClimateReport::build(
            &history(),
            &Location::default(),
            &CriteriaSet::default(),
            &AnalysisSettings::default(),
        )?;
        let json = serde_json::to_string(&report)?;
        let back: ClimateReport = serde_json::from_str(&json)?;
        assert_eq!(back.evaluation.ideal_years, report.evaluation.ideal_years);
        assert_eq!(back.level, ProbabilityLevel::Good);
        Ok(())
    }
}
