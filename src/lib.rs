mod analysis;
mod climate_odds;
mod error;
mod export;
mod power;
mod render;
mod report;
mod settings;
mod types;
mod utils;

pub use climate_odds::*;
pub use error::ClimateOddsError;

pub use settings::error::SettingsError;
pub use settings::{AnalysisConfig, AnalysisSettings, CriteriaConfig, OutputConfig, SourceConfig, ENV_PREFIX};

pub use types::classification::ProbabilityLevel;
pub use types::criteria::CriteriaSet;
pub use types::event_date::{EventDate, MAX_RANGE_DAYS};
pub use types::history::{ClimateHistory, DayHistory};
pub use types::location::{LatLon, Location};
pub use types::observation::{Observation, MISSING_VALUE};
pub use types::profile::{EventProfile, UnknownProfile};

pub use power::error::FetchError;
pub use power::fetcher::{PowerFetcher, DEFAULT_WINDOW_DAYS};
pub use power::request::{PowerRequest, Resolution};

pub use analysis::error::AnalysisError;
pub use analysis::evaluator::{assess, evaluate, is_ideal, Evaluation, Violation, YearVerdict};
pub use analysis::summary::{averages, ClimateAverages};
pub use analysis::trend::{analyze_trend, PeriodProbability, TrendAnalysis, TrendDirection};
pub use analysis::window::{best_day, best_selected, score_window, suggest_alternatives, DayOdds};

pub use report::ClimateReport;

pub use export::error::ExportError;
pub use export::{export_all, write_csv, write_json, CSV_FILE_NAME, JSON_FILE_NAME};

pub use render::error::RenderError;
pub use render::{render_all, Chart, RenderSummary};
