//! Run configuration: where, when, what counts as ideal, and how to fetch and render.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `CLIMATE_ODDS_*` environment variables (nested keys separated by `__`, e.g.
//! `CLIMATE_ODDS_CRITERIA__WIND_MAX=12`). The binary applies command-line flags last.

pub mod error;

use crate::analysis::trend::{DEFAULT_RECENT_YEARS, DEFAULT_TREND_THRESHOLD};
use crate::analysis::window::DEFAULT_MAX_SUGGESTIONS;
use crate::power::fetcher::DEFAULT_WINDOW_DAYS;
use crate::types::criteria::CriteriaSet;
use crate::types::event_date::{EventDate, MAX_RANGE_DAYS};
use crate::types::location::Location;
use crate::types::profile::EventProfile;
use config::{Config, Environment, File, FileFormat};
use error::SettingsError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "CLIMATE_ODDS";

/// Root configuration object for one analysis run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub location: Location,
    pub event: EventDate,
    pub criteria: CriteriaConfig,
    pub source: SourceConfig,
    pub analysis: AnalysisSettings,
    pub output: OutputConfig,
}

/// The `[criteria]` section: an optional preset plus per-threshold overrides.
///
/// Unset thresholds come from the preset, or from [`CriteriaSet::default`]
/// when no preset is named.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaConfig {
    pub profile: Option<EventProfile>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub precipitation_min: Option<f64>,
    pub precipitation_max: Option<f64>,
    pub wind_max: Option<f64>,
    pub humidity_min: Option<f64>,
    pub humidity_max: Option<f64>,
}

impl CriteriaConfig {
    /// Thresholds from the named profile with explicit values applied on top.
    pub fn resolve(&self) -> CriteriaSet {
        let mut criteria = self
            .profile
            .map(EventProfile::criteria)
            .unwrap_or_default();
        if let Some(v) = self.temp_min {
            criteria.temp_min = v;
        }
        if let Some(v) = self.temp_max {
            criteria.temp_max = v;
        }
        if let Some(v) = self.precipitation_min {
            criteria.precipitation_min = Some(v);
        }
        if let Some(v) = self.precipitation_max {
            criteria.precipitation_max = v;
        }
        if let Some(v) = self.wind_max {
            criteria.wind_max = v;
        }
        if let Some(v) = self.humidity_min {
            criteria.humidity_min = Some(v);
        }
        if let Some(v) = self.humidity_max {
            criteria.humidity_max = v;
        }
        criteria
    }
}

/// NASA POWER access settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base of the temporal API; `/daily/point` or `/hourly/point` is appended.
    pub base_url: String,
    /// POWER user community (`RE`, `AG` or `SB`). Affects units of some parameters.
    pub community: String,
    /// Per-request timeout.
    pub timeout_seconds: u64,
    /// How many years to look back, ending the year before the current one.
    pub lookback_years: u32,
    /// Minimum number of usable years for the event date before the run aborts.
    pub min_years: usize,
    /// Upper bound on in-flight requests when fetching hourly data year by year.
    pub max_concurrent_requests: usize,
    /// Pause after each network request, to stay polite with the API.
    pub request_delay_ms: u64,
    pub use_cache: bool,
    /// Defaults to `<system cache dir>/climate_odds` when unset.
    pub cache_dir: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://power.larc.nasa.gov/api/temporal".to_string(),
            community: "RE".to_string(),
            timeout_seconds: 30,
            lookback_years: 20,
            min_years: 10,
            max_concurrent_requests: 4,
            request_delay_ms: 100,
            use_cache: true,
            cache_dir: None,
        }
    }
}

/// Knobs for the derived analyses (trend, date window, suggestions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Days on each side of the selected days that are scored for alternatives.
    pub window_days: u32,
    /// Size of the "recent" period used for the trend comparison.
    pub recent_years: u32,
    /// Percentage-point difference beyond which a trend is not "stable".
    pub trend_threshold: f64,
    pub max_suggestions: usize,
    /// An alternative date must beat the event date by more than this many points.
    pub min_improvement: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            recent_years: DEFAULT_RECENT_YEARS,
            trend_threshold: DEFAULT_TREND_THRESHOLD,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            min_improvement: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub export_json: bool,
    pub export_csv: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("visualizations"),
            export_json: true,
            export_csv: true,
        }
    }
}

impl AnalysisConfig {
    /// Loads defaults, the optional TOML file at `path`, then environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::FileNotFound`] if `path` is given but missing,
    /// [`SettingsError::Load`] if a source cannot be parsed or deserialized, and
    /// [`SettingsError::Invalid`] if the merged values fail [`AnalysisConfig::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(SettingsError::FileNotFound(path.to_path_buf()));
            }
            builder = builder.add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(true),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AnalysisConfig = builder
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(SettingsError::Load)?;

        config.validate()?;
        Ok(config)
    }

    /// Resolved ideal-weather thresholds for this run.
    pub fn criteria(&self) -> CriteriaSet {
        self.criteria.resolve()
    }

    /// Checks every value the pipeline relies on. Runs before any network I/O.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.validate_location()?;
        self.validate_event()?;
        self.validate_criteria()?;
        self.validate_source()?;
        self.validate_analysis()?;
        Ok(())
    }

    fn validate_location(&self) -> Result<(), SettingsError> {
        let Location {
            latitude,
            longitude,
            ..
        } = self.location;
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(SettingsError::invalid(
                "location.latitude",
                format!("{latitude} is outside -90..=90"),
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(SettingsError::invalid(
                "location.longitude",
                format!("{longitude} is outside -180..=180"),
            ));
        }
        Ok(())
    }

    fn validate_event(&self) -> Result<(), SettingsError> {
        let event = self.event;
        if !(1..=12).contains(&event.month) {
            return Err(SettingsError::invalid(
                "event.month",
                format!("{} is not a month (1-12)", event.month),
            ));
        }
        if !event.is_valid_day() {
            return Err(SettingsError::invalid(
                "event.day",
                format!("day {} does not exist in month {}", event.day, event.month),
            ));
        }
        if let Some(hour) = event.hour {
            if hour > 23 {
                return Err(SettingsError::invalid(
                    "event.hour",
                    format!("{hour} is not an hour (0-23)"),
                ));
            }
        }
        match (event.end_month, event.end_day) {
            (None, None) => {}
            (Some(month), Some(day)) => {
                if EventDate::new(month, day, None).is_valid_day() {
                    if event.selected_days() > MAX_RANGE_DAYS {
                        return Err(SettingsError::invalid(
                            "event.end_day",
                            format!(
                                "{} selected days exceed the maximum of {MAX_RANGE_DAYS}",
                                event.selected_days()
                            ),
                        ));
                    }
                } else {
                    return Err(SettingsError::invalid(
                        "event.end_day",
                        format!("day {day} does not exist in month {month}"),
                    ));
                }
            }
            _ => {
                return Err(SettingsError::invalid(
                    "event.end_day",
                    "end_month and end_day must be set together",
                ))
            }
        }
        Ok(())
    }

    fn validate_criteria(&self) -> Result<(), SettingsError> {
        let criteria = self.criteria();
        for (field, value) in [
            ("criteria.temp_min", criteria.temp_min),
            ("criteria.temp_max", criteria.temp_max),
        ] {
            if !value.is_finite() {
                return Err(SettingsError::invalid(field, "must be a finite number"));
            }
        }
        let amounts = [
            ("criteria.precipitation_min", criteria.precipitation_min),
            ("criteria.precipitation_max", Some(criteria.precipitation_max)),
            ("criteria.wind_max", Some(criteria.wind_max)),
            ("criteria.humidity_min", criteria.humidity_min),
            ("criteria.humidity_max", Some(criteria.humidity_max)),
        ];
        for (field, value) in amounts {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(SettingsError::invalid(
                        field,
                        "must be a non-negative number",
                    ));
                }
            }
        }
        if criteria.temp_min > criteria.temp_max {
            return Err(SettingsError::invalid(
                "criteria.temp_min",
                format!(
                    "minimum temperature {} is above maximum temperature {}",
                    criteria.temp_min, criteria.temp_max
                ),
            ));
        }
        if let Some(min) = criteria.precipitation_min {
            if min > criteria.precipitation_max {
                return Err(SettingsError::invalid(
                    "criteria.precipitation_min",
                    format!(
                        "minimum precipitation {min} is above maximum precipitation {}",
                        criteria.precipitation_max
                    ),
                ));
            }
        }
        if let Some(min) = criteria.humidity_min {
            if min > criteria.humidity_max {
                return Err(SettingsError::invalid(
                    "criteria.humidity_min",
                    format!(
                        "minimum humidity {min} is above maximum humidity {}",
                        criteria.humidity_max
                    ),
                ));
            }
        }
        Ok(())
    }

    fn validate_source(&self) -> Result<(), SettingsError> {
        let source = &self.source;
        if !source.base_url.starts_with("http://") && !source.base_url.starts_with("https://") {
            return Err(SettingsError::invalid(
                "source.base_url",
                "must be an HTTP or HTTPS URL",
            ));
        }
        if source.community.trim().is_empty() {
            return Err(SettingsError::invalid("source.community", "cannot be empty"));
        }
        if source.timeout_seconds == 0 || source.timeout_seconds > 300 {
            return Err(SettingsError::invalid(
                "source.timeout_seconds",
                "must be between 1 and 300",
            ));
        }
        if source.lookback_years == 0 {
            return Err(SettingsError::invalid(
                "source.lookback_years",
                "must be at least 1",
            ));
        }
        if source.min_years > source.lookback_years as usize {
            return Err(SettingsError::invalid(
                "source.min_years",
                format!(
                    "{} usable years can never be reached with a {} year lookback",
                    source.min_years, source.lookback_years
                ),
            ));
        }
        if source.max_concurrent_requests == 0 {
            return Err(SettingsError::invalid(
                "source.max_concurrent_requests",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    fn validate_analysis(&self) -> Result<(), SettingsError> {
        let analysis = &self.analysis;
        if analysis.window_days > 60 {
            return Err(SettingsError::invalid(
                "analysis.window_days",
                "cannot exceed 60",
            ));
        }
        if analysis.recent_years == 0 {
            return Err(SettingsError::invalid(
                "analysis.recent_years",
                "must be at least 1",
            ));
        }
        if !analysis.trend_threshold.is_finite() || analysis.trend_threshold < 0.0 {
            return Err(SettingsError::invalid(
                "analysis.trend_threshold",
                "must be a non-negative number",
            ));
        }
        if !analysis.min_improvement.is_finite() {
            return Err(SettingsError::invalid(
                "analysis.min_improvement",
                "must be a finite number",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.location.name, "Rio de Janeiro, Brazil");
        assert_eq!(config.event, EventDate::new(12, 20, None));
        assert_eq!(config.criteria(), CriteriaSet::default());
        assert_eq!(config.criteria().humidity_max, 75.0);
        assert_eq!(config.source.lookback_years, 20);
        assert_eq!(config.source.min_years, 10);
        assert_eq!(config.output.directory, PathBuf::from("visualizations"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        let mut config = AnalysisConfig::default();
        config.location.latitude = 91.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("location.latitude"));
    }

    #[test]
    fn test_invalid_day_for_month() {
        let mut config = AnalysisConfig::default();
        config.event = EventDate::new(2, 30, None);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "event.day", .. }));
    }

    #[test]
    fn test_leap_day_is_accepted() {
        let mut config = AnalysisConfig::default();
        config.event = EventDate::new(2, 29, Some(12));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_date_range_validation() {
        let mut config = AnalysisConfig::default();
        config.event = EventDate::new(12, 20, None).until(1, 10);
        assert!(config.validate().is_ok());

        config.event = EventDate::new(12, 20, None).until(4, 31);
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Invalid { field: "event.end_day", .. })
        ));

        config.event = EventDate::new(1, 1, None).until(3, 31);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exceed the maximum"));

        config.event = EventDate::new(1, 1, None);
        config.event.end_day = Some(5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_hour() {
        let mut config = AnalysisConfig::default();
        config.event.hour = Some(24);
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Invalid { field: "event.hour", .. })
        ));
    }

    #[test]
    fn test_inverted_temperature_bounds() {
        let mut config = AnalysisConfig::default();
        config.criteria.temp_min = Some(36.0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("above maximum temperature"));
    }

    #[test]
    fn test_min_years_above_lookback() {
        let mut config = AnalysisConfig::default();
        config.source.lookback_years = 5;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Invalid { field: "source.min_years", .. })
        ));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = AnalysisConfig::default();
        config.source.max_concurrent_requests = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_toml_keeps_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("climate.toml");
        let mut file = std::fs::File::create(&path)?;
        writeln!(
            file,
            r#"
[location]
latitude = 38.7223
longitude = -9.1393
name = "Lisbon, Portugal"

[event]
month = 7
day = 14
hour = 15

[criteria]
temp_min = 18
temp_max = 30
"#
        )?;

        let config = AnalysisConfig::load(Some(&path))?;
        assert_eq!(config.location.name, "Lisbon, Portugal");
        assert_eq!(config.event, EventDate::new(7, 14, Some(15)));
        let criteria = config.criteria();
        assert_eq!(criteria.temp_min, 18.0);
        assert_eq!(criteria.temp_max, 30.0);
        // Untouched values fall back to defaults
        assert_eq!(criteria.wind_max, 15.0);
        assert_eq!(config.source.community, "RE");
        Ok(())
    }

    #[test]
    fn test_profile_is_resolved_before_overrides() {
        let criteria = CriteriaConfig {
            profile: Some(EventProfile::Praia),
            wind_max: Some(12.0),
            ..CriteriaConfig::default()
        }
        .resolve();
        assert_eq!(criteria.temp_min, 28.0);
        assert_eq!(criteria.temp_max, 45.0);
        assert_eq!(criteria.humidity_max, 80.0);
        assert_eq!(criteria.wind_max, 12.0);
    }

    #[test]
    fn test_picnic_profile_keeps_lower_bounds() {
        let criteria = CriteriaConfig {
            profile: Some(EventProfile::Piquenique),
            precipitation_min: Some(0.0),
            ..CriteriaConfig::default()
        }
        .resolve();
        assert_eq!(criteria.temp_min, 22.0);
        assert_eq!(criteria.precipitation_max, 0.5);
        assert_eq!(criteria.precipitation_min, Some(0.0));
        assert_eq!(criteria.humidity_min, Some(40.0));
    }

    #[test]
    fn test_inverted_humidity_bounds() {
        let mut config = AnalysisConfig::default();
        config.criteria.humidity_min = Some(80.0);
        assert!(matches!(
            config.validate(),
            Err(SettingsError::Invalid { field: "criteria.humidity_min", .. })
        ));
    }

    #[test]
    fn test_load_profile_from_toml() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("festa.toml");
        std::fs::write(
            &path,
            "[event]\nmonth = 6\nday = 24\n\n[criteria]\nprofile = \"festa_junina\"\ntemp_max = 30\n",
        )?;

        let config = AnalysisConfig::load(Some(&path))?;
        assert_eq!(config.criteria.profile, Some(EventProfile::FestaJunina));
        let criteria = config.criteria();
        assert_eq!(criteria.temp_min, 16.0);
        assert_eq!(criteria.temp_max, 30.0);
        assert_eq!(criteria.humidity_min, Some(35.0));
        assert_eq!(criteria.humidity_max, 65.0);
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let result = AnalysisConfig::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(SettingsError::FileNotFound(_))));
    }

    #[test]
    fn test_load_invalid_values_fail_validation() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[event]\nmonth = 13\nday = 1\n")?;

        let result = AnalysisConfig::load(Some(&path));
        assert!(matches!(
            result,
            Err(SettingsError::Invalid { field: "event.month", .. })
        ));
        Ok(())
    }
}
