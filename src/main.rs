use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{ArgAction, Parser};
use climate_odds::{AnalysisConfig, ClimateOdds, ClimateReport, EventDate, EventProfile, RunOutput};
use log::{warn, LevelFilter};
use std::path::PathBuf;

/// Odds of ideal weather on a calendar date, from 20 years of NASA POWER history.
#[derive(Debug, Parser)]
#[command(name = "climate-odds", version, about)]
struct Cli {
    /// TOML configuration file. Flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,
    /// Place name used in chart titles.
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    month: Option<u32>,
    #[arg(long)]
    day: Option<u32>,
    /// Last day of a date range, as MM-DD.
    #[arg(long, value_parser = parse_month_day)]
    end: Option<(u32, u32)>,
    /// Hour of day (0-23, UTC). Switches to hourly data.
    #[arg(long, conflicts_with = "daily")]
    hour: Option<u32>,
    /// Use daily aggregates even if the configuration sets an hour.
    #[arg(long)]
    daily: bool,

    /// Event preset (praia, churrasco, pelada, festa_junina, samba_pagode,
    /// carnaval, volei_praia, pescaria, piquenique, trilha, customizavel).
    /// Threshold flags override its values.
    #[arg(long)]
    profile: Option<EventProfile>,
    #[arg(long, allow_hyphen_values = true)]
    temp_min: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    temp_max: Option<f64>,
    #[arg(long)]
    precip_min: Option<f64>,
    #[arg(long)]
    precip_max: Option<f64>,
    #[arg(long)]
    wind_max: Option<f64>,
    #[arg(long)]
    humidity_min: Option<f64>,
    #[arg(long)]
    humidity_max: Option<f64>,

    /// Days on each side of the selection scored for alternatives.
    #[arg(long)]
    window: Option<u32>,

    /// Directory for charts and exports.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Skip report.json and observations.csv.
    #[arg(long)]
    no_export: bool,
    /// Always hit the API, ignoring cached responses.
    #[arg(long)]
    no_cache: bool,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(lat) = self.lat {
            config.location.latitude = lat;
        }
        if let Some(lon) = self.lon {
            config.location.longitude = lon;
        }
        if let Some(name) = &self.name {
            config.location.name = name.clone();
        }
        if let Some(month) = self.month {
            config.event.month = month;
        }
        if let Some(day) = self.day {
            config.event.day = day;
        }
        if let Some((month, day)) = self.end {
            config.event = config.event.until(month, day);
        }
        if self.daily {
            config.event.hour = None;
        } else if self.hour.is_some() {
            config.event.hour = self.hour;
        }
        let criteria = &mut config.criteria;
        if self.profile.is_some() {
            criteria.profile = self.profile;
        }
        let overrides = [
            (&mut criteria.temp_min, self.temp_min),
            (&mut criteria.temp_max, self.temp_max),
            (&mut criteria.precipitation_min, self.precip_min),
            (&mut criteria.precipitation_max, self.precip_max),
            (&mut criteria.wind_max, self.wind_max),
            (&mut criteria.humidity_min, self.humidity_min),
            (&mut criteria.humidity_max, self.humidity_max),
        ];
        for (slot, value) in overrides {
            if value.is_some() {
                *slot = value;
            }
        }
        if let Some(window) = self.window {
            config.analysis.window_days = window;
        }
        if let Some(output) = &self.output {
            config.output.directory = output.clone();
        }
        if self.no_export {
            config.output.export_json = false;
            config.output.export_csv = false;
        }
        if self.no_cache {
            config.source.use_cache = false;
        }
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Parses `MM-DD` (Feb 29 allowed).
fn parse_month_day(raw: &str) -> Result<(u32, u32), String> {
    NaiveDate::parse_from_str(&format!("2000-{raw}"), "%Y-%m-%d")
        .map(|date| (date.month(), date.day()))
        .map_err(|e| format!("expected MM-DD: {e}"))
}

fn print_report(report: &ClimateReport) {
    println!();
    println!(
        "{} ({:.4}, {:.4}) on {}, {}-{}",
        report.location.name,
        report.location.latitude,
        report.location.longitude,
        report.event,
        report.start_year,
        report.end_year
    );
    let first_day = EventDate::new(report.event.month, report.event.day, report.event.hour);
    println!(
        "Ideal weather on {} in {} of {} years: {:.1}% ({})",
        first_day,
        report.evaluation.ideal_years,
        report.total_years(),
        report.probability(),
        report.level
    );
    println!("  {}", report.level.advice());

    let avg = &report.averages;
    println!(
        "Averages: {:.1}-{:.1} °C, {:.1} mm rain, {:.1} m/s wind, {:.0}% humidity",
        avg.temp_min, avg.temp_max, avg.precipitation, avg.wind, avg.humidity
    );
    println!(
        "Rainy years: {}, wind-safe years: {}",
        report.rainy_years, report.wind_safe_years
    );

    let trend = &report.trend;
    if let (Some(historical), Some(recent)) = (&trend.historical, &trend.recent) {
        println!(
            "Trend: {} ({} {:.1}% vs {} {:.1}%, {:+.1} pts)",
            trend.direction,
            historical.label(),
            historical.probability,
            recent.label(),
            recent.probability,
            trend.difference
        );
    }

    if report.event.is_range() {
        if let Some(best) = &report.best_selected {
            println!(
                "Best selected day ({}): {} ({:.1}%)",
                report.event.label(),
                best.label(),
                best.probability
            );
        }
    }
    if let Some(best) = &report.best_day {
        println!("Best day in window: {} ({:.1}%)", best.label(), best.probability);
    }
    if report.alternatives.is_empty() {
        println!("No better dates nearby.");
    } else {
        println!("Better dates nearby:");
        for day in &report.alternatives {
            println!(
                "  {:<6} {:5.1}% ({}/{} years)",
                day.label(),
                day.probability,
                day.ideal_years,
                day.total_years
            );
        }
    }
}

fn print_outputs(output: &RunOutput) {
    println!();
    for path in output.charts.written.iter().chain(&output.exports) {
        println!("wrote {}", path.display());
    }
    for failure in &output.charts.failures {
        warn!("{failure}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let mut config =
        AnalysisConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);

    let client = ClimateOdds::new(config).context("Invalid configuration")?;
    let output = client.run().call().await?;

    print_report(&output.report);
    print_outputs(&output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "climate-odds",
            "--lat",
            "-33.87",
            "--lon",
            "151.21",
            "--month",
            "1",
            "--day",
            "26",
            "--hour",
            "14",
            "--wind-max",
            "10",
            "--no-export",
            "--no-cache",
        ]);
        let mut config = AnalysisConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.location.latitude, -33.87);
        assert_eq!(config.location.longitude, 151.21);
        assert_eq!((config.event.month, config.event.day), (1, 26));
        assert_eq!(config.event.hour, Some(14));
        assert_eq!(config.criteria().wind_max, 10.0);
        assert!(!config.output.export_json);
        assert!(!config.output.export_csv);
        assert!(!config.source.use_cache);
    }

    #[test]
    fn test_daily_flag_clears_hour() {
        let cli = Cli::parse_from(["climate-odds", "--daily"]);
        let mut config = AnalysisConfig::default();
        config.event.hour = Some(14);
        cli.apply(&mut config);
        assert_eq!(config.event.hour, None);
    }

    #[test]
    fn test_profile_flag_with_override() {
        let cli = Cli::parse_from([
            "climate-odds",
            "--profile",
            "trilha",
            "--temp-max",
            "26",
            "--precip-min",
            "0.2",
        ]);
        let mut config = AnalysisConfig::default();
        cli.apply(&mut config);

        let criteria = config.criteria();
        assert_eq!(config.criteria.profile, Some(EventProfile::Trilha));
        assert_eq!(criteria.temp_min, 18.0);
        assert_eq!(criteria.temp_max, 26.0);
        assert_eq!(criteria.precipitation_min, Some(0.2));
        assert_eq!(criteria.humidity_min, Some(40.0));
    }

    #[test]
    fn test_end_flag_sets_range() {
        let cli = Cli::parse_from(["climate-odds", "--month", "12", "--day", "28", "--end", "01-03"]);
        let mut config = AnalysisConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.event.end(), Some((1, 3)));
        assert_eq!(config.event.selected_days(), 7);
        assert!(config.validate().is_ok());

        assert!(Cli::try_parse_from(["climate-odds", "--end", "02-30"]).is_err());
        assert_eq!(parse_month_day("02-29"), Ok((2, 29)));
    }

    #[test]
    fn test_unknown_profile_is_rejected() {
        assert!(Cli::try_parse_from(["climate-odds", "--profile", "rave"]).is_err());
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(Cli::parse_from(["climate-odds"]).log_level(), LevelFilter::Info);
        assert_eq!(Cli::parse_from(["climate-odds", "-vv"]).log_level(), LevelFilter::Trace);
    }
}
