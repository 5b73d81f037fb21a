//! A local stand-in for the POWER temporal API.

#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Datelike, NaiveDate};
use climate_odds::{AnalysisConfig, SourceConfig};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub enum Scenario {
    /// Even years are ideal, odd years too wet. `sentinel_year` has a -999 humidity.
    Normal { sentinel_year: Option<i32> },
    /// Every reading from `first_bad_year` on carries the sentinel.
    MissingFrom { first_bad_year: i32 },
    ServerError,
    NoProperties,
    /// Requests starting in `first_year` or later get a response without properties.
    NoPropertiesFrom { first_year: i32 },
}

pub struct MockPower {
    pub base_url: String,
    requests: Arc<AtomicUsize>,
}

impl MockPower {
    pub async fn start(scenario: Scenario) -> Self {
        let requests = Arc::new(AtomicUsize::new(0));
        let state = MockState {
            scenario,
            requests: Arc::clone(&requests),
        };
        let app = Router::new()
            .route("/daily/point", get(daily))
            .route("/hourly/point", get(hourly))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn source(&self, cache_dir: Option<&Path>) -> SourceConfig {
        SourceConfig {
            base_url: self.base_url.clone(),
            use_cache: cache_dir.is_some(),
            cache_dir: cache_dir.map(Path::to_path_buf),
            request_delay_ms: 0,
            timeout_seconds: 5,
            ..SourceConfig::default()
        }
    }

    pub fn config(&self, output: &Path) -> AnalysisConfig {
        let mut config = AnalysisConfig {
            source: self.source(None),
            ..AnalysisConfig::default()
        };
        config.output.directory = output.to_path_buf();
        config.analysis.window_days = 3;
        config
    }
}

#[derive(Clone)]
struct MockState {
    scenario: Scenario,
    requests: Arc<AtomicUsize>,
}

async fn daily(State(state): State<MockState>, Query(query): Query<HashMap<String, String>>) -> Response {
    respond(&state, &query, None)
}

async fn hourly(State(state): State<MockState>, Query(query): Query<HashMap<String, String>>) -> Response {
    respond(&state, &query, Some(0..24))
}

fn respond(
    state: &MockState,
    query: &HashMap<String, String>,
    hours: Option<std::ops::Range<u32>>,
) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    match state.scenario {
        Scenario::ServerError => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "temporarily unavailable").into_response()
        }
        Scenario::NoProperties => {
            return Json(json!({ "type": "Feature", "messages": ["no data"] })).into_response()
        }
        _ => {}
    }

    let (Some(start), Some(end)) = (parse_date(query.get("start")), parse_date(query.get("end")))
    else {
        return (StatusCode::UNPROCESSABLE_ENTITY, "bad date range").into_response();
    };
    if let Scenario::NoPropertiesFrom { first_year } = state.scenario {
        if start.year() >= first_year {
            return Json(json!({ "type": "Feature", "messages": ["no data"] })).into_response();
        }
    }
    let parameters: Vec<&str> = query
        .get("parameters")
        .map(|p| p.split(',').collect())
        .unwrap_or_default();

    let mut table = Map::new();
    for parameter in &parameters {
        let mut series = Map::new();
        for day in start.iter_days().take_while(|d| *d <= end) {
            let keys: Vec<String> = match &hours {
                Some(hours) => hours
                    .clone()
                    .map(|h| format!("{}{:02}", day.format("%Y%m%d"), h))
                    .collect(),
                None => vec![day.format("%Y%m%d").to_string()],
            };
            for key in keys {
                series.insert(key, json!(value(state.scenario, parameter, day.year())));
            }
        }
        table.insert(parameter.to_string(), Value::Object(series));
    }

    Json(json!({
        "type": "Feature",
        "properties": { "parameter": table },
    }))
    .into_response()
}

fn parse_date(raw: Option<&String>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw?, "%Y%m%d").ok()
}

/// Reading for `parameter` in `year`. Even years satisfy the default criteria.
fn value(scenario: Scenario, parameter: &str, year: i32) -> f64 {
    let missing = match scenario {
        Scenario::Normal { sentinel_year } => sentinel_year == Some(year) && parameter == "RH2M",
        Scenario::MissingFrom { first_bad_year } => year >= first_bad_year,
        _ => false,
    };
    if missing {
        return -999.0;
    }
    match parameter {
        "T2M_MAX" => 30.0 + (year % 3) as f64,
        "T2M_MIN" => 28.0,
        "T2M" => 29.0,
        "PRECTOTCORR" if year % 2 == 0 => 0.5,
        "PRECTOTCORR" => 1.5,
        "WS10M" => 10.0,
        "RH2M" => 70.0,
        _ => 0.0,
    }
}
