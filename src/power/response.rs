//! Shape of a POWER JSON response and lookups into its parameter table.

use crate::power::error::FetchError;
use crate::power::request::Resolution;
use crate::types::observation::{Observation, MISSING_VALUE};
use serde::Deserialize;
use std::collections::BTreeMap;

/// `parameter name -> date key -> value`. Values may be `null` in rare responses.
pub type ParameterTable = BTreeMap<String, BTreeMap<String, Option<f64>>>;

#[derive(Debug, Deserialize)]
pub struct PowerResponse {
    #[serde(default)]
    properties: Option<Properties>,
}

#[derive(Debug, Deserialize)]
struct Properties {
    #[serde(default)]
    parameter: Option<ParameterTable>,
}

impl PowerResponse {
    pub fn from_slice(bytes: &[u8], url: &str) -> Result<Self, FetchError> {
        serde_json::from_slice(bytes).map_err(|source| FetchError::JsonParse {
            url: url.to_string(),
            source,
        })
    }

    /// The `properties.parameter` block, if the response has one.
    pub fn into_parameters(self) -> Option<ParameterTable> {
        self.properties.and_then(|properties| properties.parameter)
    }
}

/// Value of `parameter` at `key`, or the missing-value sentinel when absent.
pub fn reading(table: &ParameterTable, parameter: &str, key: &str) -> f64 {
    table
        .get(parameter)
        .and_then(|series| series.get(key))
        .copied()
        .flatten()
        .unwrap_or(MISSING_VALUE)
}

/// Builds the observation stored at `key`, attributed to `year`.
///
/// Hourly tables only carry `T2M`, which fills both temperature fields.
pub fn observation_at(
    table: &ParameterTable,
    resolution: Resolution,
    key: &str,
    year: i32,
) -> Option<Observation> {
    let (temp_max, temp_min) = match resolution {
        Resolution::Daily => (
            reading(table, "T2M_MAX", key),
            reading(table, "T2M_MIN", key),
        ),
        Resolution::Hourly => {
            let temp = reading(table, "T2M", key);
            (temp, temp)
        }
    };
    Observation::from_readings(
        year,
        temp_max,
        temp_min,
        reading(table, "PRECTOTCORR", key),
        reading(table, "WS10M", key),
        reading(table, "RH2M", key),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAILY_BODY: &str = r#"{
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [-43.1729, -22.9068, 30.2]},
        "properties": {
            "parameter": {
                "T2M_MAX": {"20230101": 31.2, "20230102": -999.0},
                "T2M_MIN": {"20230101": 24.0, "20230102": 23.1},
                "PRECTOTCORR": {"20230101": 0.4, "20230102": 2.0},
                "WS10M": {"20230101": 3.1, "20230102": 2.2},
                "RH2M": {"20230101": 71.5, "20230102": null}
            }
        },
        "header": {"title": "NASA/POWER"}
    }"#;

    #[test]
    fn test_parse_daily_table() -> Result<(), FetchError> {
        let table = PowerResponse::from_slice(DAILY_BODY.as_bytes(), "test")?
            .into_parameters()
            .expect("parameter block");
        assert_eq!(table.len(), 5);
        assert_eq!(reading(&table, "T2M_MAX", "20230101"), 31.2);
        assert_eq!(reading(&table, "RH2M", "20230102"), MISSING_VALUE);
        assert_eq!(reading(&table, "WS10M", "20991231"), MISSING_VALUE);
        Ok(())
    }

    #[test]
    fn test_observation_at_drops_sentinel_day() -> Result<(), FetchError> {
        let table = PowerResponse::from_slice(DAILY_BODY.as_bytes(), "test")?
            .into_parameters()
            .expect("parameter block");
        let observation = observation_at(&table, Resolution::Daily, "20230101", 2023)
            .expect("complete reading");
        assert_eq!(observation.temp_max, 31.2);
        assert_eq!(observation.temp_min, 24.0);
        assert_eq!(observation.humidity, 71.5);

        assert!(observation_at(&table, Resolution::Daily, "20230102", 2023).is_none());
        assert!(observation_at(&table, Resolution::Daily, "20230103", 2023).is_none());
        Ok(())
    }

    #[test]
    fn test_hourly_temperature_fills_both_fields() {
        let mut table = ParameterTable::new();
        for (name, value) in [("T2M", 26.5), ("PRECTOTCORR", 0.0), ("WS10M", 4.0), ("RH2M", 65.0)] {
            table.insert(
                name.to_string(),
                BTreeMap::from([("2015122014".to_string(), Some(value))]),
            );
        }
        let observation = observation_at(&table, Resolution::Hourly, "2015122014", 2015)
            .expect("complete reading");
        assert_eq!(observation.temp_max, 26.5);
        assert_eq!(observation.temp_min, 26.5);
    }

    #[test]
    fn test_missing_properties() -> Result<(), FetchError> {
        let response = PowerResponse::from_slice(br#"{"messages": ["bad request"]}"#, "test")?;
        assert!(response.into_parameters().is_none());
        Ok(())
    }

    #[test]
    fn test_invalid_json() {
        let result = PowerResponse::from_slice(b"<html>", "http://example");
        assert!(matches!(result, Err(FetchError::JsonParse { .. })));
    }
}
