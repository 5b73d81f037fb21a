//! Describes one call to the POWER point API.

use crate::types::location::LatLon;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DAILY_PARAMETERS: [&str; 5] = ["T2M_MAX", "T2M_MIN", "PRECTOTCORR", "WS10M", "RH2M"];
pub const HOURLY_PARAMETERS: [&str; 4] = ["T2M", "PRECTOTCORR", "WS10M", "RH2M"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    Daily,
    Hourly,
}

impl Resolution {
    pub fn path_segment(self) -> &'static str {
        match self {
            Resolution::Daily => "daily",
            Resolution::Hourly => "hourly",
        }
    }

    pub fn parameters(self) -> &'static [&'static str] {
        match self {
            Resolution::Daily => &DAILY_PARAMETERS,
            Resolution::Hourly => &HOURLY_PARAMETERS,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerRequest {
    pub resolution: Resolution,
    pub location: LatLon,
    pub community: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PowerRequest {
    /// Point endpoint for this resolution, without the query string.
    pub fn endpoint(&self, base_url: &str) -> String {
        format!(
            "{}/{}/point",
            base_url.trim_end_matches('/'),
            self.resolution.path_segment()
        )
    }

    /// Query pairs, left unencoded. `reqwest` encodes them when the request is built.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("parameters", self.resolution.parameters().join(",")),
            ("community", self.community.clone()),
            ("longitude", format!("{:.4}", self.location.longitude())),
            ("latitude", format!("{:.4}", self.location.latitude())),
            ("start", self.start.format("%Y%m%d").to_string()),
            ("end", self.end.format("%Y%m%d").to_string()),
            ("format", "JSON".to_string()),
        ]
    }

    /// File name under which the parsed response is cached.
    pub fn cache_key(&self) -> String {
        format!(
            "{}_{:.4}_{:.4}_{}_{}_{}.bin",
            self.resolution,
            self.location.latitude(),
            self.location.longitude(),
            self.community,
            self.start.format("%Y%m%d"),
            self.end.format("%Y%m%d"),
        )
    }

    /// Data for a range that ended before the current year will not change anymore.
    pub fn is_settled(&self, current_year: i32) -> bool {
        self.end.year() < current_year
    }
}

/// Key of a reading in the parameter table: `YYYYMMDD`, or `YYYYMMDDHH` for hourly data.
pub fn date_key(date: NaiveDate, hour: Option<u32>) -> String {
    match hour {
        Some(hour) => format!("{}{:02}", date.format("%Y%m%d"), hour),
        None => date.format("%Y%m%d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(resolution: Resolution) -> PowerRequest {
        PowerRequest {
            resolution,
            location: LatLon(-22.9068, -43.1729),
            community: "RE".to_string(),
            start: NaiveDate::from_ymd_opt(2005, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        }
    }

    #[test]
    fn test_daily_endpoint() {
        let endpoint = request(Resolution::Daily).endpoint("https://power.larc.nasa.gov/api/temporal/");
        assert_eq!(endpoint, "https://power.larc.nasa.gov/api/temporal/daily/point");
    }

    #[test]
    fn test_query_is_url_encoded() -> Result<(), reqwest::Error> {
        let mut request = request(Resolution::Daily);
        request.community = "R&E".to_string();
        let built = reqwest::Client::new()
            .get(request.endpoint("https://power.larc.nasa.gov/api/temporal"))
            .query(&request.query())
            .build()?;
        assert_eq!(
            built.url().query(),
            Some(
                "parameters=T2M_MAX%2CT2M_MIN%2CPRECTOTCORR%2CWS10M%2CRH2M&community=R%26E&\
                 longitude=-43.1729&latitude=-22.9068&start=20050101&end=20241231&format=JSON"
            )
        );
        Ok(())
    }

    #[test]
    fn test_hourly_parameters() {
        let query = request(Resolution::Hourly).query();
        assert_eq!(query[0], ("parameters", "T2M,PRECTOTCORR,WS10M,RH2M".to_string()));
    }

    #[test]
    fn test_cache_key_is_unique_per_range() {
        let a = request(Resolution::Daily);
        let mut b = a.clone();
        b.end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_ne!(a.cache_key(), b.cache_key());
        assert_ne!(a.cache_key(), request(Resolution::Hourly).cache_key());
    }

    #[test]
    fn test_is_settled() {
        let request = request(Resolution::Daily);
        assert!(request.is_settled(2025));
        assert!(!request.is_settled(2024));
    }

    #[test]
    fn test_date_key() {
        let date = NaiveDate::from_ymd_opt(2019, 3, 7).unwrap();
        assert_eq!(date_key(date, None), "20190307");
        assert_eq!(date_key(date, Some(9)), "2019030709");
    }
}
