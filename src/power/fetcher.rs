use crate::power::cache::ResponseCache;
use crate::power::error::FetchError;
use crate::power::request::{date_key, PowerRequest, Resolution};
use crate::power::response::{observation_at, ParameterTable, PowerResponse};
use crate::settings::SourceConfig;
use crate::types::event_date::EventDate;
use crate::types::history::{ClimateHistory, DayHistory};
use crate::types::location::LatLon;
use crate::utils::get_cache_dir;
use bon::bon;
use chrono::{Datelike, NaiveDate, Utc};
use futures_util::stream::{self, StreamExt, TryStreamExt};
use log::{info, warn};
use reqwest::Client;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::time::Duration;

pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Downloads historical readings for one location and calendar date from NASA POWER.
///
/// Daily events are served by a single request spanning the whole lookback period.
/// Hourly events need one request per year, which run concurrently (bounded by
/// `max_concurrent_requests`) and are merged back in year order.
#[derive(Debug, Clone)]
pub struct PowerFetcher {
    client: Client,
    base_url: String,
    community: String,
    lookback_years: u32,
    min_years: usize,
    max_concurrent_requests: usize,
    request_delay: Duration,
    cache: Option<ResponseCache>,
}

impl PowerFetcher {
    /// Creates a fetcher from the `[source]` configuration section.
    ///
    /// The response cache lives in `cache_dir` if set, otherwise in the system cache
    /// directory. When neither is available the cache is disabled with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the HTTP client cannot be constructed.
    pub fn new(source: &SourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(source.timeout_seconds))
            .build()
            .map_err(FetchError::ClientBuild)?;

        let cache = if source.use_cache {
            match source.cache_dir.clone().or_else(get_cache_dir) {
                Some(dir) => Some(ResponseCache::new(dir)),
                None => {
                    warn!("Could not determine a cache directory, response caching is disabled");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            client,
            base_url: source.base_url.clone(),
            community: source.community.clone(),
            lookback_years: source.lookback_years,
            min_years: source.min_years,
            max_concurrent_requests: source.max_concurrent_requests.max(1),
            request_delay: Duration::from_millis(source.request_delay_ms),
            cache,
        })
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    /// First and last year of the lookback period, ending the year before `current_year`.
    pub fn lookback(&self, current_year: i32) -> (i32, i32) {
        (current_year - self.lookback_years as i32, current_year - 1)
    }

    fn request(
        &self,
        resolution: Resolution,
        location: LatLon,
        start: NaiveDate,
        end: NaiveDate,
    ) -> PowerRequest {
        PowerRequest {
            resolution,
            location,
            community: self.community.clone(),
            start,
            end,
        }
    }

    /// Returns the parameter table for `request`, from cache when possible.
    ///
    /// `Ok(None)` means the API answered without a `properties.parameter` block.
    async fn fetch_table(
        &self,
        request: &PowerRequest,
        current_year: i32,
    ) -> Result<Option<ParameterTable>, FetchError> {
        let cacheable = self.cache.as_ref().filter(|_| request.is_settled(current_year));

        if let Some(cache) = cacheable {
            match cache.load(request).await {
                Ok(Some(table)) => {
                    info!(
                        "Cache hit for {} data {} - {}",
                        request.resolution, request.start, request.end
                    );
                    return Ok(Some(table));
                }
                Ok(None) => {}
                Err(e) => warn!("Ignoring unreadable cache entry: {}", e),
            }
        }

        let endpoint = request.endpoint(&self.base_url);
        let http_request = self
            .client
            .get(&endpoint)
            .query(&request.query())
            .build()
            .map_err(|e| FetchError::NetworkRequest(endpoint, e))?;
        let url = http_request.url().to_string();
        info!("Requesting {}", url);

        let response = self
            .client
            .execute(http_request)
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(url, e)
                });
            }
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        let Some(table) = PowerResponse::from_slice(&bytes, &url)?.into_parameters() else {
            return Ok(None);
        };

        if let Some(cache) = cacheable {
            if let Err(e) = cache.store(request, table.clone()).await {
                warn!("Failed to cache response for {}: {}", url, e);
            }
        }

        Ok(Some(table))
    }

    async fn fetch_daily(
        &self,
        location: LatLon,
        date: EventDate,
        years: RangeInclusive<i32>,
        window_days: i64,
        current_year: i32,
    ) -> Result<YearTables, FetchError> {
        let settled_until = last_settled_day(*years.end());
        let Some((start, end)) = window_range(date, years, window_days, settled_until) else {
            return Ok(YearTables::PerYear(BTreeMap::new()));
        };
        let request = self.request(Resolution::Daily, location, start, end);
        let table = self
            .fetch_table(&request, current_year)
            .await?
            .ok_or_else(|| FetchError::MissingParameters {
                url: request.endpoint(&self.base_url),
            })?;

        Ok(YearTables::Shared(table))
    }

    async fn fetch_hourly(
        &self,
        location: LatLon,
        date: EventDate,
        years: RangeInclusive<i32>,
        window_days: i64,
        current_year: i32,
    ) -> Result<YearTables, FetchError> {
        let settled_until = last_settled_day(*years.end());
        let requests: Vec<(i32, PowerRequest)> = years
            .filter_map(|year| {
                window_range(date, year..=year, window_days, settled_until)
                    .map(|(start, end)| (year, self.request(Resolution::Hourly, location, start, end)))
            })
            .collect();

        let responses: Vec<(i32, Option<ParameterTable>)> = stream::iter(requests)
            .map(|(year, request)| async move {
                self.fetch_table(&request, current_year)
                    .await
                    .map(|table| (year, table))
            })
            .buffered(self.max_concurrent_requests)
            .try_collect()
            .await?;

        Ok(YearTables::PerYear(
            responses
                .into_iter()
                .filter_map(|(year, table)| {
                    if table.is_none() {
                        warn!("No hourly parameter data returned for {}, skipping year", year);
                    }
                    table.map(|table| (year, table))
                })
                .collect(),
        ))
    }
}

#[bon]
impl PowerFetcher {
    /// Fetches the readings for `date` at `location` over the lookback period.
    ///
    /// Besides the selected days, every day within `window_days` of them is
    /// collected, so alternative dates can be scored from the same download.
    /// Window days after the last lookback year are not requested, which keeps
    /// every request cacheable.
    ///
    /// # Arguments
    ///
    /// * `location` - Point to query.
    /// * `date` - Month, day, optional end day and optional hour. With an hour set the hourly
    ///   endpoint is used.
    /// * `window_days` - Optional. Days on each side of the selection. Defaults to 30.
    /// * `current_year` - Optional. The lookback ends the year before this one. Defaults to the
    ///   current UTC year.
    ///
    /// # Errors
    ///
    /// * [`FetchError::NetworkRequest`], [`FetchError::HttpStatus`] or [`FetchError::JsonParse`]
    ///   if any request fails. Nothing is retried.
    /// * [`FetchError::MissingParameters`] if the daily response has no parameter block.
    /// * [`FetchError::InsufficientSample`] if fewer than `min_years` years have a complete
    ///   reading on the event date.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use climate_odds::{EventDate, FetchError, LatLon, PowerFetcher, SourceConfig};
    /// # async fn run() -> Result<(), FetchError> {
    /// let fetcher = PowerFetcher::new(&SourceConfig::default())?;
    /// let history = fetcher
    ///     .history()
    ///     .location(LatLon(-22.9068, -43.1729))
    ///     .date(EventDate::new(12, 20, None))
    ///     .window_days(7)
    ///     .call()
    ///     .await?;
    /// println!("{} usable years", history.target().len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn history(
        &self,
        location: LatLon,
        date: EventDate,
        window_days: Option<u32>,
        current_year: Option<i32>,
    ) -> Result<ClimateHistory, FetchError> {
        let current_year = current_year.unwrap_or_else(|| Utc::now().year());
        let window_days = window_days.unwrap_or(DEFAULT_WINDOW_DAYS) as i64;
        let (start_year, end_year) = self.lookback(current_year);
        let resolution = if date.is_hourly() {
            Resolution::Hourly
        } else {
            Resolution::Daily
        };

        info!(
            "Fetching {} data for {} on {} ({} - {}, ±{} days)",
            resolution, location, date, start_year, end_year, window_days
        );

        let tables = match resolution {
            Resolution::Daily => {
                self.fetch_daily(location, date, start_year..=end_year, window_days, current_year)
                    .await?
            }
            Resolution::Hourly => {
                self.fetch_hourly(location, date, start_year..=end_year, window_days, current_year)
                    .await?
            }
        };

        let days = assemble_days(date, resolution, start_year..=end_year, window_days, &tables);
        let history = ClimateHistory {
            location,
            date,
            start_year,
            end_year,
            days,
        };

        let usable = history.target().len();
        let dropped = history.span_years().saturating_sub(usable);
        if dropped > 0 {
            warn!("Dropped {} of {} years with missing readings", dropped, history.span_years());
        }
        if usable < self.min_years {
            return Err(FetchError::InsufficientSample {
                usable,
                required: self.min_years,
            });
        }
        info!("Collected {} usable years for {}", usable, date);

        Ok(history)
    }
}

/// Parameter tables backing each year of the lookback.
enum YearTables {
    /// One daily response covering every year.
    Shared(ParameterTable),
    /// One hourly response per year. Years without data are absent.
    PerYear(BTreeMap<i32, ParameterTable>),
}

impl YearTables {
    fn for_year(&self, year: i32) -> Option<&ParameterTable> {
        match self {
            YearTables::Shared(table) => Some(table),
            YearTables::PerYear(tables) => tables.get(&year),
        }
    }
}

/// December 31st of the last lookback year. Later data may still be revised.
fn last_settled_day(end_year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(end_year, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Earliest and latest window date over `years` up to `settled_until`, or `None`
/// if no window day exists.
fn window_range(
    date: EventDate,
    years: RangeInclusive<i32>,
    window_days: i64,
    settled_until: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    let mut range: Option<(NaiveDate, NaiveDate)> = None;
    for year in years {
        for offset in date.window_offsets(window_days) {
            let Some(day) = date.window_date(year, offset) else {
                continue;
            };
            if day > settled_until {
                continue;
            }
            range = Some(match range {
                Some((first, last)) => (first.min(day), last.max(day)),
                None => (day, day),
            });
        }
    }
    range
}

/// Groups the readings of every year by window offset. Incomplete readings are skipped.
fn assemble_days(
    date: EventDate,
    resolution: Resolution,
    years: RangeInclusive<i32>,
    window_days: i64,
    tables: &YearTables,
) -> Vec<DayHistory> {
    date.window_offsets(window_days)
        .filter_map(|offset| {
            let (month, day) = date.shifted(offset)?;
            let observations = years
                .clone()
                .filter_map(|year| {
                    let table = tables.for_year(year)?;
                    let window_date = date.window_date(year, offset)?;
                    observation_at(table, resolution, &date_key(window_date, date.hour), year)
                })
                .collect();
            Some(DayHistory {
                offset,
                month,
                day,
                observations,
            })
        })
        .collect()
}
