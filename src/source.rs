//! Market-data sources.
//!
//! A [`DataSource`] returns the raw daily series for one symbol and date range.
//! An empty vector means the provider has nothing for that request; it is not
//! an error. [`YahooSource`] talks to the Yahoo Finance chart API over a
//! blocking HTTP client, [`JsonFileSource`] replays a saved chart response and
//! [`StaticSource`] serves points held in memory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::RawPricePoint;

/// Fetches a raw daily price series.
pub trait DataSource {
    /// Return the points for `symbol` with `start <= date < end`.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawPricePoint>>;
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawPricePoint>> {
        (**self).fetch(symbol, start, end)
    }
}

// ---------------------------------------------------------------------------
// Chart API response
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Parse a Yahoo Finance v8 chart response into raw points.
///
/// Columns keep the provider's lowercase names (`open`, `high`, `low`,
/// `close`, `volume`, `adjclose`); null values are left out. Timestamps are
/// shifted by the exchange `gmtoffset` before taking the calendar date. A
/// `"Not Found"` provider error yields an empty series.
pub fn parse_chart_response(body: &serde_json::Value) -> Result<Vec<RawPricePoint>> {
    let envelope: ChartEnvelope = serde_json::from_value(body.clone())?;

    if let Some(err) = envelope.chart.error {
        if err.code.eq_ignore_ascii_case("Not Found") {
            return Ok(Vec::new());
        }
        return Err(DashboardError::Provider(format!(
            "{}: {}",
            err.code,
            err.description.unwrap_or_default()
        )));
    }

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };

    let offset = result.meta.map(|m| m.gmtoffset).unwrap_or(0);
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adjclose = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .unwrap_or_default();

    let columns: [(&str, &Vec<Option<f64>>); 6] = [
        ("open", &quote.open),
        ("high", &quote.high),
        ("low", &quote.low),
        ("close", &quote.close),
        ("volume", &quote.volume),
        ("adjclose", &adjclose),
    ];

    let mut points = Vec::with_capacity(result.timestamp.len());
    for (i, ts) in result.timestamp.iter().enumerate() {
        let date = ts
            .checked_add(offset)
            .and_then(|local| DateTime::from_timestamp(local, 0))
            .ok_or_else(|| DashboardError::Provider(format!("Timestamp out of range: {}", ts)))?
            .date_naive();

        let mut point = RawPricePoint::new(date);
        for (name, values) in &columns {
            if let Some(Some(v)) = values.get(i) {
                point.columns.insert(name.to_string(), *v);
            }
        }
        points.push(point);
    }

    Ok(points)
}

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

fn in_range(points: Vec<RawPricePoint>, start: NaiveDate, end: NaiveDate) -> Vec<RawPricePoint> {
    points
        .into_iter()
        .filter(|p| p.date >= start && p.date < end)
        .collect()
}

// ---------------------------------------------------------------------------
// YahooSource
// ---------------------------------------------------------------------------

/// Builder for [`YahooSource`].
pub struct YahooSourceBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl Default for YahooSourceBuilder {
    fn default() -> Self {
        Self {
            base_url: config::YAHOO_BASE.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("crypto-dashboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl YahooSourceBuilder {
    /// Override the API host, e.g. to point at a local mock server.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn build(self) -> Result<YahooSource> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(YahooSource {
            base_url: self.base_url,
            client,
        })
    }
}

/// Daily candles from the Yahoo Finance chart API.
pub struct YahooSource {
    base_url: String,
    client: Client,
}

impl YahooSource {
    pub fn builder() -> YahooSourceBuilder {
        YahooSourceBuilder::default()
    }

    /// Full request URL for a symbol and range.
    pub fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history",
            self.base_url,
            symbol,
            unix_midnight(start),
            unix_midnight(end)
        )
    }
}

impl DataSource for YahooSource {
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawPricePoint>> {
        if start >= end {
            return Ok(Vec::new());
        }

        let url = self.chart_url(symbol, start, end);
        info!(%url, "fetching price history");

        let resp = self.client.get(&url).send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            info!(symbol, "provider has no data for symbol");
            return Ok(Vec::new());
        }

        let body: serde_json::Value = resp.error_for_status()?.json()?;
        let points = in_range(parse_chart_response(&body)?, start, end);
        debug!(symbol, points = points.len(), "fetched price history");
        Ok(points)
    }
}

// ---------------------------------------------------------------------------
// JsonFileSource
// ---------------------------------------------------------------------------

/// Replays a chart response saved to disk, whatever symbol is requested.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for JsonFileSource {
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawPricePoint>> {
        if !self.path.exists() {
            return Err(DashboardError::NotFound(format!(
                "Chart file {} does not exist",
                self.path.display()
            )));
        }
        let contents = fs::read_to_string(&self.path)?;
        let body: serde_json::Value = serde_json::from_str(&contents)?;
        let points = in_range(parse_chart_response(&body)?, start, end);
        debug!(symbol, path = %self.path.display(), points = points.len(), "loaded chart file");
        Ok(points)
    }
}

// ---------------------------------------------------------------------------
// StaticSource
// ---------------------------------------------------------------------------

/// In-memory series keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    series: HashMap<String, Vec<RawPricePoint>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the series returned for `symbol` (case-insensitive).
    pub fn with_series(mut self, symbol: &str, points: Vec<RawPricePoint>) -> Self {
        self.series.insert(symbol.to_ascii_uppercase(), points);
        self
    }
}

impl DataSource for StaticSource {
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawPricePoint>> {
        let points = self
            .series
            .get(&symbol.to_ascii_uppercase())
            .cloned()
            .unwrap_or_default();
        Ok(in_range(points, start, end))
    }
}
