use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config;

// ---------------------------------------------------------------------------
// PriceField — The four canonical OHLC fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
}

impl PriceField {
    pub const ALL: [PriceField; 4] = [
        PriceField::Open,
        PriceField::High,
        PriceField::Low,
        PriceField::Close,
    ];

    /// Canonical column name (`"Open"`, `"High"`, `"Low"`, `"Close"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceField::Open => "Open",
            PriceField::High => "High",
            PriceField::Low => "Low",
            PriceField::Close => "Close",
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RawPricePoint — One trading day as delivered by a data source
// ---------------------------------------------------------------------------

/// A single day of provider data, keyed by the provider's own column names.
///
/// Columns may carry provider-specific names such as `"open"`, `"Close_BTC-USD"`
/// or `"Adj Close"`. Null provider values are left out of `columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPricePoint {
    pub date: NaiveDate,
    pub columns: BTreeMap<String, f64>,
}

impl RawPricePoint {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            columns: BTreeMap::new(),
        }
    }

    /// Builder-style column insertion.
    pub fn with(mut self, column: &str, value: f64) -> Self {
        self.columns.insert(column.to_string(), value);
        self
    }

    /// Convenience constructor using the canonical column names.
    pub fn ohlc(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self::new(date)
            .with(PriceField::Open.as_str(), open)
            .with(PriceField::High.as_str(), high)
            .with(PriceField::Low.as_str(), low)
            .with(PriceField::Close.as_str(), close)
    }
}

// ---------------------------------------------------------------------------
// PriceRecord — Canonical per-day record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceRecord {
    /// Build a record, deriving year/month/day from `date`.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            year: date.year(),
            month: date.month(),
            day: date.day(),
            open,
            high,
            low,
            close,
        }
    }

    /// First field whose magnitude exceeds [`config::MAX_PRICE`], if any.
    pub fn oversized_field(&self) -> Option<(PriceField, f64)> {
        [
            (PriceField::Open, self.open),
            (PriceField::High, self.high),
            (PriceField::Low, self.low),
            (PriceField::Close, self.close),
        ]
        .into_iter()
        .find(|(_, v)| v.abs() > config::MAX_PRICE)
    }

    /// `(close + open) / 2`, the value plotted by the daily fluctuation chart.
    pub fn close_open_mid(&self) -> f64 {
        (self.close + self.open) / 2.0
    }

    /// `(high + low + open + close) / 4`, the value averaged per month.
    pub fn ohlc_mean(&self) -> f64 {
        (self.high + self.low + self.open + self.close) / 4.0
    }
}

impl From<&PriceRecord> for RawPricePoint {
    fn from(record: &PriceRecord) -> Self {
        RawPricePoint::ohlc(
            record.date,
            record.open,
            record.high,
            record.low,
            record.close,
        )
    }
}
