//! Raw provider rows to canonical [`PriceRecord`]s.
//!
//! Providers name their columns inconsistently: plain (`Close`, `close`),
//! suffixed with the ticker (`Close_BTC-USD`), or prefixed with it. A declared
//! pattern table maps those names onto the four canonical OHLC fields before
//! the year-range filter is applied. Aggregators only ever see the result.

use std::collections::HashMap;

use chrono::Datelike;
use tracing::{debug, warn};

use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::{PriceField, PriceRecord, RawPricePoint};

/// Raw column name patterns, matched ASCII case-insensitively.
///
/// `{field}` expands to the canonical field name and `{symbol}` to the ticker
/// being normalized. Columns matching none of these (`Volume`, `Adj Close`,
/// `adjclose`) are ignored.
pub const COLUMN_PATTERNS: [&str; 3] = ["{field}", "{field}_{symbol}", "{symbol}_{field}"];

/// What to do with a raw point that lacks one of the four price fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingFieldPolicy {
    /// Drop the point and keep going.
    #[default]
    Skip,
    /// Abort normalization with [`DashboardError::MissingField`].
    Fail,
}

// ---------------------------------------------------------------------------
// ColumnMapping
// ---------------------------------------------------------------------------

/// Lookup table from lowercased raw column name to canonical field, built
/// once per symbol.
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    names: HashMap<String, PriceField>,
}

impl ColumnMapping {
    pub fn for_symbol(symbol: &str) -> Self {
        let mut names = HashMap::new();
        for field in PriceField::ALL {
            for pattern in COLUMN_PATTERNS {
                let name = pattern
                    .replace("{field}", field.as_str())
                    .replace("{symbol}", symbol)
                    .to_ascii_lowercase();
                names.insert(name, field);
            }
        }
        Self { names }
    }

    /// Resolve a raw column name, or `None` if it maps to no price field.
    pub fn resolve(&self, column: &str) -> Option<PriceField> {
        self.names.get(&column.to_ascii_lowercase()).copied()
    }

    /// Extract the four canonical values from a raw point.
    ///
    /// Returns the first missing field on failure. When several raw columns
    /// resolve to the same field, the first one in column order wins.
    pub fn extract(&self, point: &RawPricePoint) -> std::result::Result<[f64; 4], PriceField> {
        let mut values: [Option<f64>; 4] = [None; 4];
        for (column, value) in &point.columns {
            if let Some(field) = self.resolve(column) {
                let slot = &mut values[field_index(field)];
                if slot.is_none() && value.is_finite() {
                    *slot = Some(*value);
                }
            }
        }

        let mut out = [0.0; 4];
        for field in PriceField::ALL {
            match values[field_index(field)] {
                Some(v) => out[field_index(field)] = v,
                None => return Err(field),
            }
        }
        Ok(out)
    }
}

fn field_index(field: PriceField) -> usize {
    match field {
        PriceField::Open => 0,
        PriceField::High => 1,
        PriceField::Low => 2,
        PriceField::Close => 3,
    }
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Configurable normalizer. [`normalize`] uses the defaults.
#[derive(Debug, Clone)]
pub struct Normalizer {
    year_min: i32,
    year_max: i32,
    missing_field_policy: MissingFieldPolicy,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            year_min: config::YEAR_MIN,
            year_max: config::YEAR_MAX,
            missing_field_policy: MissingFieldPolicy::default(),
        }
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inclusive year range to keep.
    pub fn year_range(mut self, year_min: i32, year_max: i32) -> Self {
        self.year_min = year_min;
        self.year_max = year_max;
        self
    }

    pub fn missing_field_policy(mut self, policy: MissingFieldPolicy) -> Self {
        self.missing_field_policy = policy;
        self
    }

    /// Normalize raw points for `symbol`, preserving input order.
    ///
    /// Points outside the year range are dropped before their fields are
    /// inspected, so a malformed point outside the range never fails the
    /// whole series.
    pub fn normalize(&self, raw_points: &[RawPricePoint], symbol: &str) -> Result<Vec<PriceRecord>> {
        if raw_points.is_empty() {
            return Ok(Vec::new());
        }

        let mapping = ColumnMapping::for_symbol(symbol);
        let mut records = Vec::with_capacity(raw_points.len());
        let mut out_of_range = 0usize;
        let mut skipped = 0usize;

        for point in raw_points {
            let year = point.date.year();
            if year < self.year_min || year > self.year_max {
                out_of_range += 1;
                continue;
            }

            match mapping.extract(point) {
                Ok([open, high, low, close]) => {
                    let record = PriceRecord::new(point.date, open, high, low, close);
                    check_price_range(&record)?;
                    records.push(record);
                }
                Err(field) => match self.missing_field_policy {
                    MissingFieldPolicy::Skip => {
                        warn!(symbol, date = %point.date, %field, "dropping point with missing field");
                        skipped += 1;
                    }
                    MissingFieldPolicy::Fail => {
                        return Err(DashboardError::MissingField {
                            date: point.date,
                            field: field.to_string(),
                        });
                    }
                },
            }
        }

        debug!(
            symbol,
            kept = records.len(),
            out_of_range,
            skipped,
            "normalized price series"
        );
        Ok(records)
    }
}

/// Reject records whose prices are too large to aggregate.
pub(crate) fn check_price_range(record: &PriceRecord) -> Result<()> {
    match record.oversized_field() {
        Some((field, value)) => Err(DashboardError::InvalidInput(format!(
            "{} price {} on {} exceeds {}",
            field,
            value,
            record.date,
            config::MAX_PRICE
        ))),
        None => Ok(()),
    }
}

/// Normalize with the default year range (2021..=2024) and the
/// [`MissingFieldPolicy::Skip`] policy.
pub fn normalize(raw_points: &[RawPricePoint], symbol: &str) -> Result<Vec<PriceRecord>> {
    Normalizer::default().normalize(raw_points, symbol)
}
