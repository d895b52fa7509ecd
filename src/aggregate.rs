//! Daily-fluctuation and monthly-average aggregations over canonical records.
//!
//! Records are loaded into an in-memory DuckDB table and grouped there. Build
//! one [`PriceFrame`] per render cycle when several months are queried; the
//! free functions [`daily_fluctuation`] and [`monthly_average`] build a
//! throwaway frame for a single query.

use std::collections::HashMap;

use serde_json::Value;

use crate::connection::Connection;
use crate::error::{DashboardError, Result};
use crate::models::{DailyFluctuationRow, MonthlyAverageRow, PriceRecord};
use crate::normalize::check_price_range;
use crate::sql_builder::GroupQuery;

/// Table the frame loads its records into.
pub const PRICE_TABLE: &str = "price_records";

// ---------------------------------------------------------------------------
// PriceFrame
// ---------------------------------------------------------------------------

/// A canonical price series loaded into the group-by engine.
pub struct PriceFrame {
    conn: Connection,
    len: usize,
}

impl PriceFrame {
    /// Load `records` (in order) into a fresh in-memory table.
    ///
    /// Fails with [`DashboardError::InvalidInput`] if any price exceeds
    /// [`config::MAX_PRICE`](crate::config::MAX_PRICE) in magnitude.
    pub fn from_records(records: &[PriceRecord]) -> Result<Self> {
        for record in records {
            check_price_range(record)?;
        }
        let conn = Connection::new()?;
        conn.create_price_table(PRICE_TABLE)?;
        if !records.is_empty() {
            conn.append_records(PRICE_TABLE, records)?;
        }
        Ok(Self {
            conn,
            len: records.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Per (year, day) mean of `(close + open) / 2` within `month`.
    ///
    /// Rows are ordered by year then day. Fails with
    /// [`DashboardError::InvalidInput`] if `month` is not in 1..=12.
    pub fn daily_fluctuation(&self, month: u32) -> Result<Vec<DailyFluctuationRow>> {
        validate_month(month)?;
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let (sql, params) = GroupQuery::new(PRICE_TABLE)
            .key("year", "year")
            .key("day", "day_of_month")
            .average("(close + open) / 2", "avg_close_open")
            .row_count("count")
            .filter_int("month", i64::from(month))
            .tie_break("MIN(seq)")
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Per (year, month) mean of `(high + low + open + close) / 4`.
    ///
    /// Rows are ordered by year then month.
    pub fn monthly_average(&self) -> Result<Vec<MonthlyAverageRow>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let (sql, params) = GroupQuery::new(PRICE_TABLE)
            .key("year", "year")
            .key("month", "month")
            .average("(high + low + open + close) / 4", "avg_price")
            .row_count("count")
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Run arbitrary SQL against the loaded `price_records` table.
    pub fn sql(&self, query: &str, params: &[String]) -> Result<Vec<HashMap<String, Value>>> {
        self.conn.execute(query, params)
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Average of `(close + open) / 2` per (year, day) for one month.
pub fn daily_fluctuation(records: &[PriceRecord], month: u32) -> Result<Vec<DailyFluctuationRow>> {
    validate_month(month)?;
    PriceFrame::from_records(records)?.daily_fluctuation(month)
}

/// Average of `(high + low + open + close) / 4` per (year, month).
pub fn monthly_average(records: &[PriceRecord]) -> Result<Vec<MonthlyAverageRow>> {
    PriceFrame::from_records(records)?.monthly_average()
}

fn validate_month(month: u32) -> Result<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(DashboardError::InvalidInput(format!(
            "Month must be between 1 and 12, got {}",
            month
        )))
    }
}
