use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DailyFluctuationRow — Per (year, day) average for one selected month
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyFluctuationRow {
    pub year: i32,
    pub day_of_month: u32,
    pub avg_close_open: f64,
    /// Number of records averaged into this row.
    pub count: u32,
}

// ---------------------------------------------------------------------------
// MonthlyAverageRow — Per (year, month) average over the full series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAverageRow {
    pub year: i32,
    pub month: u32,
    pub avg_price: f64,
    pub count: u32,
}
