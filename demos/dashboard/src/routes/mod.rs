pub mod charts;
pub mod page;

use chrono::NaiveDate;
use crypto_dashboard::Selection;
use serde::Deserialize;

use crate::error::AppError;

/// Widget values carried on every request. Missing values fall back to the
/// sidebar defaults (Bitcoin, 2021-01-01 to 2024-12-31, January).
#[derive(Debug, Default, Deserialize)]
pub struct SelectionParams {
    pub symbol: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub month: Option<String>,
}

impl SelectionParams {
    pub fn to_selection(&self) -> Result<Selection, AppError> {
        let mut selection = Selection::new(self.symbol.as_deref().unwrap_or("BTC-USD"))?;
        if self.start.is_some() || self.end.is_some() {
            let start = self.start.unwrap_or(selection.start);
            let end = self.end.unwrap_or(selection.end);
            selection = selection.dates(start, end);
        }
        if let Some(month) = self.month.as_deref() {
            selection = selection.month_label(month)?;
        }
        Ok(selection)
    }
}
