//! One render cycle of the dashboard.
//!
//! The UI shell reads its widgets into a [`Selection`] and calls
//! [`Dashboard::render`]; nothing is remembered between calls. A cycle is
//! fetch, normalize, aggregate, draw.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::aggregate::PriceFrame;
use crate::chart::ChartRenderer;
use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::{self, Crypto, PriceRecord};
use crate::normalize::Normalizer;
use crate::source::{DataSource, YahooSource};

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Widget state for one render: pair, date range and month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub crypto: Crypto,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub month: u32,
}

impl Selection {
    /// Selection for `symbol` with the default dates (2021-01-01 to
    /// 2024-12-31) and January.
    pub fn new(symbol: &str) -> Result<Self> {
        Ok(Self {
            crypto: Crypto::from_symbol(symbol)?,
            start: config::default_start_date(),
            end: config::default_end_date(),
            month: 1,
        })
    }

    pub fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn month(mut self, month: u32) -> Self {
        self.month = month;
        self
    }

    /// Set the month from its slider label (`"Jan"`..`"Dec"`).
    pub fn month_label(mut self, label: &str) -> Result<Self> {
        self.month = models::month_number(label)?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(DashboardError::InvalidInput(format!(
                "Start date {} is after end date {}",
                self.start, self.end
            )));
        }
        models::month_label(self.month)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Titles and messages
// ---------------------------------------------------------------------------

pub fn daily_title(name: &str, month_label: &str) -> String {
    format!(
        "{} Daily Fluctuation for {} ({})",
        name,
        month_label,
        config::year_range_label()
    )
}

pub fn monthly_title(name: &str) -> String {
    format!("{} Monthly Average Price ({})", name, config::year_range_label())
}

pub fn no_data_message(name: &str) -> String {
    format!("No data available for {} between the selected dates.", name)
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// What a render cycle ended up showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderOutcome {
    /// The source returned nothing; a warning was shown instead of charts.
    NoData,
    /// Both charts were drawn. Row counts may be zero when every fetched
    /// point fell outside the year range.
    Rendered {
        records: usize,
        daily_rows: usize,
        monthly_rows: usize,
    },
}

/// Builder for [`Dashboard`].
pub struct DashboardBuilder<S> {
    source: S,
    normalizer: Normalizer,
}

impl<S: DataSource> DashboardBuilder<S> {
    /// Replace the default normalizer (2021..=2024, skip missing fields).
    pub fn normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn build(self) -> Dashboard<S> {
        Dashboard {
            source: self.source,
            normalizer: self.normalizer,
        }
    }
}

/// Drives render cycles against a data source.
pub struct Dashboard<S> {
    source: S,
    normalizer: Normalizer,
}

impl Dashboard<YahooSource> {
    /// Dashboard backed by the Yahoo Finance chart API with default settings.
    pub fn yahoo() -> Result<Self> {
        Ok(Self::builder(YahooSource::builder().build()?).build())
    }
}

impl<S: DataSource> Dashboard<S> {
    pub fn builder(source: S) -> DashboardBuilder<S> {
        DashboardBuilder {
            source,
            normalizer: Normalizer::default(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and normalize a series.
    ///
    /// Fails with [`DashboardError::NoDataAvailable`] when the source returns
    /// nothing. Points returned but outside the year range give `Ok(vec![])`.
    pub fn load(&self, crypto: &Crypto, start: NaiveDate, end: NaiveDate) -> Result<Vec<PriceRecord>> {
        let raw = self.source.fetch(&crypto.symbol, start, end)?;
        if raw.is_empty() {
            return Err(DashboardError::NoDataAvailable {
                symbol: crypto.symbol.clone(),
                start,
                end,
            });
        }
        self.normalizer.normalize(&raw, &crypto.symbol)
    }

    /// Run one render cycle and draw into `renderer`.
    pub fn render<R: ChartRenderer + ?Sized>(
        &self,
        selection: &Selection,
        renderer: &mut R,
    ) -> Result<RenderOutcome> {
        selection.validate()?;
        let name = &selection.crypto.name;

        let records = match self.load(&selection.crypto, selection.start, selection.end) {
            Ok(records) => records,
            Err(DashboardError::NoDataAvailable { symbol, .. }) => {
                warn!(%symbol, "no data for selection");
                renderer.warn(&no_data_message(name))?;
                return Ok(RenderOutcome::NoData);
            }
            Err(e) => return Err(e),
        };

        let frame = PriceFrame::from_records(&records)?;
        let month_label = models::month_label(selection.month)?;
        let daily = frame.daily_fluctuation(selection.month)?;
        let monthly = frame.monthly_average()?;

        renderer.draw_daily_fluctuation(&daily, &daily_title(name, month_label), month_label)?;
        renderer.draw_monthly_average(&monthly, &monthly_title(name))?;

        info!(
            symbol = %selection.crypto.symbol,
            records = records.len(),
            daily_rows = daily.len(),
            monthly_rows = monthly.len(),
            "rendered dashboard"
        );

        Ok(RenderOutcome::Rendered {
            records: records.len(),
            daily_rows: daily.len(),
            monthly_rows: monthly.len(),
        })
    }
}
