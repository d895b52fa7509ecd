//! Historical cryptocurrency price charts.
//!
//! Fetches daily OHLC candles for a fixed set of trading pairs, normalizes them
//! into canonical per-day records for 2021–2024, and aggregates them into two
//! chart-ready tables: the per-day fluctuation of one month and the monthly
//! average price. Aggregation runs in-process on DuckDB; drawing is left to a
//! [`ChartRenderer`].
//!
//! # Quick start
//!
//! ```no_run
//! use crypto_dashboard::{Dashboard, PlotlyRenderer, Selection};
//!
//! let dashboard = Dashboard::yahoo().unwrap();
//! let selection = Selection::new("BTC-USD").unwrap().month_label("Mar").unwrap();
//!
//! let mut renderer = PlotlyRenderer::new();
//! let outcome = dashboard.render(&selection, &mut renderer).unwrap();
//! ```
//!
//! The pipeline pieces are also usable on their own:
//!
//! ```no_run
//! use crypto_dashboard::{daily_fluctuation, monthly_average, normalize};
//! # let raw = Vec::new();
//! let records = normalize(&raw, "ETH-USD").unwrap();
//! let march = daily_fluctuation(&records, 3).unwrap();
//! let monthly = monthly_average(&records).unwrap();
//! ```

pub mod aggregate;
#[cfg(feature = "async")]
pub mod async_client;
pub mod chart;
pub mod config;
pub mod connection;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod normalize;
pub mod source;
pub mod sql_builder;

pub use aggregate::{daily_fluctuation, monthly_average, PriceFrame};
#[cfg(feature = "async")]
pub use async_client::AsyncDashboard;
pub use chart::{ChartKind, ChartRenderer, LineChart, PlotlyRenderer};
pub use connection::Connection;
pub use dashboard::{Dashboard, RenderOutcome, Selection};
pub use error::{DashboardError, Result};
pub use models::{
    Crypto, DailyFluctuationRow, MonthlyAverageRow, PriceField, PriceRecord, RawPricePoint,
};
pub use normalize::{normalize, MissingFieldPolicy, Normalizer};
pub use source::{DataSource, JsonFileSource, StaticSource, YahooSource};
pub use sql_builder::GroupQuery;
