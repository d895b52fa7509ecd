//! Chart models and the renderer seam.
//!
//! The crate never draws pixels itself. It turns aggregated rows into a
//! [`LineChart`] (one series per year) and hands it to a [`ChartRenderer`].
//! [`PlotlyRenderer`] keeps the charts as Plotly figure JSON for a web
//! front end to draw.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Result;
use crate::models::{DailyFluctuationRow, MonthlyAverageRow};

pub const DAY_AXIS_LABEL: &str = "Day of Month";
pub const MONTH_AXIS_LABEL: &str = "Month";
pub const PRICE_AXIS_LABEL: &str = "Avg Price (USD)";
pub const SERIES_LABEL: &str = "Year";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    DailyFluctuation,
    MonthlyAverage,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: u32,
    pub y: f64,
}

/// One line of a chart: every point of a single year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub year: i32,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub markers: bool,
    pub series: Vec<Series>,
}

impl LineChart {
    /// Day-of-month chart, one marked line per year.
    pub fn daily_fluctuation(rows: &[DailyFluctuationRow], title: &str) -> Self {
        Self {
            kind: ChartKind::DailyFluctuation,
            title: title.to_string(),
            x_label: DAY_AXIS_LABEL.to_string(),
            y_label: PRICE_AXIS_LABEL.to_string(),
            markers: true,
            series: group_by_year(
                rows.iter()
                    .map(|r| (r.year, r.day_of_month, r.avg_close_open)),
            ),
        }
    }

    /// Month-of-year chart, one line per year.
    pub fn monthly_average(rows: &[MonthlyAverageRow], title: &str) -> Self {
        Self {
            kind: ChartKind::MonthlyAverage,
            title: title.to_string(),
            x_label: MONTH_AXIS_LABEL.to_string(),
            y_label: PRICE_AXIS_LABEL.to_string(),
            markers: false,
            series: group_by_year(rows.iter().map(|r| (r.year, r.month, r.avg_price))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Plotly figure: one `scatter` trace per year plus a titled layout.
    ///
    /// An empty chart still produces a valid figure with no traces.
    pub fn to_plotly(&self) -> Value {
        let mode = if self.markers { "lines+markers" } else { "lines" };
        let traces: Vec<Value> = self
            .series
            .iter()
            .map(|s| {
                json!({
                    "type": "scatter",
                    "mode": mode,
                    "line": { "shape": "linear" },
                    "name": s.year.to_string(),
                    "x": s.points.iter().map(|p| p.x).collect::<Vec<_>>(),
                    "y": s.points.iter().map(|p| p.y).collect::<Vec<_>>(),
                })
            })
            .collect();

        json!({
            "data": traces,
            "layout": {
                "title": { "text": self.title },
                "xaxis": { "title": { "text": self.x_label } },
                "yaxis": { "title": { "text": self.y_label } },
                "legend": { "title": { "text": SERIES_LABEL } },
            }
        })
    }
}

fn group_by_year(values: impl Iterator<Item = (i32, u32, f64)>) -> Vec<Series> {
    let mut by_year: BTreeMap<i32, Vec<ChartPoint>> = BTreeMap::new();
    for (year, x, y) in values {
        by_year.entry(year).or_default().push(ChartPoint { x, y });
    }
    by_year
        .into_iter()
        .map(|(year, mut points)| {
            points.sort_by_key(|p| p.x);
            Series { year, points }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ChartRenderer
// ---------------------------------------------------------------------------

/// Where charts and user-facing messages end up.
pub trait ChartRenderer {
    fn draw_daily_fluctuation(
        &mut self,
        rows: &[DailyFluctuationRow],
        title: &str,
        month_label: &str,
    ) -> Result<()>;

    fn draw_monthly_average(&mut self, rows: &[MonthlyAverageRow], title: &str) -> Result<()>;

    /// Show a warning in place of the charts.
    fn warn(&mut self, message: &str) -> Result<()>;
}

/// A chart as drawn by [`PlotlyRenderer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedChart {
    pub chart: LineChart,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_label: Option<String>,
    pub figure: Value,
}

/// Collects charts as Plotly figures and warnings as strings.
#[derive(Debug, Clone, Default)]
pub struct PlotlyRenderer {
    charts: Vec<RenderedChart>,
    warnings: Vec<String>,
}

impl PlotlyRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charts(&self) -> &[RenderedChart] {
        &self.charts
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Most recent chart of the given kind.
    pub fn chart(&self, kind: ChartKind) -> Option<&RenderedChart> {
        self.charts.iter().rev().find(|c| c.chart.kind == kind)
    }

    /// Everything drawn so far, as `{"charts": [...], "warnings": [...]}`.
    pub fn to_json(&self) -> Value {
        json!({
            "charts": self.charts,
            "warnings": self.warnings,
        })
    }

    fn push(&mut self, chart: LineChart, month_label: Option<String>) {
        let figure = chart.to_plotly();
        self.charts.push(RenderedChart {
            chart,
            month_label,
            figure,
        });
    }
}

impl ChartRenderer for PlotlyRenderer {
    fn draw_daily_fluctuation(
        &mut self,
        rows: &[DailyFluctuationRow],
        title: &str,
        month_label: &str,
    ) -> Result<()> {
        let chart = LineChart::daily_fluctuation(rows, title);
        self.push(chart, Some(month_label.to_string()));
        Ok(())
    }

    fn draw_monthly_average(&mut self, rows: &[MonthlyAverageRow], title: &str) -> Result<()> {
        let chart = LineChart::monthly_average(rows, title);
        self.push(chart, None);
        Ok(())
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        self.warnings.push(message.to_string());
        Ok(())
    }
}
