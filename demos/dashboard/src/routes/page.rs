use std::fmt::Write;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use crypto_dashboard::config::{self, MONTH_LABELS};
use crypto_dashboard::models::month_label;
use crypto_dashboard::{Crypto, PlotlyRenderer, Selection};

use super::SelectionParams;
use crate::error::AppError;
use crate::state::AppState;

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// GET /?symbol=ETH-USD&start=2021-01-01&end=2024-12-31&month=Jun
///
/// Sidebar form plus the two charts for the submitted selection.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectionParams>,
) -> Result<Html<String>, AppError> {
    let selection = params.to_selection()?;
    let (_, renderer) = state.dashboard.render(selection.clone()).await?;
    render_page(&selection, &renderer)
        .map(Html)
        .map_err(|e| AppError::internal(format!("Failed to render page: {e}")))
}

fn render_page(selection: &Selection, renderer: &PlotlyRenderer) -> Result<String, std::fmt::Error> {
    let mut html = String::with_capacity(8 * 1024);

    write!(
        html,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>Cryptocurrency Price Analysis Dashboard</title>\
         <script src=\"{PLOTLY_JS}\"></script>\
         <style>body{{font-family:sans-serif;display:flex;margin:0}}\
         aside{{width:260px;padding:1rem;background:#f0f2f6;min-height:100vh}}\
         main{{flex:1;padding:1rem 2rem}}label{{display:block;margin-top:.8rem}}\
         .warning{{background:#fff3cd;padding:1rem;border-radius:4px}}</style>\
         </head><body>"
    )?;

    // Sidebar
    write!(
        html,
        "<aside><h3>Select Cryptocurrency and Date Range</h3><form method=\"get\" action=\"/\">\
         <label>Choose Cryptocurrency<select name=\"symbol\">"
    )?;
    for crypto in Crypto::catalog() {
        let selected = if crypto.symbol == selection.crypto.symbol { " selected" } else { "" };
        write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            crypto.symbol, selected, crypto.name
        )?;
    }
    write!(
        html,
        "</select></label>\
         <label>Start Date<input type=\"date\" name=\"start\" value=\"{}\"></label>\
         <label>End Date<input type=\"date\" name=\"end\" value=\"{}\"></label>\
         <label>Select a Month<select name=\"month\">",
        selection.start, selection.end
    )?;
    let current = month_label(selection.month).unwrap_or(MONTH_LABELS[0]);
    for label in MONTH_LABELS {
        let selected = if label == current { " selected" } else { "" };
        write!(html, "<option{}>{}</option>", selected, label)?;
    }
    write!(
        html,
        "</select></label><p><button type=\"submit\">Update</button></p></form></aside>"
    )?;

    // Charts
    write!(
        html,
        "<main><h1>Cryptocurrency Price Analysis Dashboard for {}</h1>",
        config::year_range_label()
    )?;
    for warning in renderer.warnings() {
        write!(html, "<div class=\"warning\">{}</div>", warning)?;
    }
    for (i, chart) in renderer.charts().iter().enumerate() {
        write!(
            html,
            "<div id=\"chart-{i}\"></div>\
             <script>(function(){{var f={};Plotly.newPlot('chart-{i}',f.data,f.layout);}})();</script>",
            chart.figure
        )?;
    }
    write!(html, "</main></body></html>")?;

    Ok(html)
}
