use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use crypto_dashboard::Crypto;
use serde_json::{json, Value};

use super::SelectionParams;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/cryptos
///
/// The fixed list of trading pairs offered by the symbol picker.
pub async fn list_cryptos() -> Json<Value> {
    let cryptos = Crypto::catalog();
    let count = cryptos.len();
    Json(json!({ "data": cryptos, "count": count }))
}

/// GET /api/charts?symbol=BTC-USD&start=2021-01-01&end=2024-12-31&month=Mar
///
/// Run one render cycle and return both Plotly figures, or the "no data"
/// warning when the provider has nothing for the selection.
pub async fn get_charts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SelectionParams>,
) -> Result<Json<Value>, AppError> {
    let selection = params.to_selection()?;
    let (outcome, renderer) = state.dashboard.render(selection.clone()).await?;

    Ok(Json(json!({
        "selection": selection,
        "outcome": outcome,
        "charts": renderer.charts(),
        "warnings": renderer.warnings(),
    })))
}
