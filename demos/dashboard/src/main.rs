mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use crypto_dashboard::AsyncDashboard;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use state::AppState;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let dashboard = AsyncDashboard::yahoo().await?;
    let state = Arc::new(AppState { dashboard });

    let app = Router::new()
        .route("/", get(routes::page::index))
        .route("/api/cryptos", get(routes::charts::list_cryptos))
        .route("/api/charts", get(routes::charts::get_charts))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = std::env::var("DASHBOARD_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
