use crypto_dashboard::{AsyncDashboard, YahooSource};

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Runs render cycles on the blocking pool. Holds no per-user state;
    /// every request carries its full widget selection.
    pub dashboard: AsyncDashboard<YahooSource>,
}
