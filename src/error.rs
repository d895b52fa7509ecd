use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("No data available for {symbol} between {start} and {end}")]
    NoDataAvailable {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing field '{field}' on {date}")]
    MissingField { date: NaiveDate, field: String },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
