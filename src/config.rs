use chrono::NaiveDate;

pub const YAHOO_BASE: &str = "https://query1.finance.yahoo.com";

/// Inclusive year range kept by the normalizer.
pub const YEAR_MIN: i32 = 2021;
pub const YEAR_MAX: i32 = 2024;

/// Largest accepted price magnitude. Group sums of anything below stay finite.
pub const MAX_PRICE: f64 = 1e15;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Trading pairs offered by the symbol picker, as `(symbol, display name)`.
pub const CRYPTOS: [(&str, &str); 10] = [
    ("BTC-USD", "Bitcoin"),
    ("ETH-USD", "Ethereum"),
    ("USDT-USD", "Tether"),
    ("XOR-USD", "XOR"),
    ("BNB-USD", "BNB"),
    ("SOL-USD", "Solana"),
    ("DOGE-USD", "Dogecoin"),
    ("USDC-USD", "USDC"),
    ("ADA-USD", "Cardano"),
    ("TRX-USD", "Tron"),
];

pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(YEAR_MIN, 1, 1).unwrap_or_default()
}

pub fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(YEAR_MAX, 12, 31).unwrap_or_default()
}

/// Label shown in chart titles for the fixed year range, e.g. `"2021-2024"`.
pub fn year_range_label() -> String {
    format!("{}-{}", YEAR_MIN, YEAR_MAX)
}
