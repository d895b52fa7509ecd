//! Shared fixtures for the integration tests.
//!
//! Provides small hand-built price series, a builder for Yahoo chart API
//! responses and a one-shot local HTTP server, so nothing here touches the
//! network.

#![allow(dead_code)]

use chrono::NaiveDate;
use crypto_dashboard::{PriceRecord, RawPricePoint};
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use tempfile::NamedTempFile;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The two January 2021 records used throughout the aggregation tests.
pub fn two_january_records() -> Vec<PriceRecord> {
    vec![
        PriceRecord::new(date(2021, 1, 5), 100.0, 110.0, 90.0, 105.0),
        PriceRecord::new(date(2021, 1, 6), 105.0, 115.0, 95.0, 110.0),
    ]
}

/// A multi-year series: the 1st, 15th and 28th of every month, 2020 through
/// 2025, with prices derived from the date so every value is distinct.
pub fn multi_year_raw() -> Vec<RawPricePoint> {
    let mut out = Vec::new();
    for year in 2020..=2025 {
        for month in 1..=12u32 {
            for day in [1u32, 15, 28] {
                let base = (year - 2019) as f64 * 1000.0 + month as f64 * 10.0 + day as f64;
                out.push(RawPricePoint::ohlc(
                    date(year, month, day),
                    base,
                    base + 5.0,
                    base - 5.0,
                    base + 2.0,
                ));
            }
        }
    }
    out
}

/// Build a Yahoo v8 chart response from `(date, open, high, low, close)` rows.
///
/// `None` values are emitted as JSON `null`, as the provider does for days
/// with an incomplete candle.
pub fn chart_response(
    symbol: &str,
    gmtoffset: i64,
    rows: &[(NaiveDate, Option<f64>, Option<f64>, Option<f64>, Option<f64>)],
) -> Value {
    let timestamps: Vec<i64> = rows
        .iter()
        .map(|(d, ..)| d.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp() - gmtoffset)
        .collect();
    let open: Vec<Option<f64>> = rows.iter().map(|r| r.1).collect();
    let high: Vec<Option<f64>> = rows.iter().map(|r| r.2).collect();
    let low: Vec<Option<f64>> = rows.iter().map(|r| r.3).collect();
    let close: Vec<Option<f64>> = rows.iter().map(|r| r.4).collect();
    let volume: Vec<Option<f64>> = rows.iter().map(|_| Some(1_000.0)).collect();

    json!({
        "chart": {
            "result": [{
                "meta": {
                    "currency": "USD",
                    "symbol": symbol,
                    "gmtoffset": gmtoffset,
                    "timezone": "UTC"
                },
                "timestamp": timestamps,
                "indicators": {
                    "quote": [{
                        "open": open,
                        "high": high,
                        "low": low,
                        "close": close,
                        "volume": volume
                    }],
                    "adjclose": [{ "adjclose": close }]
                }
            }],
            "error": null
        }
    })
}

/// The provider's response for an unknown ticker.
pub fn not_found_response() -> Value {
    json!({
        "chart": {
            "result": null,
            "error": {
                "code": "Not Found",
                "description": "No data found, symbol may be delisted"
            }
        }
    })
}

/// Write `body` to a temp file. Keep the returned handle alive while the
/// file is in use.
pub fn write_json_file(body: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", serde_json::to_string(body).unwrap()).unwrap();
    file.flush().unwrap();
    file
}

/// Answer exactly one HTTP request on a local port with `status` and `body`.
///
/// Returns the base URL to point a source at and a handle that yields the
/// request line the server received.
pub fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut header = String::new();
            let n = reader.read_line(&mut header).unwrap();
            if n == 0 || header == "\r\n" {
                break;
            }
        }
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request_line.trim_end().to_string()
    });

    (format!("http://{}", addr), handle)
}
