use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Crypto — A trading pair from the fixed picker catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crypto {
    pub symbol: String,
    pub name: String,
}

impl Crypto {
    /// All pairs offered by the symbol picker, in display order.
    pub fn catalog() -> Vec<Crypto> {
        config::CRYPTOS
            .iter()
            .map(|(symbol, name)| Crypto {
                symbol: symbol.to_string(),
                name: name.to_string(),
            })
            .collect()
    }

    /// Look up a pair by its symbol (case-insensitive).
    pub fn from_symbol(symbol: &str) -> Result<Crypto> {
        Self::catalog()
            .into_iter()
            .find(|c| c.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| DashboardError::InvalidInput(format!("Unknown symbol: {}", symbol)))
    }
}

// ---------------------------------------------------------------------------
// Month labels
// ---------------------------------------------------------------------------

/// Map a month abbreviation (`"Jan"`..`"Dec"`, case-insensitive) to 1..=12.
pub fn month_number(label: &str) -> Result<u32> {
    config::MONTH_LABELS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(label.trim()))
        .map(|i| i as u32 + 1)
        .ok_or_else(|| DashboardError::InvalidInput(format!("Unknown month label: {}", label)))
}

/// Map 1..=12 to its abbreviation.
pub fn month_label(month: u32) -> Result<&'static str> {
    if !(1..=12).contains(&month) {
        return Err(DashboardError::InvalidInput(format!(
            "Month must be between 1 and 12, got {}",
            month
        )));
    }
    Ok(config::MONTH_LABELS[month as usize - 1])
}
