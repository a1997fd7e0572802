// In app/src/loader.rs

use std::path::Path;

use anyhow::{Context, Result};
use core_types::TradeRecord;

/// Trades read from a ledger export, plus how many entries were rejected.
#[derive(Debug)]
pub struct LoadedTrades {
    pub trades: Vec<TradeRecord>,
    pub rejected: usize,
}

/// Reads a JSON array of trade records from `path`.
pub fn load_trades(path: &Path) -> Result<LoadedTrades> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trade file {}", path.display()))?;
    parse_trades(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parses a JSON array of trade records.
///
/// Entries that fail validation are logged and skipped so one bad record
/// does not hide the rest of the ledger.
pub fn parse_trades(json: &str) -> Result<LoadedTrades> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(json).context("Expected a JSON array of trade records")?;

    let mut trades = Vec::with_capacity(entries.len());
    let mut rejected = 0;
    for (index, entry) in entries.into_iter().enumerate() {
        let id = entry
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or("<missing>")
            .to_string();
        match serde_json::from_value::<TradeRecord>(entry) {
            Ok(trade) => trades.push(trade),
            Err(e) => {
                rejected += 1;
                tracing::warn!(index, id = %id, error = %e, "Skipping invalid trade record");
            }
        }
    }

    tracing::info!(loaded = trades.len(), rejected, "Trade records loaded");
    Ok(LoadedTrades { trades, rejected })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_invalid_records() {
        let json = r#"[
            {
                "id": "ok-1", "ticker": "aapl", "aiModel": "gpt-4o", "confidence": 0.7,
                "action": "buy", "entryPrice": 190, "status": "waiting",
                "entryDate": "2024-05-01T14:00:00Z"
            },
            {
                "id": "bad-1", "ticker": "aapl", "aiModel": "gpt-4o", "confidence": 7,
                "action": "buy", "entryPrice": 190, "status": "waiting",
                "entryDate": "2024-05-01T14:00:00Z"
            },
            { "id": "bad-2" }
        ]"#;
        let loaded = parse_trades(json).unwrap();
        assert_eq!(loaded.trades.len(), 1);
        assert_eq!(loaded.trades[0].ticker, "AAPL");
        assert_eq!(loaded.rejected, 2);
    }

    #[test]
    fn test_rejects_non_array_input() {
        assert!(parse_trades(r#"{"id": "x"}"#).is_err());
    }
}
