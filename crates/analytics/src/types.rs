// In crates/analytics/src/types.rs

use chrono::{DateTime, Utc};
use core_types::ConfidenceLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Win rate and returns of one slice of eligible trades.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    pub count: usize,
    pub win_rate: f64,
    pub average_return: f64,
    pub total_return: f64,
}

/// Per-model or per-ticker statistics.
///
/// `total_trades` and `average_confidence` cover every recommendation in the
/// group; the remaining figures only cover its eligible trades.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentStats {
    pub total_trades: usize,
    pub closed_trades: usize,
    pub winning_trades: usize,
    pub win_rate: f64,
    pub average_return: f64,
    pub total_return: f64,
    pub average_confidence: f64,
    /// Hours.
    pub average_hold_time: f64,
    /// Best winning return, `None` while the group has no winners.
    pub best_trade: Option<f64>,
    /// Worst losing return, `None` while the group has no losers.
    pub worst_trade: Option<f64>,
    #[serde(with = "unbounded")]
    pub profit_factor: f64,
}

pub type ModelStats = SegmentStats;
pub type TickerStats = SegmentStats;

/// Performance of the trades that exited inside a trailing window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowPerformance {
    pub trades: usize,
    pub win_rate: f64,
    pub total_return: f64,
}

/// Performance of the trades that exited in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPerformance {
    /// `YYYY-MM` of the exit date, UTC.
    pub month: String,
    pub trades: usize,
    pub win_rate: f64,
    pub total_return: f64,
    pub average_return: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
}

/// The full statistics report over a set of trade records.
///
/// All returns are in percent of the entry price. `total_return` is a plain
/// sum of per-trade percentages, not a compounded portfolio return.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    /// Instant the trailing windows were measured against.
    pub generated_at: DateTime<Utc>,

    // Counts
    pub total_trades: usize,
    pub waiting_trades: usize,
    pub active_trades: usize,
    pub closed_trades: usize,
    pub invalidated_trades: usize,
    pub cancelled_trades: usize,
    pub expired_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,

    // Scalar metrics over eligible trades
    pub win_rate: f64,
    pub average_return: f64,
    pub total_return: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
    pub average_hold_time: f64,
    #[serde(with = "unbounded")]
    pub profit_factor: f64,
    /// Mean return over its population standard deviation. Not annualized.
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,

    // Over every recommendation
    pub average_confidence: f64,
    pub average_risk_reward: f64,

    // Breakdowns
    pub by_confidence: BTreeMap<ConfidenceLevel, GroupStats>,
    pub by_timeframe: BTreeMap<String, GroupStats>,
    pub by_model: BTreeMap<String, ModelStats>,
    pub by_ticker: BTreeMap<String, TickerStats>,

    // Trends
    pub monthly: Vec<MonthlyPerformance>,
    pub last_7_days: WindowPerformance,
    pub last_30_days: WindowPerformance,
    pub last_90_days: WindowPerformance,
}

impl StatisticsReport {
    /// Renders a plain-text summary of the headline figures.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Trade Performance Summary\n\
             =========================\n\
             \n\
             Recommendations: {} (waiting: {}, active: {}, closed: {})\n\
             Excluded: {} invalidated, {} cancelled, {} expired\n\
             \n\
             Win Rate: {:.2}% ({} W / {} L)\n\
             Total Return: {:.2}%\n\
             Average Return: {:.2}%\n\
             Best Trade: {:.2}%\n\
             Worst Trade: {:.2}%\n\
             Profit Factor: {}\n\
             Sharpe Ratio: {:.2}\n\
             Max Drawdown: {:.2}%\n\
             Avg Hold Time: {:.1}h\n\
             Avg Risk/Reward: {:.2}\n\
             Avg Confidence: {:.0}%\n\
             \n\
             Last 7 Days: {}\n\
             Last 30 Days: {}\n\
             Last 90 Days: {}\n",
            self.total_trades,
            self.waiting_trades,
            self.active_trades,
            self.closed_trades,
            self.invalidated_trades,
            self.cancelled_trades,
            self.expired_trades,
            self.win_rate,
            self.winning_trades,
            self.losing_trades,
            self.total_return,
            self.average_return,
            self.best_trade,
            self.worst_trade,
            format_ratio(self.profit_factor),
            self.sharpe_ratio,
            self.max_drawdown,
            self.average_hold_time,
            self.average_risk_reward,
            self.average_confidence * 100.0,
            format_window(&self.last_7_days),
            format_window(&self.last_30_days),
            format_window(&self.last_90_days),
        );

        if !self.by_model.is_empty() {
            out.push_str("\nBy Model\n--------\n");
            for (model, stats) in &self.by_model {
                out.push_str(&format_segment(model, stats));
            }
        }
        if !self.by_ticker.is_empty() {
            out.push_str("\nBy Ticker\n---------\n");
            for (ticker, stats) in &self.by_ticker {
                out.push_str(&format_segment(ticker, stats));
            }
        }
        out
    }
}

/// Profit factor for display: "∞" when no losses were incurred.
pub fn format_ratio(value: f64) -> String {
    if value.is_infinite() {
        "∞".to_string()
    } else {
        format!("{:.2}", value)
    }
}

fn format_window(window: &WindowPerformance) -> String {
    format!(
        "{} trades, {:.2}% win rate, {:+.2}% total",
        window.trades, window.win_rate, window.total_return
    )
}

fn format_segment(name: &str, stats: &SegmentStats) -> String {
    let best = stats
        .best_trade
        .map_or_else(|| "No Wins".to_string(), |v| format!("{:+.2}%", v));
    let worst = stats
        .worst_trade
        .map_or_else(|| "No Losses".to_string(), |v| format!("{:+.2}%", v));
    format!(
        "  {:<16} {:>4} recs, {:>3} closed, {:>6.2}% win, {:>+8.2}% total, best {}, worst {}, PF {}\n",
        name,
        stats.total_trades,
        stats.closed_trades,
        stats.win_rate,
        stats.total_return,
        best,
        worst,
        format_ratio(stats.profit_factor),
    )
}

/// Serde adapter for ratios that may be `+∞`.
///
/// Strict JSON has no infinity literal, so an infinite value is written as
/// the string `"infinite"`. Finite values stay plain numbers.
pub mod unbounded {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const INFINITE: &str = "infinite";

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_infinite() && value.is_sign_positive() {
            serializer.serialize_str(INFINITE)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) if text == INFINITE => Ok(f64::INFINITY),
            Repr::Text(other) => Err(D::Error::custom(format!(
                "expected a number or \"{INFINITE}\", got \"{other}\""
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infinite_profit_factor_round_trips_through_json() {
        let report = StatisticsReport {
            profit_factor: f64::INFINITY,
            ..StatisticsReport::default()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["profitFactor"], "infinite");

        let back: StatisticsReport = serde_json::from_value(json).unwrap();
        assert!(back.profit_factor.is_infinite());
    }

    #[test]
    fn test_finite_profit_factor_stays_numeric() {
        let stats = SegmentStats { profit_factor: 4.0, ..SegmentStats::default() };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["profitFactor"], 4.0);
        assert!(json["bestTrade"].is_null());
    }

    #[test]
    fn test_confidence_keys_serialize_as_snake_case() {
        let mut report = StatisticsReport::default();
        report.by_confidence.insert(ConfidenceLevel::VeryHigh, GroupStats::default());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["byConfidence"].get("very_high").is_some());
    }

    #[test]
    fn test_summary_renders_unbounded_and_missing_values() {
        let mut report = StatisticsReport {
            profit_factor: f64::INFINITY,
            ..StatisticsReport::default()
        };
        report.by_ticker.insert("AAPL".to_string(), SegmentStats::default());
        let text = report.summary();
        assert!(text.contains("Profit Factor: ∞"));
        assert!(text.contains("No Wins"));
        assert!(text.contains("No Losses"));
    }
}
