// In crates/analytics/src/aggregate.rs

//! Dimensional breakdowns of a trade set.
//!
//! Confidence and timeframe breakdowns only look at eligible trades. Model
//! and ticker breakdowns count every recommendation, but their performance
//! figures still go through the eligibility gate.

use std::collections::BTreeMap;

use core_types::{ConfidenceLevel, TradeRecord};

use crate::metrics;
use crate::types::{GroupStats, SegmentStats};

/// Label used when a trade carries an empty timeframe or model name.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Groups trades by `key_fn`, keeping input order inside each group.
pub fn group_by<'a, K, F>(trades: &[&'a TradeRecord], key_fn: F) -> BTreeMap<K, Vec<&'a TradeRecord>>
where
    K: Ord,
    F: Fn(&TradeRecord) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a TradeRecord>> = BTreeMap::new();
    for &trade in trades {
        groups.entry(key_fn(trade)).or_default().push(trade);
    }
    groups
}

impl GroupStats {
    /// Win rate and returns over the eligible members of `trades`.
    pub fn from_trades(trades: &[&TradeRecord]) -> Self {
        let returns = metrics::returns_of(trades);
        Self {
            count: returns.len(),
            win_rate: metrics::win_rate(&returns),
            average_return: metrics::average_return(&returns),
            total_return: metrics::total_return(&returns),
        }
    }
}

impl SegmentStats {
    /// Volume over every member of `trades`, performance over the eligible ones.
    pub fn from_trades(trades: &[&TradeRecord]) -> Self {
        let returns = metrics::returns_of(trades);
        Self {
            total_trades: trades.len(),
            closed_trades: returns.len(),
            winning_trades: metrics::winning_count(&returns),
            win_rate: metrics::win_rate(&returns),
            average_return: metrics::average_return(&returns),
            total_return: metrics::total_return(&returns),
            average_confidence: metrics::average_confidence(trades),
            average_hold_time: metrics::average_hold_time(trades),
            best_trade: metrics::best_winner(&returns),
            worst_trade: metrics::worst_loser(&returns),
            profit_factor: metrics::profit_factor(&returns),
        }
    }
}

fn eligible<'a>(trades: &[&'a TradeRecord]) -> Vec<&'a TradeRecord> {
    trades.iter().copied().filter(|t| t.counts_for_performance()).collect()
}

fn label(value: &str) -> String {
    if value.trim().is_empty() {
        UNKNOWN_LABEL.to_string()
    } else {
        value.to_string()
    }
}

/// Always carries all four confidence buckets, zeroed when empty.
pub fn by_confidence(trades: &[&TradeRecord]) -> BTreeMap<ConfidenceLevel, GroupStats> {
    let groups = group_by(&eligible(trades), |t| t.confidence_level());
    ConfidenceLevel::ALL
        .iter()
        .map(|level| {
            let stats = groups
                .get(level)
                .map(|members| GroupStats::from_trades(members))
                .unwrap_or_default();
            (*level, stats)
        })
        .collect()
}

pub fn by_timeframe(trades: &[&TradeRecord]) -> BTreeMap<String, GroupStats> {
    group_by(&eligible(trades), |t| label(&t.timeframe))
        .into_iter()
        .map(|(timeframe, members)| (timeframe, GroupStats::from_trades(&members)))
        .collect()
}

pub fn by_model(trades: &[&TradeRecord]) -> BTreeMap<String, SegmentStats> {
    group_by(trades, |t| label(&t.ai_model))
        .into_iter()
        .map(|(model, members)| (model, SegmentStats::from_trades(&members)))
        .collect()
}

pub fn by_ticker(trades: &[&TradeRecord]) -> BTreeMap<String, SegmentStats> {
    group_by(trades, |t| t.ticker.clone())
        .into_iter()
        .map(|(ticker, members)| (ticker, SegmentStats::from_trades(&members)))
        .collect()
}
