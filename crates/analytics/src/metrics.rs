// In crates/analytics/src/metrics.rs

//! Metric primitives.
//!
//! The return-based functions take per-trade `profit_loss_percentage`
//! values. None of them divide by zero: every ratio has an explicit branch
//! for an empty or degenerate input and falls back to `0.0`.

use core_types::{Action, TradeRecord, TradeSetup};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

/// Percentage returns of the trades that count for performance.
pub fn returns_of(trades: &[&TradeRecord]) -> Vec<f64> {
    trades
        .iter()
        .filter(|t| t.counts_for_performance())
        .filter_map(|t| t.profit_loss_percentage())
        .collect()
}

/// Sums from `+0.0`. `Iterator::sum` for floats starts at `-0.0`, which
/// would leak into empty reports as a negative zero.
fn sum<'a>(values: impl IntoIterator<Item = &'a f64>) -> f64 {
    values.into_iter().fold(0.0, |acc, v| acc + v)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        sum(values) / values.len() as f64
    }
}

pub fn winning_count(returns: &[f64]) -> usize {
    returns.iter().filter(|r| **r > 0.0).count()
}

pub fn losing_count(returns: &[f64]) -> usize {
    returns.iter().filter(|r| **r < 0.0).count()
}

/// Share of strictly positive returns, in percent.
pub fn win_rate(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    winning_count(returns) as f64 / returns.len() as f64 * 100.0
}

pub fn average_return(returns: &[f64]) -> f64 {
    mean(returns)
}

/// Plain sum of the percentages (no compounding).
pub fn total_return(returns: &[f64]) -> f64 {
    sum(returns)
}

pub fn best_trade(returns: &[f64]) -> f64 {
    returns.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

pub fn worst_trade(returns: &[f64]) -> f64 {
    returns.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

/// Best winning return; `None` when nothing has won yet.
pub fn best_winner(returns: &[f64]) -> Option<f64> {
    returns.iter().copied().filter(|r| *r > 0.0).reduce(f64::max)
}

/// Worst losing return; `None` when nothing has lost yet.
pub fn worst_loser(returns: &[f64]) -> Option<f64> {
    returns.iter().copied().filter(|r| *r < 0.0).reduce(f64::min)
}

/// Summed gains over summed absolute non-positive returns.
///
/// `+∞` when there are gains but no losses, `0.0` when there are no gains.
pub fn profit_factor(returns: &[f64]) -> f64 {
    let gross_profit = sum(returns.iter().filter(|r| **r > 0.0));
    let gross_loss = sum(returns.iter().filter(|r| **r <= 0.0)).abs();

    if gross_loss > 0.0 {
        gross_profit / gross_loss
    } else if gross_profit > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

/// Simplified Sharpe ratio: mean return over the population standard
/// deviation of returns.
///
/// No risk-free rate and no annualization, so the value is a dimensionless
/// dispersion-adjusted return and is not comparable to a textbook Sharpe.
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    let Some(first) = returns.first() else {
        return 0.0;
    };
    // Identical returns have no dispersion, but the rounded mean would leave
    // a residual deviation of a few ulps.
    if returns.iter().all(|r| r == first) {
        return 0.0;
    }
    let mean_return = mean(returns);
    let variance = returns
        .iter()
        .map(|r| (r - mean_return).powi(2))
        .sum::<f64>()
        / returns.len() as f64;
    let std_dev = variance.sqrt();

    if std_dev > 0.0 { mean_return / std_dev } else { 0.0 }
}

/// Largest peak-to-trough decline of the cumulative return series, with
/// trades ordered by exit time. Trades without an exit are skipped.
pub fn max_drawdown(trades: &[&TradeRecord]) -> f64 {
    let mut exits: Vec<_> = trades
        .iter()
        .filter(|t| t.counts_for_performance())
        .filter_map(|t| Some((t.exit_date()?, t.profit_loss_percentage()?)))
        .collect();
    exits.sort_by_key(|(exit, _)| *exit);

    let mut running = 0.0_f64;
    let mut peak = 0.0_f64;
    let mut max_drawdown = 0.0_f64;
    for (_, pct) in exits {
        running += pct;
        peak = peak.max(running);
        max_drawdown = max_drawdown.max(peak - running);
    }
    max_drawdown
}

/// Planned reward distance over planned risk distance of a setup.
///
/// `None` unless entry, target and stop are all present and distinct.
pub fn risk_reward_ratio(setup: &TradeSetup) -> Option<f64> {
    let entry = setup.entry_price;
    let target = setup.target_price?;
    let stop = setup.stop_loss?;
    if entry == target || entry == stop || target == stop {
        return None;
    }

    let (reward, risk) = match setup.action {
        Action::Buy => (target - entry, entry - stop),
        Action::Sell => (entry - target, stop - entry),
    };
    let (reward, risk) = (reward.abs(), risk.abs());
    if risk == Decimal::ZERO {
        return Some(0.0);
    }
    Some((reward / risk).to_f64().unwrap_or(0.0))
}

/// Mean risk/reward over every trade with a complete setup, executed or not.
pub fn average_risk_reward(trades: &[&TradeRecord]) -> f64 {
    let ratios: Vec<f64> = trades
        .iter()
        .filter_map(|t| risk_reward_ratio(&t.setup))
        .collect();
    mean(&ratios)
}

/// Mean hold time in hours over the trades that count for performance.
pub fn average_hold_time(trades: &[&TradeRecord]) -> f64 {
    let hours: Vec<f64> = trades
        .iter()
        .filter(|t| t.counts_for_performance())
        .filter_map(|t| t.hold_time())
        .collect();
    mean(&hours)
}

pub fn average_confidence(trades: &[&TradeRecord]) -> f64 {
    let scores: Vec<f64> = trades.iter().map(|t| t.confidence).collect();
    mean(&scores)
}
