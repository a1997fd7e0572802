// In crates/analytics/src/trends.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use core_types::TradeRecord;

use crate::metrics;
use crate::types::{MonthlyPerformance, WindowPerformance};

/// Trailing windows carried by every report, in days.
pub const TRAILING_WINDOWS: [i64; 3] = [7, 30, 90];

/// Eligible trades that exited within `days` before `now` (inclusive).
pub fn trailing_window(trades: &[&TradeRecord], days: i64, now: DateTime<Utc>) -> WindowPerformance {
    let since = now - Duration::days(days);
    let in_window: Vec<&TradeRecord> = trades
        .iter()
        .copied()
        .filter(|t| {
            t.exit_date()
                .is_some_and(|exit| exit >= since && exit <= now)
        })
        .collect();
    let returns = metrics::returns_of(&in_window);

    WindowPerformance {
        trades: returns.len(),
        win_rate: metrics::win_rate(&returns),
        total_return: metrics::total_return(&returns),
    }
}

/// Eligible trades grouped by `YYYY-MM` of their exit date, oldest month first.
pub fn monthly_breakdown(trades: &[&TradeRecord]) -> Vec<MonthlyPerformance> {
    let mut months: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for trade in trades.iter().filter(|t| t.counts_for_performance()) {
        if let (Some(exit), Some(pct)) = (trade.exit_date(), trade.profit_loss_percentage()) {
            months
                .entry(exit.format("%Y-%m").to_string())
                .or_default()
                .push(pct);
        }
    }

    // BTreeMap iteration is already ascending by the zero-padded month key.
    months
        .into_iter()
        .map(|(month, returns)| MonthlyPerformance {
            month,
            trades: returns.len(),
            win_rate: metrics::win_rate(&returns),
            total_return: metrics::total_return(&returns),
            average_return: metrics::average_return(&returns),
            best_trade: metrics::best_trade(&returns),
            worst_trade: metrics::worst_trade(&returns),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, closed_trade, invalidated_trade, realize, record};

    #[test]
    fn test_monthly_breakdown_is_sorted_by_month() {
        let trades = vec![
            realize(record("m", "AAPL", "gpt-4o", 0.8, "1h"), 3.0, at(2024, 3, 10)),
            realize(record("j", "AAPL", "gpt-4o", 0.8, "1h"), 1.0, at(2024, 1, 10)),
            realize(record("f", "AAPL", "gpt-4o", 0.8, "1h"), -2.0, at(2024, 2, 10)),
            realize(record("f2", "AAPL", "gpt-4o", 0.8, "1h"), 6.0, at(2024, 2, 20)),
        ];
        let refs: Vec<&TradeRecord> = trades.iter().collect();
        let monthly = monthly_breakdown(&refs);

        let keys: Vec<&str> = monthly.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(keys, ["2024-01", "2024-02", "2024-03"]);

        let feb = &monthly[1];
        assert_eq!(feb.trades, 2);
        assert_eq!(feb.win_rate, 50.0);
        assert_eq!(feb.total_return, 4.0);
        assert_eq!(feb.average_return, 2.0);
        assert_eq!(feb.best_trade, 6.0);
        assert_eq!(feb.worst_trade, -2.0);
    }

    #[test]
    fn test_trailing_window_bounds() {
        let now = at(2024, 1, 31);
        let trades = vec![
            closed_trade("in", 4.0, 25),
            closed_trade("edge", -1.0, 24),
            closed_trade("old", 9.0, 10),
            invalidated_trade("x"),
        ];
        let refs: Vec<&TradeRecord> = trades.iter().collect();

        let week = trailing_window(&refs, 7, now);
        assert_eq!(week.trades, 2);
        assert_eq!(week.win_rate, 50.0);
        assert_eq!(week.total_return, 3.0);

        let month = trailing_window(&refs, 30, now);
        assert_eq!(month.trades, 3);
        assert_eq!(month.total_return, 12.0);
    }

    #[test]
    fn test_trades_after_now_are_outside_the_window() {
        let trades = vec![closed_trade("future", 5.0, 20)];
        let refs: Vec<&TradeRecord> = trades.iter().collect();
        let window = trailing_window(&refs, 90, at(2024, 1, 10));
        assert_eq!(window, WindowPerformance::default());
    }
}
