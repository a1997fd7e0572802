use crate::aggregate;
use crate::eligibility::Partition;
use crate::metrics;
use crate::trends::{self, TRAILING_WINDOWS};
use crate::types::StatisticsReport;
use chrono::{DateTime, Utc};
use core_types::TradeRecord;

/// Calculates trade statistics. Holds no state: every call recomputes the
/// whole report from its input.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates a full report, measuring trailing windows up to now.
    pub fn calculate(&self, trades: &[TradeRecord]) -> StatisticsReport {
        self.calculate_at(trades, Utc::now())
    }

    /// Calculates a full report with trailing windows ending at `now`.
    pub fn calculate_at(&self, trades: &[TradeRecord], now: DateTime<Utc>) -> StatisticsReport {
        let partition = Partition::of(trades);
        tracing::debug!(
            total = partition.all.len(),
            closed = partition.closed.len(),
            active = partition.active.len(),
            invalidated = partition.invalidated.len(),
            "Calculating trade statistics"
        );

        let mut report = StatisticsReport {
            generated_at: now,
            total_trades: partition.all.len(),
            waiting_trades: partition.waiting.len(),
            active_trades: partition.active.len(),
            closed_trades: partition.closed.len(),
            invalidated_trades: partition.invalidated.len(),
            cancelled_trades: partition.cancelled.len(),
            expired_trades: partition.expired.len(),
            ..StatisticsReport::default()
        };
        if !partition.invalidated.is_empty() {
            tracing::debug!(
                count = partition.invalidated.len(),
                "Excluding closed trades that were never entered"
            );
        }

        // --- Scalar metrics over eligible trades ---

        let returns = metrics::returns_of(&partition.closed);
        report.winning_trades = metrics::winning_count(&returns);
        report.losing_trades = metrics::losing_count(&returns);
        report.win_rate = metrics::win_rate(&returns);
        report.average_return = metrics::average_return(&returns);
        report.total_return = metrics::total_return(&returns);
        report.best_trade = metrics::best_trade(&returns);
        report.worst_trade = metrics::worst_trade(&returns);
        report.profit_factor = metrics::profit_factor(&returns);
        report.sharpe_ratio = metrics::sharpe_ratio(&returns);
        report.max_drawdown = metrics::max_drawdown(&partition.closed);
        report.average_hold_time = metrics::average_hold_time(&partition.closed);

        // Setup quality and confidence describe every recommendation.
        report.average_risk_reward = metrics::average_risk_reward(&partition.all);
        report.average_confidence = metrics::average_confidence(&partition.all);

        // --- Breakdowns ---

        report.by_confidence = aggregate::by_confidence(&partition.closed);
        report.by_timeframe = aggregate::by_timeframe(&partition.closed);
        report.by_model = aggregate::by_model(&partition.all);
        report.by_ticker = aggregate::by_ticker(&partition.all);

        // --- Trends ---

        report.monthly = trends::monthly_breakdown(&partition.closed);
        let [week, month, quarter] =
            TRAILING_WINDOWS.map(|days| trends::trailing_window(&partition.closed, days, now));
        report.last_7_days = week;
        report.last_30_days = month;
        report.last_90_days = quarter;

        report
    }
}

/// Calculates a report over `trades` with trailing windows ending now.
pub fn calculate_statistics(trades: &[TradeRecord]) -> StatisticsReport {
    AnalyticsEngine::new().calculate(trades)
}

/// Deterministic variant of [`calculate_statistics`].
pub fn calculate_statistics_at(trades: &[TradeRecord], now: DateTime<Utc>) -> StatisticsReport {
    AnalyticsEngine::new().calculate_at(trades, now)
}
