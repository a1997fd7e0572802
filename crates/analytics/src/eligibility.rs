// In crates/analytics/src/eligibility.rs

use core_types::{TradeRecord, TradeStatus};

/// A single pass over the input, splitting it into the slices the report
/// needs. Classification comes from `core_types::status`.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub all: Vec<&'a TradeRecord>,
    /// Entered, closed and carrying a percentage return.
    pub closed: Vec<&'a TradeRecord>,
    /// Entered and still open.
    pub active: Vec<&'a TradeRecord>,
    pub waiting: Vec<&'a TradeRecord>,
    /// Closed-looking status without ever having been entered.
    pub invalidated: Vec<&'a TradeRecord>,
    pub cancelled: Vec<&'a TradeRecord>,
    pub expired: Vec<&'a TradeRecord>,
}

impl<'a> Partition<'a> {
    pub fn of(trades: &'a [TradeRecord]) -> Self {
        let mut partition = Partition::default();
        for trade in trades {
            partition.all.push(trade);

            if trade.counts_for_performance() {
                partition.closed.push(trade);
            } else if trade.is_invalidated() {
                partition.invalidated.push(trade);
            } else if trade.is_executed() && trade.status.is_active() {
                partition.active.push(trade);
            }

            match trade.status {
                TradeStatus::Waiting => partition.waiting.push(trade),
                TradeStatus::Cancelled => partition.cancelled.push(trade),
                TradeStatus::Expired => partition.expired.push(trade),
                _ => {}
            }
        }
        partition
    }
}
