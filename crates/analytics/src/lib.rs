// In crates/analytics/src/lib.rs

//! Trade performance analytics.
//!
//! Everything in this crate is a pure function of the trade list it is
//! given. [`calculate_statistics`] is the entry point; the submodules expose
//! the individual building blocks.

pub mod aggregate;
pub mod eligibility;
pub mod engine;
pub mod metrics;
pub mod trends;
pub mod types;

#[cfg(test)]
mod test_support;

pub use engine::{calculate_statistics, calculate_statistics_at, AnalyticsEngine};
pub use types::{
    GroupStats, ModelStats, MonthlyPerformance, SegmentStats, StatisticsReport, TickerStats,
    WindowPerformance,
};
