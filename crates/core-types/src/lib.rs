// In crates/core-types/src/lib.rs

pub mod error;
pub mod status;
pub mod trade;
pub mod wire;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use status::{counts_for_performance, is_executed, is_invalidated, TradeStatus};
pub use trade::{
    Action, ConfidenceLevel, Execution, Fill, Outcome, Sentiment, TradeRecord, TradeSetup,
};
pub use wire::RawTrade;
