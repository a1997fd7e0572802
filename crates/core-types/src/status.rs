// In crates/core-types/src/status.rs

//! Trade status state machine and the execution/eligibility predicates.
//!
//! These predicates are the single source of truth for "was this trade
//! entered" and "does it count toward realized performance". Both the
//! analytics engine and the mutation helpers on [`TradeRecord`] go through
//! them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::trade::TradeRecord;

/// Lifecycle status of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeStatus {
    /// Created, waiting for the entry price to be reached.
    Waiting,
    /// Entry filled, position is live.
    Open,
    Closed,
    ProfitHit,
    StopHit,
    /// Withdrawn before entry.
    Cancelled,
    /// Never triggered before its validity ran out.
    Expired,
    AiClosed,
    UserClosed,
}

impl TradeStatus {
    pub const ALL: [TradeStatus; 9] = [
        TradeStatus::Waiting,
        TradeStatus::Open,
        TradeStatus::Closed,
        TradeStatus::ProfitHit,
        TradeStatus::StopHit,
        TradeStatus::Cancelled,
        TradeStatus::Expired,
        TradeStatus::AiClosed,
        TradeStatus::UserClosed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TradeStatus::Waiting => "waiting",
            TradeStatus::Open => "open",
            TradeStatus::Closed => "closed",
            TradeStatus::ProfitHit => "profit_hit",
            TradeStatus::StopHit => "stop_hit",
            TradeStatus::Cancelled => "cancelled",
            TradeStatus::Expired => "expired",
            TradeStatus::AiClosed => "ai_closed",
            TradeStatus::UserClosed => "user_closed",
        }
    }

    /// True for the statuses that close a live position.
    pub fn is_closed(self) -> bool {
        matches!(
            self,
            TradeStatus::Closed
                | TradeStatus::ProfitHit
                | TradeStatus::StopHit
                | TradeStatus::AiClosed
                | TradeStatus::UserClosed
        )
    }

    pub fn is_active(self) -> bool {
        self == TradeStatus::Open
    }

    /// No further transitions are allowed out of a terminal status.
    pub fn is_terminal(self) -> bool {
        self.is_closed() || matches!(self, TradeStatus::Cancelled | TradeStatus::Expired)
    }

    /// The allowed-transition table:
    /// `waiting -> {open, cancelled, expired}` and `open -> {closed family}`.
    pub fn can_transition_to(self, next: TradeStatus) -> bool {
        match self {
            TradeStatus::Waiting => matches!(
                next,
                TradeStatus::Open | TradeStatus::Cancelled | TradeStatus::Expired
            ),
            TradeStatus::Open => next.is_closed(),
            _ => false,
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A real position was opened: the status is `open` or a closed status, and
/// an actual entry fill exists. A trade closed while still waiting is not
/// executed, whatever its status says.
pub fn is_executed(trade: &TradeRecord) -> bool {
    (trade.status.is_active() || trade.status.is_closed()) && trade.execution.entry().is_some()
}

/// The gate applied before any percentage-based aggregation.
pub fn counts_for_performance(trade: &TradeRecord) -> bool {
    is_executed(trade) && trade.status.is_closed() && trade.execution.outcome().is_some()
}

/// Closed-looking status without ever having been entered.
pub fn is_invalidated(trade: &TradeRecord) -> bool {
    trade.status.is_closed() && trade.execution.entry().is_none()
}
