// In crates/core-types/src/trade.rs

use std::fmt;

use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::status::{self, TradeStatus};
use crate::wire::RawTrade;

/// Direction of the recommended position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
}

impl Action {
    /// +1 for longs, -1 for shorts. Multiplies a raw `exit - entry` move.
    pub fn direction(self) -> Decimal {
        match self {
            Action::Buy => Decimal::ONE,
            Action::Sell => Decimal::NEGATIVE_ONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

/// Four-bucket classification of a model's confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    pub const ALL: [ConfidenceLevel; 4] = [
        ConfidenceLevel::Low,
        ConfidenceLevel::Medium,
        ConfidenceLevel::High,
        ConfidenceLevel::VeryHigh,
    ];

    pub fn from_score(confidence: f64) -> Self {
        if confidence >= 0.9 {
            ConfidenceLevel::VeryHigh
        } else if confidence >= 0.75 {
            ConfidenceLevel::High
        } else if confidence >= 0.5 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::High => "high",
            ConfidenceLevel::VeryHigh => "very_high",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The planned trade as the model proposed it.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSetup {
    pub action: Action,
    pub entry_price: Decimal,
    pub target_price: Option<Decimal>,
    pub stop_loss: Option<Decimal>,
    /// Free-text rationale. Not used in any computation.
    pub reasoning: String,
}

impl TradeSetup {
    pub fn new(action: Action, entry_price: Decimal) -> Self {
        Self {
            action,
            entry_price,
            target_price: None,
            stop_loss: None,
            reasoning: String::new(),
        }
    }

    pub fn with_target(mut self, target: Decimal) -> Self {
        self.target_price = Some(target);
        self
    }

    pub fn with_stop(mut self, stop: Decimal) -> Self {
        self.stop_loss = Some(stop);
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }
}

/// A price/time pair at which a position was entered or exited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub price: Decimal,
    pub at: DateTime<Utc>,
}

/// Realized result of a closed position.
///
/// Only the percentage is required. Ledger rows closed outside the lifecycle
/// helpers may lack an exit price or date, so the values derived from them
/// are optional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// Signed per-unit price move in the trade's favour.
    pub profit_loss: Option<Decimal>,
    /// Signed return relative to the actual entry price, in percent.
    pub profit_loss_percentage: f64,
    /// Hours between entry and exit.
    pub hold_time: Option<f64>,
}

impl Outcome {
    /// Direction-aware outcome of a round trip.
    pub fn compute(action: Action, entry: &Fill, exit: &Fill) -> Self {
        let profit_loss = (exit.price - entry.price) * action.direction();
        let profit_loss_percentage = if entry.price.is_zero() {
            0.0
        } else {
            (profit_loss / entry.price * Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or(0.0)
        };

        Self {
            profit_loss: Some(profit_loss),
            profit_loss_percentage,
            hold_time: Some(hours_between(entry.at, exit.at)),
        }
    }
}

pub(crate) fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 3_600_000.0
}

/// Whether a trade was ever entered, and if so whether it has a realized result.
///
/// Outcome fields only exist on `Realized`, so a trade that was never
/// entered cannot carry performance data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Execution {
    /// Never triggered.
    Pending,
    /// Entry filled, no realized result yet.
    Entered(Fill),
    /// Closed with a known return. The exit itself may be unrecorded.
    Realized {
        entry: Fill,
        exit_at: Option<DateTime<Utc>>,
        exit_price: Option<Decimal>,
        outcome: Outcome,
    },
}

impl Execution {
    pub fn entry(&self) -> Option<&Fill> {
        match self {
            Execution::Pending => None,
            Execution::Entered(entry) | Execution::Realized { entry, .. } => Some(entry),
        }
    }

    pub fn exit_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Execution::Realized { exit_at, .. } => *exit_at,
            _ => None,
        }
    }

    pub fn exit_price(&self) -> Option<Decimal> {
        match self {
            Execution::Realized { exit_price, .. } => *exit_price,
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Execution::Realized { outcome, .. } => Some(outcome),
            _ => None,
        }
    }
}

/// One AI recommendation and its full lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrade", into = "RawTrade")]
pub struct TradeRecord {
    pub id: String,
    pub analysis_id: String,
    /// Uppercase instrument symbol.
    pub ticker: String,
    /// Chart timeframe label, e.g. "1h" or "1D".
    pub timeframe: String,
    /// Identifier of the recommending model.
    pub ai_model: String,
    /// Model confidence in [0, 1].
    pub confidence: f64,
    pub sentiment: Sentiment,
    pub setup: TradeSetup,
    pub status: TradeStatus,
    /// Creation timestamp of the recommendation.
    pub entry_date: DateTime<Utc>,
    pub execution: Execution,
}

impl TradeRecord {
    /// Creates a new `waiting` recommendation.
    pub fn new(
        id: impl Into<String>,
        ticker: &str,
        ai_model: impl Into<String>,
        confidence: f64,
        setup: TradeSetup,
        entry_date: DateTime<Utc>,
    ) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::MissingField("id"));
        }
        if ticker.trim().is_empty() {
            return Err(Error::MissingField("ticker"));
        }
        validate_confidence(confidence)?;
        validate_price("entryPrice", setup.entry_price)?;

        Ok(Self {
            id,
            analysis_id: String::new(),
            ticker: ticker.trim().to_uppercase(),
            timeframe: String::new(),
            ai_model: ai_model.into(),
            confidence,
            sentiment: Sentiment::default(),
            setup,
            status: TradeStatus::Waiting,
            entry_date,
            execution: Execution::Pending,
        })
    }

    pub fn with_timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.timeframe = timeframe.into();
        self
    }

    pub fn with_analysis_id(mut self, analysis_id: impl Into<String>) -> Self {
        self.analysis_id = analysis_id.into();
        self
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = sentiment;
        self
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.confidence)
    }

    pub fn action(&self) -> Action {
        self.setup.action
    }

    pub fn is_executed(&self) -> bool {
        status::is_executed(self)
    }

    pub fn counts_for_performance(&self) -> bool {
        status::counts_for_performance(self)
    }

    pub fn is_invalidated(&self) -> bool {
        status::is_invalidated(self)
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.execution.outcome()
    }

    pub fn profit_loss_percentage(&self) -> Option<f64> {
        self.outcome().map(|o| o.profit_loss_percentage)
    }

    pub fn hold_time(&self) -> Option<f64> {
        self.outcome().and_then(|o| o.hold_time)
    }

    pub fn exit_date(&self) -> Option<DateTime<Utc>> {
        self.execution.exit_date()
    }

    // --- Lifecycle mutations ---

    /// `waiting -> open`, recording the actual entry fill.
    pub fn enter(&mut self, price: Decimal, at: DateTime<Utc>) -> Result<()> {
        validate_price("actualEntryPrice", price)?;
        self.transition(TradeStatus::Open)?;
        self.execution = Execution::Entered(Fill { price, at });
        Ok(())
    }

    /// `open -> <closed status>`, computing the realized outcome.
    pub fn close(&mut self, status: TradeStatus, price: Decimal, at: DateTime<Utc>) -> Result<()> {
        if !status.is_closed() || !self.status.can_transition_to(status) {
            return Err(Error::InvalidTransition { from: self.status, to: status });
        }
        validate_price("exitPrice", price)?;
        let entry = match self.execution {
            Execution::Entered(entry) => entry,
            _ => return Err(Error::InvalidTransition { from: self.status, to: status }),
        };
        if at < entry.at {
            return Err(Error::ExitBeforeEntry { entry: entry.at, exit: at });
        }

        let exit = Fill { price, at };
        let outcome = Outcome::compute(self.setup.action, &entry, &exit);
        self.status = status;
        self.execution = Execution::Realized {
            entry,
            exit_at: Some(exit.at),
            exit_price: Some(exit.price),
            outcome,
        };
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<()> {
        self.transition(TradeStatus::Cancelled)
    }

    pub fn expire(&mut self) -> Result<()> {
        self.transition(TradeStatus::Expired)
    }

    fn transition(&mut self, next: TradeStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(Error::InvalidTransition { from: self.status, to: next });
        }
        self.status = next;
        Ok(())
    }
}

pub(crate) fn validate_confidence(confidence: f64) -> Result<()> {
    if confidence.is_finite() && (0.0..=1.0).contains(&confidence) {
        Ok(())
    } else {
        Err(Error::InvalidConfidence(confidence))
    }
}

pub(crate) fn validate_price(field: &'static str, value: Decimal) -> Result<()> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(Error::InvalidPrice { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn ts(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn waiting(action: Action) -> TradeRecord {
        let setup = TradeSetup::new(action, dec!(100)).with_target(dec!(110)).with_stop(dec!(95));
        TradeRecord::new("t-1", "aapl", "gpt-4o", 0.8, setup, ts(1, 0)).unwrap()
    }

    #[test]
    fn test_confidence_levels() {
        assert_eq!(ConfidenceLevel::from_score(0.95), ConfidenceLevel::VeryHigh);
        assert_eq!(ConfidenceLevel::from_score(0.9), ConfidenceLevel::VeryHigh);
        assert_eq!(ConfidenceLevel::from_score(0.75), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.74), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.5), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.49), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0.0), ConfidenceLevel::Low);
    }

    #[test]
    fn test_new_normalizes_ticker_and_validates() {
        let trade = waiting(Action::Buy);
        assert_eq!(trade.ticker, "AAPL");
        assert_eq!(trade.status, TradeStatus::Waiting);
        assert_eq!(trade.execution, Execution::Pending);

        let setup = TradeSetup::new(Action::Buy, dec!(100));
        let err = TradeRecord::new("t-2", "AAPL", "m", 1.5, setup.clone(), ts(1, 0)).unwrap_err();
        assert_eq!(err, Error::InvalidConfidence(1.5));

        let err = TradeRecord::new("t-2", " ", "m", 0.5, setup, ts(1, 0)).unwrap_err();
        assert_eq!(err, Error::MissingField("ticker"));
    }

    #[test]
    fn test_long_round_trip() {
        let mut trade = waiting(Action::Buy);
        trade.enter(dec!(100), ts(1, 0)).unwrap();
        assert!(trade.is_executed());
        assert!(!trade.counts_for_performance());

        trade.close(TradeStatus::ProfitHit, dec!(110), ts(2, 12)).unwrap();
        let outcome = trade.outcome().unwrap();
        assert_eq!(outcome.profit_loss, Some(dec!(10)));
        assert_eq!(outcome.profit_loss_percentage, 10.0);
        assert_eq!(outcome.hold_time, Some(36.0));
        assert!(trade.counts_for_performance());
        assert_eq!(trade.exit_date(), Some(ts(2, 12)));
    }

    #[test]
    fn test_short_round_trip_is_direction_aware() {
        let mut trade = waiting(Action::Sell);
        trade.enter(dec!(100), ts(1, 0)).unwrap();
        trade.close(TradeStatus::UserClosed, dec!(90), ts(1, 6)).unwrap();
        let outcome = trade.outcome().unwrap();
        assert_eq!(outcome.profit_loss, Some(dec!(10)));
        assert_eq!(outcome.profit_loss_percentage, 10.0);

        let mut loser = waiting(Action::Sell);
        loser.enter(dec!(100), ts(1, 0)).unwrap();
        loser.close(TradeStatus::StopHit, dec!(105), ts(1, 1)).unwrap();
        assert_eq!(loser.profit_loss_percentage(), Some(-5.0));
    }

    #[test]
    fn test_waiting_trade_cannot_be_closed() {
        let mut trade = waiting(Action::Buy);
        let err = trade.close(TradeStatus::UserClosed, dec!(105), ts(2, 0)).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidTransition { from: TradeStatus::Waiting, to: TradeStatus::UserClosed }
        );
        assert_eq!(trade.status, TradeStatus::Waiting);
        assert!(trade.outcome().is_none());

        trade.cancel().unwrap();
        assert_eq!(trade.status, TradeStatus::Cancelled);
        assert!(trade.expire().is_err());
    }

    #[test]
    fn test_close_rejects_exit_before_entry() {
        let mut trade = waiting(Action::Buy);
        trade.enter(dec!(100), ts(2, 0)).unwrap();
        let exit = ts(2, 0) - Duration::hours(1);
        assert!(matches!(
            trade.close(TradeStatus::Closed, dec!(101), exit),
            Err(Error::ExitBeforeEntry { .. })
        ));
        assert_eq!(trade.status, TradeStatus::Open);
    }

    #[test]
    fn test_close_requires_closed_family_status() {
        let mut trade = waiting(Action::Buy);
        trade.enter(dec!(100), ts(1, 0)).unwrap();
        assert!(trade.close(TradeStatus::Expired, dec!(100), ts(1, 1)).is_err());
        assert!(trade.enter(dec!(100), ts(1, 1)).is_err());
    }
}
