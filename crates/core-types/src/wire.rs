// In crates/core-types/src/wire.rs

//! The flat, optional-heavy shape in which the trade ledger stores and
//! transmits recommendations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::status::TradeStatus;
use crate::trade::{
    hours_between, validate_confidence, validate_price, Action, ConfidenceLevel, Execution, Fill,
    Outcome, Sentiment, TradeRecord, TradeSetup,
};

/// A trade record as it appears on the wire (camelCase JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrade {
    pub id: String,
    #[serde(default)]
    pub analysis_id: String,
    pub ticker: String,
    #[serde(default)]
    pub timeframe: String,
    pub ai_model: String,
    pub confidence: f64,
    /// Derived from `confidence`; ignored on input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<ConfidenceLevel>,
    #[serde(default)]
    pub sentiment: Sentiment,
    pub action: Action,
    pub entry_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<Decimal>,
    #[serde(default)]
    pub reasoning: String,
    pub status: TradeStatus,
    pub entry_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_entry_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_entry_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_loss: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_loss_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_time: Option<f64>,
}

impl TryFrom<RawTrade> for TradeRecord {
    type Error = Error;

    /// Builds the typed record. Performance fields of a trade that was never
    /// entered are discarded here, so they can never reach the analytics.
    fn try_from(raw: RawTrade) -> Result<Self> {
        if raw.id.trim().is_empty() {
            return Err(Error::MissingField("id"));
        }
        if raw.ticker.trim().is_empty() {
            return Err(Error::MissingField("ticker"));
        }
        validate_confidence(raw.confidence)?;
        validate_price("entryPrice", raw.entry_price)?;

        let execution = execution_from_raw(&raw)?;
        let setup = TradeSetup {
            action: raw.action,
            entry_price: raw.entry_price,
            target_price: raw.target_price,
            stop_loss: raw.stop_loss,
            reasoning: raw.reasoning,
        };

        Ok(TradeRecord {
            id: raw.id,
            analysis_id: raw.analysis_id,
            ticker: raw.ticker.trim().to_uppercase(),
            timeframe: raw.timeframe,
            ai_model: raw.ai_model,
            confidence: raw.confidence,
            sentiment: raw.sentiment,
            setup,
            status: raw.status,
            entry_date: raw.entry_date,
            execution,
        })
    }
}

fn execution_from_raw(raw: &RawTrade) -> Result<Execution> {
    let Some(entered_at) = raw.actual_entry_date else {
        return Ok(Execution::Pending);
    };
    let entry_price = raw.actual_entry_price.unwrap_or(raw.entry_price);
    validate_price("actualEntryPrice", entry_price)?;
    let entry = Fill { price: entry_price, at: entered_at };

    let Some(pct) = raw.profit_loss_percentage.filter(|pct| pct.is_finite()) else {
        return Ok(Execution::Entered(entry));
    };
    if !raw.status.is_closed() {
        return Ok(Execution::Entered(entry));
    }
    if let Some(exit_price) = raw.exit_price {
        validate_price("exitPrice", exit_price)?;
    }

    let outcome = Outcome {
        profit_loss: raw.profit_loss.or_else(|| {
            raw.exit_price
                .map(|exit_price| (exit_price - entry_price) * raw.action.direction())
        }),
        profit_loss_percentage: pct,
        hold_time: raw
            .hold_time
            .or_else(|| raw.exit_date.map(|exit_at| hours_between(entered_at, exit_at))),
    };

    Ok(Execution::Realized {
        entry,
        exit_at: raw.exit_date,
        exit_price: raw.exit_price,
        outcome,
    })
}

impl From<TradeRecord> for RawTrade {
    fn from(trade: TradeRecord) -> Self {
        let confidence_level = Some(trade.confidence_level());
        let entry = trade.execution.entry().copied();
        let exit_date = trade.execution.exit_date();
        let exit_price = trade.execution.exit_price();
        let outcome = trade.execution.outcome().copied();

        RawTrade {
            id: trade.id,
            analysis_id: trade.analysis_id,
            ticker: trade.ticker,
            timeframe: trade.timeframe,
            ai_model: trade.ai_model,
            confidence: trade.confidence,
            confidence_level,
            sentiment: trade.sentiment,
            action: trade.setup.action,
            entry_price: trade.setup.entry_price,
            target_price: trade.setup.target_price,
            stop_loss: trade.setup.stop_loss,
            reasoning: trade.setup.reasoning,
            status: trade.status,
            entry_date: trade.entry_date,
            actual_entry_date: entry.map(|fill| fill.at),
            actual_entry_price: entry.map(|fill| fill.price),
            exit_date,
            exit_price,
            profit_loss: outcome.and_then(|o| o.profit_loss),
            profit_loss_percentage: outcome.map(|o| o.profit_loss_percentage),
            hold_time: outcome.and_then(|o| o.hold_time),
        }
    }
}
