// Shared fixtures for the unit tests in this crate.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_types::{
    Action, Execution, Fill, Outcome, TradeRecord, TradeSetup, TradeStatus,
};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

pub fn record(id: &str, ticker: &str, model: &str, confidence: f64, timeframe: &str) -> TradeRecord {
    let setup = TradeSetup::new(Action::Buy, dec!(100))
        .with_target(dec!(110))
        .with_stop(dec!(95));
    TradeRecord::new(id, ticker, model, confidence, setup, at(2024, 1, 1))
        .unwrap()
        .with_timeframe(timeframe)
}

/// Marks `trade` as entered at creation and closed at `exit_at` with `pct`.
pub fn realize(mut trade: TradeRecord, pct: f64, exit_at: DateTime<Utc>) -> TradeRecord {
    let entry = Fill { price: dec!(100), at: trade.entry_date };
    let exit_price = Decimal::ONE_HUNDRED + Decimal::from_f64(pct).unwrap_or_default();
    let outcome = Outcome {
        profit_loss: Some(exit_price - entry.price),
        profit_loss_percentage: pct,
        hold_time: Some((exit_at - entry.at).num_hours() as f64),
    };
    trade.status = TradeStatus::Closed;
    trade.execution = Execution::Realized {
        entry,
        exit_at: Some(exit_at),
        exit_price: Some(exit_price),
        outcome,
    };
    trade
}

/// Closed with a recorded return but no exit date or price.
pub fn undated_trade(id: &str, pct: f64) -> TradeRecord {
    let mut trade = record(id, "AAPL", "gpt-4o", 0.8, "1h");
    let entry = Fill { price: dec!(100), at: trade.entry_date };
    trade.status = TradeStatus::UserClosed;
    trade.execution = Execution::Realized {
        entry,
        exit_at: None,
        exit_price: None,
        outcome: Outcome { profit_loss: None, profit_loss_percentage: pct, hold_time: None },
    };
    trade
}

/// An eligible trade on AAPL that exited on January `exit_day`.
pub fn closed_trade(id: &str, pct: f64, exit_day: u32) -> TradeRecord {
    realize(record(id, "AAPL", "gpt-4o", 0.8, "1h"), pct, at(2024, 1, exit_day))
}

pub fn waiting_trade(id: &str, target: Option<Decimal>, stop: Option<Decimal>) -> TradeRecord {
    let mut trade = record(id, "AAPL", "gpt-4o", 0.6, "1h");
    trade.setup.target_price = target;
    trade.setup.stop_loss = stop;
    trade
}

pub fn open_trade(id: &str) -> TradeRecord {
    let mut trade = record(id, "AAPL", "gpt-4o", 0.6, "1h");
    trade.status = TradeStatus::Open;
    trade.execution = Execution::Entered(Fill {
        price: dec!(100),
        at: trade.entry_date + Duration::hours(1),
    });
    trade
}

/// Closed by the user while still waiting: never entered.
pub fn invalidated_trade(id: &str) -> TradeRecord {
    let mut trade = record(id, "AAPL", "gpt-4o", 0.95, "1h");
    trade.status = TradeStatus::UserClosed;
    trade
}
