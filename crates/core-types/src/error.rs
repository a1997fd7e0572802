// In crates/core-types/src/error.rs

use rust_decimal::Decimal;
use thiserror::Error;

use crate::status::TradeStatus;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Illegal status transition from '{from}' to '{to}'")]
    InvalidTransition { from: TradeStatus, to: TradeStatus },

    #[error("Confidence must be a finite value in [0, 1], got {0}")]
    InvalidConfidence(f64),

    #[error("Invalid price for '{field}': {value}")]
    InvalidPrice { field: &'static str, value: Decimal },

    #[error("Exit at {exit} precedes entry at {entry}")]
    ExitBeforeEntry {
        entry: chrono::DateTime<chrono::Utc>,
        exit: chrono::DateTime<chrono::Utc>,
    },

    #[error("Required field '{0}' is missing or empty")]
    MissingField(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
