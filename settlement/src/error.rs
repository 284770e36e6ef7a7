use agc_ledger::LedgerError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettlementError {
    #[error("caller is not authorized for this operation")]
    Unauthorized,

    #[error("station {0} not found")]
    StationNotFound(String),

    #[error("station {0} already registered")]
    StationExists(String),

    #[error("station {0} is inactive")]
    StationInactive(String),

    #[error("settlement {0} not found")]
    SettlementNotFound(String),

    #[error("settlement {0} already exists")]
    SettlementExists(String),

    #[error("station has nothing pending to settle")]
    NothingPending,

    #[error("settlement is {actual}, expected {expected}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("gross amount must be non-zero")]
    InvalidAmount,

    #[error("fee rate {0} exceeds 10000 basis points")]
    InvalidFeeRate(u32),

    #[error("arithmetic overflow in settlement totals")]
    Overflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
