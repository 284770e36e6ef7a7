use agc_ledger::LedgerError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewardError {
    #[error("carbon reduction must be non-zero")]
    InvalidAmount,

    #[error("arithmetic overflow in reward computation")]
    Overflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
