use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("ledger is paused")]
    Paused,

    #[error("account {0} is frozen")]
    Frozen(String),

    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("account {0} is already active")]
    AlreadyActive(String),

    #[error("caller is not the ledger admin")]
    Unauthorized,

    #[error("amount must be non-zero")]
    InvalidAmount,

    #[error("arithmetic overflow in balance computation")]
    Overflow,
}
