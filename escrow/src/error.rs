use agc_ledger::LedgerError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EscrowError {
    #[error("caller is not authorized for this operation")]
    Unauthorized,

    #[error("escrow {0} not found")]
    EscrowNotFound(String),

    #[error("escrow {0} already exists")]
    EscrowExists(String),

    #[error("operation not allowed while escrow is {0}")]
    InvalidState(&'static str),

    #[error("escrow amount must be non-zero")]
    InvalidAmount,

    #[error("escrow deadline must be after creation time")]
    InvalidDeadline,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
