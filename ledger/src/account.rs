//! Per-participant account record.

use serde::{Deserialize, Serialize};

/// A single participant's ledger entry.
///
/// Created on first opt-in. The balance is raw credit units and can never
/// go negative — every debit is a checked subtraction validated before any
/// state is touched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Current balance in raw credit units.
    pub balance: u128,
    /// Frozen accounts cannot send transfers.
    pub frozen: bool,
}

impl Account {
    /// A fresh account: zero balance, not frozen.
    pub fn new() -> Self {
        Self::default()
    }
}
