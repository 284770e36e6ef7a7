//! Credit ledger for the AgriCarbon core.
//!
//! The ledger is the single mutable source of truth for balances: it owns
//! every account, the total supply, and the pause/freeze administrative
//! holds. Every other component routes balance changes through the mint,
//! burn, and transfer operations here — none of them touches a balance
//! directly.
//!
//! Minting requires a [`MintAuthorization`] capability: either the outcome
//! of an executed governance proposal, or the provenance mark of one of the
//! trusted engines (rewards, settlement, escrow) moving value it accounts
//! for.

pub mod account;
pub mod authorization;
pub mod error;
pub mod ledger;
pub mod snapshot;

pub use account::Account;
pub use authorization::{MintAuthorization, MintProvenance, ModuleTag};
pub use error::LedgerError;
pub use ledger::{Ledger, LedgerSummary};
pub use snapshot::{AccountSnapshot, LedgerSnapshot};
