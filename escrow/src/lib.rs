//! Enterprise escrow for the AgriCarbon core.
//!
//! A large buyer/seller purchase runs through a held balance: the buyer
//! deposits the full amount into the engine's holding account, the seller
//! confirms shipment, the buyer confirms receipt, and the funds release to
//! the seller on dual confirmation — or on deadline timeout, or by
//! administrative decision. Either party can raise a dispute, which the
//! admin resolves three ways: refund the buyer, pay the seller, or split.
//! Funds move buyer → holding → (seller | buyer) exactly once per escrow.

pub mod engine;
pub mod error;
pub mod record;

pub use engine::EscrowEngine;
pub use error::EscrowError;
pub use record::{DisputeResolution, Escrow, EscrowStatus};
