//! Escrow records and lifecycle states.

use agc_types::{AccountAddress, EscrowId, Timestamp};
use serde::{Deserialize, Serialize};

/// Lifecycle of an escrow.
///
/// Forward path: created → funded → shipped → completed. Disputed and
/// cancelled are reachable from any non-terminal state; completed and
/// cancelled are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscrowStatus {
    Created,
    Funded,
    Shipped,
    Completed,
    Disputed,
    Cancelled,
}

impl EscrowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Funded => "funded",
            Self::Shipped => "shipped",
            Self::Completed => "completed",
            Self::Disputed => "disputed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// How the admin settles a disputed escrow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisputeResolution {
    /// Return the full deposit to the buyer.
    RefundBuyer,
    /// Pay the full deposit to the seller.
    PaySeller,
    /// Half (floored) to the seller, the remainder back to the buyer.
    Split,
}

/// A single escrowed purchase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Escrow {
    pub id: EscrowId,
    pub buyer: AccountAddress,
    pub seller: AccountAddress,
    /// The purchase price, in raw credit units.
    pub amount: u128,
    /// 0 until funded, then equal to `amount`.
    pub deposit_amount: u128,
    pub status: EscrowStatus,
    pub buyer_confirmed: bool,
    pub seller_confirmed: bool,
    /// After this time the funds may be released without dual confirmation.
    pub deadline: Timestamp,
    pub dispute_reason: Option<String>,
}

impl Escrow {
    pub fn new(
        id: EscrowId,
        buyer: AccountAddress,
        seller: AccountAddress,
        amount: u128,
        deadline: Timestamp,
    ) -> Self {
        Self {
            id,
            buyer,
            seller,
            amount,
            deposit_amount: 0,
            status: EscrowStatus::Created,
            buyer_confirmed: false,
            seller_confirmed: false,
            deadline,
            dispute_reason: None,
        }
    }
}
