//! Core escrow engine — deposit, confirmation, release, dispute, cancel.

use std::collections::HashMap;

use crate::error::EscrowError;
use crate::record::{DisputeResolution, Escrow, EscrowStatus};
use agc_ledger::Ledger;
use agc_types::{AccountAddress, EscrowId, Timestamp};

/// The escrow engine.
///
/// Deposited funds live in the engine's holding account on the ledger; the
/// engine itself owns only the escrow records. Every movement in or out of
/// holding is a ledger transfer, so conservation is the ledger's invariant,
/// not this engine's bookkeeping.
pub struct EscrowEngine {
    admin: AccountAddress,
    /// The ledger account that holds all deposited escrow funds.
    holding: AccountAddress,
    escrows: HashMap<EscrowId, Escrow>,
}

impl EscrowEngine {
    /// Create an engine. The holding account must be opted in on the ledger
    /// before the first deposit.
    pub fn new(admin: AccountAddress, holding: AccountAddress) -> Self {
        Self {
            admin,
            holding,
            escrows: HashMap::new(),
        }
    }

    /// Open an escrow between a buyer and a seller.
    pub fn create_escrow(
        &mut self,
        id: EscrowId,
        buyer: AccountAddress,
        seller: AccountAddress,
        amount: u128,
        deadline: Timestamp,
        now: Timestamp,
    ) -> Result<(), EscrowError> {
        if self.escrows.contains_key(&id) {
            return Err(EscrowError::EscrowExists(id.to_string()));
        }
        if amount == 0 {
            return Err(EscrowError::InvalidAmount);
        }
        if deadline <= now {
            return Err(EscrowError::InvalidDeadline);
        }
        tracing::info!(escrow = %id, buyer = %buyer, seller = %seller, amount, "escrow created");
        self.escrows
            .insert(id.clone(), Escrow::new(id, buyer, seller, amount, deadline));
        Ok(())
    }

    /// Deposit the full purchase amount into holding. Buyer only.
    pub fn deposit_funds(
        &mut self,
        id: &EscrowId,
        caller: &AccountAddress,
        ledger: &mut Ledger,
    ) -> Result<(), EscrowError> {
        let escrow = self.get(id)?;
        if caller != &escrow.buyer {
            return Err(EscrowError::Unauthorized);
        }
        if escrow.status != EscrowStatus::Created {
            return Err(EscrowError::InvalidState(escrow.status.as_str()));
        }
        let buyer = escrow.buyer.clone();
        let amount = escrow.amount;

        ledger.transfer(&buyer, &self.holding, amount)?;

        if let Some(escrow) = self.escrows.get_mut(id) {
            escrow.deposit_amount = amount;
            escrow.status = EscrowStatus::Funded;
        }
        tracing::info!(escrow = %id, amount, "escrow funded");
        Ok(())
    }

    /// Record the seller's shipment confirmation. Seller only.
    pub fn confirm_shipment(
        &mut self,
        id: &EscrowId,
        caller: &AccountAddress,
    ) -> Result<(), EscrowError> {
        let escrow = self.get_mut(id)?;
        if caller != &escrow.seller {
            return Err(EscrowError::Unauthorized);
        }
        if escrow.status != EscrowStatus::Funded {
            return Err(EscrowError::InvalidState(escrow.status.as_str()));
        }
        escrow.seller_confirmed = true;
        escrow.status = EscrowStatus::Shipped;
        tracing::debug!(escrow = %id, "shipment confirmed");
        Ok(())
    }

    /// Record the buyer's receipt confirmation. Buyer only. Does not change
    /// the status by itself — release is a separate step.
    pub fn confirm_receipt(
        &mut self,
        id: &EscrowId,
        caller: &AccountAddress,
    ) -> Result<(), EscrowError> {
        let escrow = self.get_mut(id)?;
        if caller != &escrow.buyer {
            return Err(EscrowError::Unauthorized);
        }
        if escrow.status != EscrowStatus::Shipped {
            return Err(EscrowError::InvalidState(escrow.status.as_str()));
        }
        escrow.buyer_confirmed = true;
        tracing::debug!(escrow = %id, "receipt confirmed");
        Ok(())
    }

    /// Release the deposit to the seller.
    ///
    /// Permitted on dual confirmation, to the admin, or to anyone once the
    /// deadline has passed. Succeeds at most once per escrow.
    pub fn release_funds(
        &mut self,
        id: &EscrowId,
        caller: &AccountAddress,
        now: Timestamp,
        ledger: &mut Ledger,
    ) -> Result<(), EscrowError> {
        let escrow = self.get(id)?;
        if escrow.status.is_terminal() {
            return Err(EscrowError::InvalidState(escrow.status.as_str()));
        }
        if escrow.deposit_amount == 0 {
            return Err(EscrowError::InvalidState(escrow.status.as_str()));
        }
        let dual_confirmed = escrow.buyer_confirmed && escrow.seller_confirmed;
        let past_deadline = now > escrow.deadline;
        if !dual_confirmed && caller != &self.admin && !past_deadline {
            return Err(EscrowError::Unauthorized);
        }
        let seller = escrow.seller.clone();
        let amount = escrow.deposit_amount;

        ledger.transfer(&self.holding, &seller, amount)?;

        if let Some(escrow) = self.escrows.get_mut(id) {
            escrow.status = EscrowStatus::Completed;
        }
        tracing::info!(escrow = %id, seller = %seller, amount, "escrow released");
        Ok(())
    }

    /// Raise a dispute. Buyer or seller only; any non-terminal state.
    pub fn raise_dispute(
        &mut self,
        id: &EscrowId,
        reason: impl Into<String>,
        caller: &AccountAddress,
    ) -> Result<(), EscrowError> {
        let escrow = self.get_mut(id)?;
        if caller != &escrow.buyer && caller != &escrow.seller {
            return Err(EscrowError::Unauthorized);
        }
        if escrow.status.is_terminal() {
            return Err(EscrowError::InvalidState(escrow.status.as_str()));
        }
        escrow.status = EscrowStatus::Disputed;
        escrow.dispute_reason = Some(reason.into());
        tracing::info!(escrow = %id, raised_by = %caller, "dispute raised");
        Ok(())
    }

    /// Settle a disputed escrow. Admin only.
    ///
    /// `Split` pays `deposit / 2` (floored) to the seller and the remainder
    /// to the buyer, so the full deposit is always accounted for.
    pub fn resolve_dispute(
        &mut self,
        id: &EscrowId,
        resolution: DisputeResolution,
        caller: &AccountAddress,
        ledger: &mut Ledger,
    ) -> Result<(), EscrowError> {
        if caller != &self.admin {
            return Err(EscrowError::Unauthorized);
        }
        let escrow = self.get(id)?;
        if escrow.status != EscrowStatus::Disputed {
            return Err(EscrowError::InvalidState(escrow.status.as_str()));
        }
        let buyer = escrow.buyer.clone();
        let seller = escrow.seller.clone();
        let deposit = escrow.deposit_amount;

        // A dispute raised before funding settles without moving funds.
        if deposit > 0 {
            match resolution {
                DisputeResolution::RefundBuyer => {
                    ledger.transfer(&self.holding, &buyer, deposit)?;
                }
                DisputeResolution::PaySeller => {
                    ledger.transfer(&self.holding, &seller, deposit)?;
                }
                DisputeResolution::Split => {
                    let seller_share = deposit / 2;
                    let buyer_share = deposit - seller_share;
                    // Seller leg first. The buyer leg cannot fail once the
                    // seller leg clears: same sender, covered balance,
                    // opted-in recipient.
                    if seller_share > 0 {
                        ledger.transfer(&self.holding, &seller, seller_share)?;
                    }
                    ledger.transfer(&self.holding, &buyer, buyer_share)?;
                }
            }
        }

        if let Some(escrow) = self.escrows.get_mut(id) {
            escrow.status = EscrowStatus::Completed;
        }
        tracing::info!(escrow = %id, ?resolution, deposit, "dispute resolved");
        Ok(())
    }

    /// Cancel an escrow, refunding any deposit to the buyer.
    ///
    /// The admin may cancel any non-terminal escrow; the parties may cancel
    /// jointly once both confirmation flags are set (the mutual-cancel
    /// signal).
    pub fn cancel_escrow(
        &mut self,
        id: &EscrowId,
        caller: &AccountAddress,
        ledger: &mut Ledger,
    ) -> Result<(), EscrowError> {
        let escrow = self.get(id)?;
        if escrow.status.is_terminal() {
            return Err(EscrowError::InvalidState(escrow.status.as_str()));
        }
        let is_party = caller == &escrow.buyer || caller == &escrow.seller;
        let mutual = escrow.buyer_confirmed && escrow.seller_confirmed;
        if caller != &self.admin && !(is_party && mutual) {
            return Err(EscrowError::Unauthorized);
        }
        let buyer = escrow.buyer.clone();
        let deposit = escrow.deposit_amount;

        if deposit > 0 {
            ledger.transfer(&self.holding, &buyer, deposit)?;
        }

        if let Some(escrow) = self.escrows.get_mut(id) {
            escrow.status = EscrowStatus::Cancelled;
        }
        tracing::info!(escrow = %id, refunded = deposit, "escrow cancelled");
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn escrow(&self, id: &EscrowId) -> Option<&Escrow> {
        self.escrows.get(id)
    }

    pub fn holding(&self) -> &AccountAddress {
        &self.holding
    }

    pub fn escrow_count(&self) -> usize {
        self.escrows.len()
    }

    // ── Internal ─────────────────────────────────────────────────────────

    fn get(&self, id: &EscrowId) -> Result<&Escrow, EscrowError> {
        self.escrows
            .get(id)
            .ok_or_else(|| EscrowError::EscrowNotFound(id.to_string()))
    }

    fn get_mut(&mut self, id: &EscrowId) -> Result<&mut Escrow, EscrowError> {
        self.escrows
            .get_mut(id)
            .ok_or_else(|| EscrowError::EscrowNotFound(id.to_string()))
    }
}
