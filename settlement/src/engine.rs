//! Core settlement engine — station registry, fee split, payout lifecycle.

use std::collections::HashMap;

use crate::error::SettlementError;
use crate::station::{FeeBreakdown, Settlement, SettlementStatus, Station};
use agc_ledger::{Ledger, MintAuthorization, ModuleTag};
use agc_types::{AccountAddress, ProtocolParams, SettlementId, StationId, Timestamp};

/// Basis-point denominator for the fee rate.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// The settlement engine.
///
/// Owns station and settlement records plus the fee rate; operator payouts
/// reach the ledger as module-authorized mints at withdraw time.
pub struct SettlementEngine {
    admin: AccountAddress,
    fee_rate_bps: u32,
    stations: HashMap<StationId, Station>,
    settlements: HashMap<SettlementId, Settlement>,
    /// Lifetime gross volume across all stations.
    total_volume: u128,
    /// Lifetime platform fees across all stations.
    total_fees: u128,
}

impl SettlementEngine {
    pub fn new(admin: AccountAddress, fee_rate_bps: u32) -> Self {
        Self {
            admin,
            fee_rate_bps,
            stations: HashMap::new(),
            settlements: HashMap::new(),
            total_volume: 0,
            total_fees: 0,
        }
    }

    /// Engine configured from protocol parameters.
    pub fn from_params(admin: AccountAddress, params: &ProtocolParams) -> Self {
        Self::new(admin, params.settlement_fee_bps)
    }

    /// Register a new station. Admin only.
    pub fn register_station(
        &mut self,
        caller: &AccountAddress,
        id: StationId,
        operator: AccountAddress,
    ) -> Result<(), SettlementError> {
        self.require_admin(caller)?;
        if self.stations.contains_key(&id) {
            return Err(SettlementError::StationExists(id.to_string()));
        }
        tracing::info!(station = %id, operator = %operator, "station registered");
        self.stations
            .insert(id.clone(), Station::new(id, operator));
        Ok(())
    }

    /// Record one gross revenue transaction at a station.
    ///
    /// `fee = floor(gross × fee_bps / 10000)`; the remainder is net owed to
    /// the operator. The fee is truncated, never rounded up.
    pub fn record_transaction(
        &mut self,
        station_id: &StationId,
        gross: u128,
    ) -> Result<FeeBreakdown, SettlementError> {
        if gross == 0 {
            return Err(SettlementError::InvalidAmount);
        }
        let station = self
            .stations
            .get(station_id)
            .ok_or_else(|| SettlementError::StationNotFound(station_id.to_string()))?;
        if !station.active {
            return Err(SettlementError::StationInactive(station_id.to_string()));
        }

        let fee = gross
            .checked_mul(self.fee_rate_bps as u128)
            .ok_or(SettlementError::Overflow)?
            / BPS_DENOMINATOR;
        let net = gross - fee;

        let new_volume = station.volume.checked_add(gross).ok_or(SettlementError::Overflow)?;
        let new_fees = station.fees_paid.checked_add(fee).ok_or(SettlementError::Overflow)?;
        let new_pending = station.pending.checked_add(net).ok_or(SettlementError::Overflow)?;
        let new_total_volume = self
            .total_volume
            .checked_add(gross)
            .ok_or(SettlementError::Overflow)?;
        let new_total_fees = self
            .total_fees
            .checked_add(fee)
            .ok_or(SettlementError::Overflow)?;

        if let Some(station) = self.stations.get_mut(station_id) {
            station.volume = new_volume;
            station.fees_paid = new_fees;
            station.pending = new_pending;
        }
        self.total_volume = new_total_volume;
        self.total_fees = new_total_fees;

        tracing::debug!(station = %station_id, gross, fee, net, "transaction recorded");
        Ok(FeeBreakdown { gross, fee, net })
    }

    /// Request a payout of the station's current pending balance.
    ///
    /// Operator only. The settlement snapshots the pending amount at
    /// request time; a station can have at most one settlement in flight,
    /// so the snapshot stays covered by the pending balance.
    pub fn request_settlement(
        &mut self,
        caller: &AccountAddress,
        station_id: &StationId,
        settlement_id: SettlementId,
        now: Timestamp,
    ) -> Result<(), SettlementError> {
        let station = self
            .stations
            .get(station_id)
            .ok_or_else(|| SettlementError::StationNotFound(station_id.to_string()))?;
        if caller != &station.operator {
            return Err(SettlementError::Unauthorized);
        }
        if station.pending == 0 {
            return Err(SettlementError::NothingPending);
        }
        if self.settlements.contains_key(&settlement_id) {
            return Err(SettlementError::SettlementExists(settlement_id.to_string()));
        }
        if let Some(open) = self
            .settlements
            .values()
            .find(|s| &s.station_id == station_id && s.status != SettlementStatus::Completed)
        {
            return Err(SettlementError::InvalidState {
                expected: "completed",
                actual: open.status.as_str(),
            });
        }

        tracing::info!(
            station = %station_id,
            settlement = %settlement_id,
            amount = station.pending,
            "settlement requested"
        );
        self.settlements.insert(
            settlement_id.clone(),
            Settlement {
                id: settlement_id,
                station_id: station_id.clone(),
                amount: station.pending,
                status: SettlementStatus::Pending,
                requested_at: now,
            },
        );
        Ok(())
    }

    /// Approve a pending settlement. Admin only.
    pub fn approve_settlement(
        &mut self,
        caller: &AccountAddress,
        settlement_id: &SettlementId,
    ) -> Result<(), SettlementError> {
        self.require_admin(caller)?;
        let settlement = self
            .settlements
            .get_mut(settlement_id)
            .ok_or_else(|| SettlementError::SettlementNotFound(settlement_id.to_string()))?;
        if settlement.status != SettlementStatus::Pending {
            return Err(SettlementError::InvalidState {
                expected: SettlementStatus::Pending.as_str(),
                actual: settlement.status.as_str(),
            });
        }
        settlement.status = SettlementStatus::Approved;
        tracing::info!(settlement = %settlement_id, "settlement approved");
        Ok(())
    }

    /// Withdraw an approved settlement, paying the operator on the ledger.
    ///
    /// Operator only. Completes the settlement, moves the amount from the
    /// station's pending to its settled total, and mints the net amount
    /// into the operator's balance.
    pub fn withdraw(
        &mut self,
        caller: &AccountAddress,
        settlement_id: &SettlementId,
        ledger: &mut Ledger,
    ) -> Result<u128, SettlementError> {
        let settlement = self
            .settlements
            .get(settlement_id)
            .ok_or_else(|| SettlementError::SettlementNotFound(settlement_id.to_string()))?;
        if settlement.status != SettlementStatus::Approved {
            return Err(SettlementError::InvalidState {
                expected: SettlementStatus::Approved.as_str(),
                actual: settlement.status.as_str(),
            });
        }
        let station_id = settlement.station_id.clone();
        let amount = settlement.amount;

        let station = self
            .stations
            .get(&station_id)
            .ok_or_else(|| SettlementError::StationNotFound(station_id.to_string()))?;
        if caller != &station.operator {
            return Err(SettlementError::Unauthorized);
        }
        let operator = station.operator.clone();
        let new_pending = station
            .pending
            .checked_sub(amount)
            .ok_or(SettlementError::Overflow)?;
        let new_settled = station
            .settled
            .checked_add(amount)
            .ok_or(SettlementError::Overflow)?;

        // Pay first: a ledger rejection must leave the settlement approved
        // and the station totals untouched.
        ledger.mint(
            &operator,
            amount,
            MintAuthorization::module(ModuleTag::Settlement),
        )?;

        if let Some(settlement) = self.settlements.get_mut(settlement_id) {
            settlement.status = SettlementStatus::Completed;
        }
        if let Some(station) = self.stations.get_mut(&station_id) {
            station.pending = new_pending;
            station.settled = new_settled;
        }
        tracing::info!(
            settlement = %settlement_id,
            station = %station_id,
            operator = %operator,
            amount,
            "settlement completed"
        );
        Ok(amount)
    }

    /// Change the platform fee rate. Admin only.
    pub fn set_fee_rate_bps(
        &mut self,
        caller: &AccountAddress,
        bps: u32,
    ) -> Result<(), SettlementError> {
        self.require_admin(caller)?;
        if bps as u128 > BPS_DENOMINATOR {
            return Err(SettlementError::InvalidFeeRate(bps));
        }
        self.fee_rate_bps = bps;
        Ok(())
    }

    /// Stop a station from recording new transactions. Admin only.
    pub fn deactivate_station(
        &mut self,
        caller: &AccountAddress,
        station_id: &StationId,
    ) -> Result<(), SettlementError> {
        self.require_admin(caller)?;
        self.set_station_active(station_id, false)
    }

    /// Re-enable a deactivated station. Admin only.
    pub fn reactivate_station(
        &mut self,
        caller: &AccountAddress,
        station_id: &StationId,
    ) -> Result<(), SettlementError> {
        self.require_admin(caller)?;
        self.set_station_active(station_id, true)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn station(&self, id: &StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    pub fn settlement(&self, id: &SettlementId) -> Option<&Settlement> {
        self.settlements.get(id)
    }

    pub fn fee_rate_bps(&self) -> u32 {
        self.fee_rate_bps
    }

    pub fn total_volume(&self) -> u128 {
        self.total_volume
    }

    pub fn total_fees(&self) -> u128 {
        self.total_fees
    }

    // ── Internal ─────────────────────────────────────────────────────────

    fn require_admin(&self, caller: &AccountAddress) -> Result<(), SettlementError> {
        if caller != &self.admin {
            return Err(SettlementError::Unauthorized);
        }
        Ok(())
    }

    fn set_station_active(
        &mut self,
        station_id: &StationId,
        active: bool,
    ) -> Result<(), SettlementError> {
        let station = self
            .stations
            .get_mut(station_id)
            .ok_or_else(|| SettlementError::StationNotFound(station_id.to_string()))?;
        tracing::info!(station = %station_id, active, "station active flag changed");
        station.active = active;
        Ok(())
    }
}
