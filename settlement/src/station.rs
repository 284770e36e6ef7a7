//! Station and settlement records.

use agc_types::{AccountAddress, SettlementId, StationId, Timestamp};
use serde::{Deserialize, Serialize};

/// A registered revenue-collecting service point.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    /// The operator entitled to the station's net proceeds.
    pub operator: AccountAddress,
    /// Inactive stations reject new transactions.
    pub active: bool,
    /// Lifetime gross volume recorded.
    pub volume: u128,
    /// Lifetime platform fees taken.
    pub fees_paid: u128,
    /// Net proceeds owed but not yet settled.
    pub pending: u128,
    /// Lifetime net proceeds paid out.
    pub settled: u128,
}

impl Station {
    pub fn new(id: StationId, operator: AccountAddress) -> Self {
        Self {
            id,
            operator,
            active: true,
            volume: 0,
            fees_paid: 0,
            pending: 0,
            settled: 0,
        }
    }
}

/// Lifecycle of a settlement record. Strictly forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementStatus {
    Pending,
    Approved,
    Completed,
}

impl SettlementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Completed => "completed",
        }
    }
}

/// A payout request, snapshotting the station's pending balance at request
/// time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settlement {
    pub id: SettlementId,
    pub station_id: StationId,
    /// The station's pending balance when the request was made.
    pub amount: u128,
    pub status: SettlementStatus,
    pub requested_at: Timestamp,
}

/// The split of one recorded gross transaction, returned for
/// reconciliation by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub gross: u128,
    pub fee: u128,
    pub net: u128,
}
