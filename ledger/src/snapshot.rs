//! Ledger snapshots — capture the state of all accounts at a point in time.
//!
//! The surrounding substrate persists core state across restarts; a snapshot
//! is the unit it stores. The snapshot hash is computed deterministically
//! from the account state (accounts sorted by address) so a restored copy
//! can be verified against tampering or truncation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::account::Account;
use crate::ledger::Ledger;
use agc_types::{AccountAddress, Timestamp};

/// A ledger snapshot — all accounts plus supply and pause state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Blake2b-256 over the serialized account state.
    pub hash: [u8; 32],
    /// Admin identity at snapshot time.
    pub admin: AccountAddress,
    /// Total supply at snapshot time.
    pub total_supply: u128,
    /// Pause flag at snapshot time.
    pub paused: bool,
    /// When the snapshot was taken (substrate-provided).
    pub created_at: Timestamp,
    /// Account entries, sorted by address.
    pub accounts: Vec<AccountSnapshot>,
    /// Snapshot version for compatibility.
    pub version: u32,
}

/// The state of a single account captured in a snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub address: AccountAddress,
    pub balance: u128,
    pub frozen: bool,
}

impl LedgerSnapshot {
    /// Capture the current ledger state.
    pub fn capture(ledger: &Ledger, now: Timestamp) -> Self {
        let mut accounts: Vec<AccountSnapshot> = ledger
            .accounts()
            .map(|(address, account)| AccountSnapshot {
                address: address.clone(),
                balance: account.balance,
                frozen: account.frozen,
            })
            .collect();
        // HashMap iteration order is arbitrary; the hash requires a stable order.
        accounts.sort_by(|a, b| a.address.cmp(&b.address));

        let mut snap = Self {
            hash: [0u8; 32],
            admin: ledger.admin().clone(),
            total_supply: ledger.total_supply(),
            paused: ledger.is_paused(),
            created_at: now,
            accounts,
            version: 1,
        };
        snap.hash = snap.compute_hash();
        snap
    }

    /// Compute the Blake2b-256 hash of this snapshot deterministically.
    fn compute_hash(&self) -> [u8; 32] {
        use blake2::digest::consts::U32;
        use blake2::{Blake2b, Digest};

        let mut hasher = Blake2b::<U32>::new();
        hasher.update(self.admin.as_str().as_bytes());
        hasher.update(self.total_supply.to_le_bytes());
        hasher.update([self.paused as u8]);
        for account in &self.accounts {
            hasher.update(account.address.as_str().as_bytes());
            hasher.update(account.balance.to_le_bytes());
            hasher.update([account.frozen as u8]);
        }

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }

    /// Verify the snapshot hash matches the account data.
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Rebuild a ledger from this snapshot.
    pub fn restore(&self) -> Ledger {
        let accounts: HashMap<AccountAddress, Account> = self
            .accounts
            .iter()
            .map(|entry| {
                (
                    entry.address.clone(),
                    Account {
                        balance: entry.balance,
                        frozen: entry.frozen,
                    },
                )
            })
            .collect();
        Ledger::from_parts(
            self.admin.clone(),
            accounts,
            self.total_supply,
            self.paused,
        )
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).expect("snapshot serialization should not fail")
    }

    /// Deserialize a snapshot from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        bincode::deserialize(bytes).map_err(|e| e.to_string())
    }

    /// Number of accounts in this snapshot.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}
