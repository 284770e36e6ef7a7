//! The ledger engine — owns every account balance and the total supply.
//!
//! All mutation is behind methods that validate every precondition before
//! touching state, so a failed operation never leaves a partial effect.

use std::collections::HashMap;

use crate::account::Account;
use crate::authorization::MintAuthorization;
use crate::error::LedgerError;
use agc_types::AccountAddress;

/// The credit ledger.
///
/// `sum(balances) == total_supply` holds after every operation: mint and
/// burn move supply and a balance together, transfer moves value between
/// balances only.
#[derive(Clone, Debug)]
pub struct Ledger {
    admin: AccountAddress,
    accounts: HashMap<AccountAddress, Account>,
    total_supply: u128,
    paused: bool,
}

impl Ledger {
    /// Create an empty ledger administered by `admin`.
    ///
    /// The admin identity gates `set_paused` and `set_frozen`; it has no
    /// account until it opts in like any other participant.
    pub fn new(admin: AccountAddress) -> Self {
        Self {
            admin,
            accounts: HashMap::new(),
            total_supply: 0,
            paused: false,
        }
    }

    /// Initialize an account with zero balance.
    ///
    /// Re-opting-in is allowed only while the balance is zero; an account
    /// holding credits rejects with `AlreadyActive`.
    pub fn opt_in(&mut self, account: &AccountAddress) -> Result<(), LedgerError> {
        if let Some(existing) = self.accounts.get(account) {
            if existing.balance > 0 {
                return Err(LedgerError::AlreadyActive(account.to_string()));
            }
        }
        self.accounts.insert(account.clone(), Account::new());
        Ok(())
    }

    /// Mint `amount` raw units into `recipient`, increasing total supply.
    ///
    /// Requires a [`MintAuthorization`] capability, consumed by value.
    pub fn mint(
        &mut self,
        recipient: &AccountAddress,
        amount: u128,
        authorization: MintAuthorization,
    ) -> Result<(), LedgerError> {
        if self.paused {
            return Err(LedgerError::Paused);
        }
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let balance = self.balance(recipient)?;
        let new_balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        tracing::info!(
            recipient = %recipient,
            amount,
            authorization = %authorization,
            "minting credits"
        );
        self.set_balance(recipient, new_balance)?;
        self.total_supply = new_supply;
        Ok(())
    }

    /// Burn `amount` raw units from `holder`, decreasing total supply.
    pub fn burn(&mut self, holder: &AccountAddress, amount: u128) -> Result<(), LedgerError> {
        if self.paused {
            return Err(LedgerError::Paused);
        }
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let balance = self.balance(holder)?;
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }
        let new_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;

        tracing::info!(holder = %holder, amount, "burning credits");
        self.set_balance(holder, balance - amount)?;
        self.total_supply = new_supply;
        Ok(())
    }

    /// Move `amount` raw units from `sender` to `recipient`.
    ///
    /// Debit and credit apply together or not at all; a failed transfer
    /// leaves both balances untouched.
    pub fn transfer(
        &mut self,
        sender: &AccountAddress,
        recipient: &AccountAddress,
        amount: u128,
    ) -> Result<(), LedgerError> {
        if self.paused {
            return Err(LedgerError::Paused);
        }
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let sender_account = self
            .accounts
            .get(sender)
            .ok_or_else(|| LedgerError::AccountNotFound(sender.to_string()))?;
        if sender_account.frozen {
            return Err(LedgerError::Frozen(sender.to_string()));
        }
        if sender_account.balance < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available: sender_account.balance,
            });
        }
        let sender_new = sender_account.balance - amount;
        let recipient_new = self
            .balance(recipient)?
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        if sender == recipient {
            // Debit and credit cancel; balances are unchanged.
            return Ok(());
        }

        tracing::debug!(sender = %sender, recipient = %recipient, amount, "transfer");
        self.set_balance(sender, sender_new)?;
        self.set_balance(recipient, recipient_new)?;
        Ok(())
    }

    /// Halt or resume mint/burn/transfer. Admin only.
    pub fn set_paused(
        &mut self,
        caller: &AccountAddress,
        paused: bool,
    ) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        tracing::info!(paused, "ledger pause flag changed");
        self.paused = paused;
        Ok(())
    }

    /// Freeze or unfreeze an account's outgoing transfers. Admin only.
    pub fn set_frozen(
        &mut self,
        caller: &AccountAddress,
        account: &AccountAddress,
        frozen: bool,
    ) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        let entry = self
            .accounts
            .get_mut(account)
            .ok_or_else(|| LedgerError::AccountNotFound(account.to_string()))?;
        tracing::info!(account = %account, frozen, "account freeze flag changed");
        entry.frozen = frozen;
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn balance(&self, account: &AccountAddress) -> Result<u128, LedgerError> {
        self.accounts
            .get(account)
            .map(|a| a.balance)
            .ok_or_else(|| LedgerError::AccountNotFound(account.to_string()))
    }

    pub fn is_frozen(&self, account: &AccountAddress) -> Result<bool, LedgerError> {
        self.accounts
            .get(account)
            .map(|a| a.frozen)
            .ok_or_else(|| LedgerError::AccountNotFound(account.to_string()))
    }

    pub fn contains(&self, account: &AccountAddress) -> bool {
        self.accounts.contains_key(account)
    }

    pub fn admin(&self) -> &AccountAddress {
        &self.admin
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Sum of all account balances. Equals `total_supply` by invariant;
    /// exposed so callers and tests can check the identity directly.
    pub fn balance_sum(&self) -> u128 {
        self.accounts.values().map(|a| a.balance).sum()
    }

    /// Iterate all accounts (e.g. for snapshotting).
    pub fn accounts(&self) -> impl Iterator<Item = (&AccountAddress, &Account)> {
        self.accounts.iter()
    }

    /// Ledger summary statistics.
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            accounts: self.accounts.len() as u64,
            total_supply: self.total_supply,
            paused: self.paused,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────────

    fn require_admin(&self, caller: &AccountAddress) -> Result<(), LedgerError> {
        if caller != &self.admin {
            return Err(LedgerError::Unauthorized);
        }
        Ok(())
    }

    fn set_balance(&mut self, account: &AccountAddress, balance: u128) -> Result<(), LedgerError> {
        let entry = self
            .accounts
            .get_mut(account)
            .ok_or_else(|| LedgerError::AccountNotFound(account.to_string()))?;
        entry.balance = balance;
        Ok(())
    }

    /// Rebuild a ledger from restored parts. Used by snapshot restore.
    pub(crate) fn from_parts(
        admin: AccountAddress,
        accounts: HashMap<AccountAddress, Account>,
        total_supply: u128,
        paused: bool,
    ) -> Self {
        Self {
            admin,
            accounts,
            total_supply,
            paused,
        }
    }
}

/// Summary statistics for the ledger.
#[derive(Clone, Debug)]
pub struct LedgerSummary {
    pub accounts: u64,
    pub total_supply: u128,
    pub paused: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorization::{MintAuthorization, ModuleTag};
    use agc_types::ProposalId;

    fn addr(n: u8) -> AccountAddress {
        AccountAddress::new(format!("agc_{n:0>40}"))
    }

    fn governance_auth() -> MintAuthorization {
        MintAuthorization::governance(ProposalId::new("prop-test"))
    }

    fn ledger_with_accounts(n: u8) -> Ledger {
        let mut ledger = Ledger::new(addr(0));
        for i in 1..=n {
            ledger.opt_in(&addr(i)).unwrap();
        }
        ledger
    }

    #[test]
    fn opt_in_initializes_zero_balance() {
        let ledger = ledger_with_accounts(1);
        assert_eq!(ledger.balance(&addr(1)).unwrap(), 0);
        assert!(!ledger.is_frozen(&addr(1)).unwrap());
    }

    #[test]
    fn reopt_in_with_balance_rejected() {
        let mut ledger = ledger_with_accounts(1);
        ledger.mint(&addr(1), 100, governance_auth()).unwrap();
        let result = ledger.opt_in(&addr(1));
        assert_eq!(result, Err(LedgerError::AlreadyActive(addr(1).to_string())));
        // A zero-balance account may re-opt-in.
        let mut fresh = ledger_with_accounts(1);
        assert!(fresh.opt_in(&addr(1)).is_ok());
    }

    #[test]
    fn mint_increases_balance_and_supply() {
        let mut ledger = ledger_with_accounts(1);
        ledger.mint(&addr(1), 500, governance_auth()).unwrap();
        assert_eq!(ledger.balance(&addr(1)).unwrap(), 500);
        assert_eq!(ledger.total_supply(), 500);
        assert_eq!(ledger.balance_sum(), ledger.total_supply());
    }

    #[test]
    fn mint_to_unknown_account_rejected() {
        let mut ledger = ledger_with_accounts(0);
        let result = ledger.mint(&addr(9), 500, governance_auth());
        assert_eq!(result, Err(LedgerError::AccountNotFound(addr(9).to_string())));
        assert_eq!(ledger.total_supply(), 0);
    }

    #[test]
    fn module_authorization_also_mints() {
        let mut ledger = ledger_with_accounts(1);
        ledger
            .mint(&addr(1), 10, MintAuthorization::module(ModuleTag::Rewards))
            .unwrap();
        assert_eq!(ledger.balance(&addr(1)).unwrap(), 10);
    }

    #[test]
    fn burn_decreases_balance_and_supply() {
        let mut ledger = ledger_with_accounts(1);
        ledger.mint(&addr(1), 500, governance_auth()).unwrap();
        ledger.burn(&addr(1), 200).unwrap();
        assert_eq!(ledger.balance(&addr(1)).unwrap(), 300);
        assert_eq!(ledger.total_supply(), 300);
    }

    #[test]
    fn burn_beyond_balance_fails_without_mutation() {
        let mut ledger = ledger_with_accounts(1);
        ledger.mint(&addr(1), 100, governance_auth()).unwrap();
        let result = ledger.burn(&addr(1), 101);
        assert_eq!(
            result,
            Err(LedgerError::InsufficientBalance {
                needed: 101,
                available: 100
            })
        );
        assert_eq!(ledger.balance(&addr(1)).unwrap(), 100);
        assert_eq!(ledger.total_supply(), 100);
    }

    #[test]
    fn transfer_moves_value_atomically() {
        let mut ledger = ledger_with_accounts(2);
        ledger.mint(&addr(1), 100_000, governance_auth()).unwrap();
        ledger.transfer(&addr(1), &addr(2), 40_000).unwrap();
        assert_eq!(ledger.balance(&addr(1)).unwrap(), 60_000);
        assert_eq!(ledger.balance(&addr(2)).unwrap(), 40_000);
        assert_eq!(ledger.total_supply(), 100_000);
    }

    #[test]
    fn transfer_beyond_balance_fails_without_mutation() {
        let mut ledger = ledger_with_accounts(2);
        ledger.mint(&addr(1), 50, governance_auth()).unwrap();
        let result = ledger.transfer(&addr(1), &addr(2), 51);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));
        assert_eq!(ledger.balance(&addr(1)).unwrap(), 50);
        assert_eq!(ledger.balance(&addr(2)).unwrap(), 0);
    }

    #[test]
    fn frozen_sender_cannot_transfer() {
        let mut ledger = ledger_with_accounts(2);
        ledger.mint(&addr(1), 100, governance_auth()).unwrap();
        ledger.set_frozen(&addr(0), &addr(1), true).unwrap();
        let result = ledger.transfer(&addr(1), &addr(2), 10);
        assert_eq!(result, Err(LedgerError::Frozen(addr(1).to_string())));
        // Frozen accounts may still receive.
        ledger.mint(&addr(2), 10, governance_auth()).unwrap();
        ledger.transfer(&addr(2), &addr(1), 10).unwrap();
        assert_eq!(ledger.balance(&addr(1)).unwrap(), 110);
    }

    #[test]
    fn paused_halts_mint_burn_transfer() {
        let mut ledger = ledger_with_accounts(2);
        ledger.mint(&addr(1), 100, governance_auth()).unwrap();
        ledger.set_paused(&addr(0), true).unwrap();

        assert_eq!(
            ledger.mint(&addr(1), 1, governance_auth()),
            Err(LedgerError::Paused)
        );
        assert_eq!(ledger.burn(&addr(1), 1), Err(LedgerError::Paused));
        assert_eq!(
            ledger.transfer(&addr(1), &addr(2), 1),
            Err(LedgerError::Paused)
        );

        ledger.set_paused(&addr(0), false).unwrap();
        ledger.transfer(&addr(1), &addr(2), 1).unwrap();
    }

    #[test]
    fn admin_checks_are_hard_rejections() {
        let mut ledger = ledger_with_accounts(1);
        assert_eq!(
            ledger.set_paused(&addr(1), true),
            Err(LedgerError::Unauthorized)
        );
        assert_eq!(
            ledger.set_frozen(&addr(1), &addr(1), true),
            Err(LedgerError::Unauthorized)
        );
        assert!(!ledger.is_paused());
    }

    #[test]
    fn self_transfer_leaves_balance_unchanged() {
        let mut ledger = ledger_with_accounts(1);
        ledger.mint(&addr(1), 100, governance_auth()).unwrap();
        ledger.transfer(&addr(1), &addr(1), 40).unwrap();
        assert_eq!(ledger.balance(&addr(1)).unwrap(), 100);
        assert_eq!(ledger.total_supply(), 100);
    }

    #[test]
    fn zero_amounts_rejected() {
        let mut ledger = ledger_with_accounts(2);
        assert_eq!(
            ledger.mint(&addr(1), 0, governance_auth()),
            Err(LedgerError::InvalidAmount)
        );
        assert_eq!(ledger.burn(&addr(1), 0), Err(LedgerError::InvalidAmount));
        assert_eq!(
            ledger.transfer(&addr(1), &addr(2), 0),
            Err(LedgerError::InvalidAmount)
        );
    }
}
