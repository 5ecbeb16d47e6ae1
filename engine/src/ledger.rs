//! Cookie ledger operations over one account key.
//!
//! Insufficient funds is an ordinary `Ok(false)`, not an error: it is the
//! most frequent outcome in a casino bot. Zero amounts are rejected before
//! any store contact. Only store I/O failures surface as errors.

use anyhow::Result;
use tracing::debug;

use cookiebot_types::AccountKey;

use crate::store::ProfileStore;

/// Ledger view of one account. Each operation is a single
/// read-modify-write step against the store (see [`crate::store`] for the
/// non-interleaving guarantee this relies on).
pub struct Ledger<'a, S: ProfileStore> {
    store: &'a mut S,
    key: AccountKey,
}

impl<'a, S: ProfileStore> Ledger<'a, S> {
    pub fn new(store: &'a mut S, key: AccountKey) -> Self {
        Self { store, key }
    }

    /// Debit `amount`. `Ok(false)` when the balance is insufficient or
    /// `amount` is zero; no mutation in either case.
    pub fn lose(&mut self, amount: u64) -> Result<bool> {
        if amount == 0 {
            return Ok(false);
        }
        let mut account = self.store.account(self.key)?;
        if !account.lose(amount) {
            return Ok(false);
        }
        self.store.put_account(self.key, account)?;
        debug!(
            player = self.key.player,
            community = self.key.community,
            amount,
            balance = account.balance,
            "ledger debit"
        );
        Ok(true)
    }

    /// Credit `amount`. Always succeeds for positive amounts; zero is
    /// rejected as `Ok(false)`.
    pub fn earn(&mut self, amount: u64) -> Result<bool> {
        if amount == 0 {
            return Ok(false);
        }
        let mut account = self.store.account(self.key)?;
        account.earn(amount);
        self.store.put_account(self.key, account)?;
        debug!(
            player = self.key.player,
            community = self.key.community,
            amount,
            balance = account.balance,
            "ledger credit"
        );
        Ok(true)
    }

    /// Administrative override of the balance. Lifetime counters are left
    /// alone; the historical max still ratchets.
    pub fn set_balance(&mut self, amount: u64) -> Result<()> {
        let mut account = self.store.account(self.key)?;
        account.set_balance(amount);
        self.store.put_account(self.key, account)?;
        debug!(
            player = self.key.player,
            community = self.key.community,
            amount,
            "ledger override"
        );
        Ok(())
    }

    pub fn balance(&self) -> Result<u64> {
        Ok(self.store.account(self.key)?.balance)
    }

    pub fn total_earned(&self) -> Result<u64> {
        Ok(self.store.account(self.key)?.total_earned)
    }

    pub fn total_lost(&self) -> Result<u64> {
        Ok(self.store.account(self.key)?.total_lost)
    }

    pub fn max_balance(&self) -> Result<u64> {
        Ok(self.store.account(self.key)?.max_balance)
    }
}
