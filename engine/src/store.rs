//! Persistence contract consumed by the engine.
//!
//! The concrete storage engine is an external collaborator; the engine only
//! sees typed records behind this narrow get/put seam, which keeps the
//! ledger and progression logic testable without a database.
//!
//! Every method is one synchronous dispatcher step. That makes each ledger
//! read-check-write a single critical section per account: there is no
//! suspension point between the sufficiency check and the write, so a burst
//! of commands from the same user cannot interleave into a double-spend.
//! I/O failures are fatal to the current command only and propagate as
//! `anyhow::Error` for the dispatcher to report.

use anyhow::Result;
use std::collections::HashMap;

use cookiebot_types::{Account, AccountKey, FishingProfile};

pub trait ProfileStore {
    /// Fetch the account for `key`, auto-creating a zeroed record.
    fn account(&self, key: AccountKey) -> Result<Account>;

    fn put_account(&mut self, key: AccountKey, account: Account) -> Result<()>;

    /// Fetch the fishing profile for `key`, auto-creating a zeroed record.
    fn fishing_profile(&self, key: AccountKey) -> Result<FishingProfile>;

    fn put_fishing_profile(&mut self, key: AccountKey, profile: FishingProfile) -> Result<()>;
}

/// In-memory store used by tests and the simulator.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: HashMap<AccountKey, Account>,
    profiles: HashMap<AccountKey, FishingProfile>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryStore {
    fn account(&self, key: AccountKey) -> Result<Account> {
        Ok(self.accounts.get(&key).copied().unwrap_or_default())
    }

    fn put_account(&mut self, key: AccountKey, account: Account) -> Result<()> {
        self.accounts.insert(key, account);
        Ok(())
    }

    fn fishing_profile(&self, key: AccountKey) -> Result<FishingProfile> {
        Ok(self.profiles.get(&key).cloned().unwrap_or_default())
    }

    fn put_fishing_profile(&mut self, key: AccountKey, profile: FishingProfile) -> Result<()> {
        self.profiles.insert(key, profile);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_auto_vivify_zeroed_records() {
        let store = MemoryStore::new();
        let key = AccountKey::new(1, 1);
        assert_eq!(store.account(key).unwrap(), Account::default());
        assert_eq!(
            store.fishing_profile(key).unwrap(),
            FishingProfile::default()
        );
    }

    #[test]
    fn test_accounts_are_scoped_per_community() {
        let mut store = MemoryStore::new();
        let here = AccountKey::new(1, 10);
        let there = AccountKey::new(1, 20);

        let mut account = store.account(here).unwrap();
        account.earn(100);
        store.put_account(here, account).unwrap();

        assert_eq!(store.account(here).unwrap().balance, 100);
        assert_eq!(store.account(there).unwrap().balance, 0);
    }
}
