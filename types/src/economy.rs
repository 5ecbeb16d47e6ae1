use thiserror::Error as ThisError;

use crate::{CommunityId, PlayerId};

/// Composite key identifying one player's account within one community.
///
/// Balances are scoped per community: the same player holds independent
/// accounts on every server the bot runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountKey {
    pub player: PlayerId,
    pub community: CommunityId,
}

impl AccountKey {
    pub fn new(player: PlayerId, community: CommunityId) -> Self {
        Self { player, community }
    }
}

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum AccountInvariantError {
    #[error("max_balance below current balance (max={max}, balance={balance})")]
    MaxBelowBalance { max: u64, balance: u64 },
}

/// Currency record for one (player, community) pair.
///
/// Rows are created lazily with all fields at zero and never deleted.
/// All mutation goes through [`Account::earn`], [`Account::lose`] and
/// [`Account::set_balance`]; the lifetime counters are monotone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Account {
    pub balance: u64,
    pub total_earned: u64,
    pub total_lost: u64,
    pub max_balance: u64,
}

impl Account {
    /// Credit `amount` to the balance. Always succeeds.
    ///
    /// Updates `total_earned` and folds the new balance into `max_balance`.
    /// Callers validate `amount > 0` before reaching this point.
    pub fn earn(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
        self.total_earned = self.total_earned.saturating_add(amount);
        if self.balance > self.max_balance {
            self.max_balance = self.balance;
        }
    }

    /// Debit `amount` from the balance.
    ///
    /// Returns `false` without mutating when the balance is insufficient.
    /// The sufficiency check before the subtraction is what keeps the
    /// balance non-negative across any call sequence.
    pub fn lose(&mut self, amount: u64) -> bool {
        if self.balance < amount {
            return false;
        }
        self.balance -= amount;
        self.total_lost = self.total_lost.saturating_add(amount);
        true
    }

    /// Administrative override: set the balance directly.
    ///
    /// Does not touch the lifetime counters. `max_balance` still ratchets
    /// up if the new balance exceeds it.
    pub fn set_balance(&mut self, amount: u64) {
        self.balance = amount;
        if self.balance > self.max_balance {
            self.max_balance = self.balance;
        }
    }

    pub fn validate_invariants(&self) -> Result<(), AccountInvariantError> {
        if self.max_balance < self.balance {
            return Err(AccountInvariantError::MaxBelowBalance {
                max: self.max_balance,
                balance: self.balance,
            });
        }
        Ok(())
    }
}
