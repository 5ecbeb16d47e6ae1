//! Minigame outcome engine.
//!
//! Pure game logic: every outcome is fully determined by the inputs and the
//! supplied [`GameRng`]. Ledger and profile mutation happen one layer up in
//! [`crate::commands`].

pub mod blackjack;
pub mod cards;
pub mod fishing;
pub mod slots;

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error as ThisError;

/// Error during game execution. User-visible conditions, not process
/// failures: the dispatcher formats these into chat replies.
#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum GameError {
    /// Wager or purchase amount was zero.
    #[error("amount must be positive")]
    InvalidWager,
    /// No more cards to draw. Fatal to the current hand only.
    #[error("deck exhausted")]
    DeckExhausted,
    /// Move arrived for a hand that already settled (or is not yet in the
    /// player's turn).
    #[error("hand is not awaiting a player action")]
    HandComplete,
    /// A second hand was started before the first settled.
    #[error("a hand is already in progress")]
    HandInProgress,
    /// Shop item name not present in the catalog.
    #[error("unknown item: {0}")]
    UnknownItem(String),
    /// A weighted pick had nothing to pick from. Validated configs cannot
    /// reach this.
    #[error("catalog selection was empty")]
    EmptyCatalog,
}

/// Random source for game outcomes.
///
/// Thin wrapper over `ChaCha8Rng` so games share one draw vocabulary
/// (bounded picks, probability checks, deck handling) and tests can replay
/// outcomes from a fixed seed.
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Operational constructor: seeds from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Deterministic constructor for tests and simulation replays.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform value in `[0, max)`.
    pub fn next_bounded(&mut self, max: usize) -> usize {
        self.inner.gen_range(0..max)
    }

    /// Single uniform draw in `[0, 1)` compared against `probability`.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.inner.gen::<f64>() < probability
    }

    /// Uniform pick from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, GameError> {
        if items.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        Ok(&items[self.next_bounded(items.len())])
    }

    /// Index pick by relative weight. Weights need not sum to 1.
    pub fn weighted(&mut self, weights: &[f64]) -> Result<usize, GameError> {
        let distribution = WeightedIndex::new(weights).map_err(|_| GameError::EmptyCatalog)?;
        Ok(distribution.sample(&mut self.inner))
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_bounded(i + 1);
            slice.swap(i, j);
        }
    }

    /// A freshly shuffled 52-card deck. Cards are dealt from the end.
    pub fn create_deck(&mut self) -> Vec<u8> {
        let mut deck: Vec<u8> = (0..cards::CARDS_PER_DECK).collect();
        self.shuffle(&mut deck);
        deck
    }
}
