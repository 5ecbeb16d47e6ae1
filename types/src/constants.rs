/// Slot machine symbol count in the reference configuration.
pub const SLOT_SYMBOLS: [&str; 5] = ["cherry", "lemon", "orange", "grape", "melon"];

/// Payout multiplier for a three-of-a-kind slot spin.
pub const SLOT_PAYOUT_MULTIPLIER: u64 = 100;

/// Dealer draws to this total and stands at or above it.
pub const DEALER_STAND_TOTAL: u8 = 17;

/// Natural blackjack pays 2.5x the wager, carried as a ratio so payouts
/// stay integral.
pub const BLACKJACK_PAYOUT_NUMERATOR: u64 = 5;
pub const BLACKJACK_PAYOUT_DENOMINATOR: u64 = 2;

/// A plain win returns double the wager (stake plus even-money profit).
pub const WIN_PAYOUT_MULTIPLIER: u64 = 2;

/// Base probability of a catch at level 0 with no rod bonus.
pub const BASE_CATCH_CHANCE: f64 = 0.25;

/// Per-level scaling of the catch chance: `base * (1 + level * modifier)`.
pub const LEVEL_MODIFIER: f64 = 0.05;

/// Experience required to advance one fishing level.
pub const EXPERIENCE_PER_LEVEL: u32 = 10;

/// Experience granted per catch. Must not exceed `EXPERIENCE_PER_LEVEL`;
/// the progression tracker applies at most one level-up per cast.
pub const EXPERIENCE_PER_CATCH: u32 = 1;

/// Price of one bait in cookies.
pub const BAIT_PRICE: u64 = 50;
