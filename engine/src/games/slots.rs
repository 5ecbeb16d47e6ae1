//! Slot machine spins.
//!
//! Three independent uniform reels over the configured symbol set; three of
//! a kind pays `wager * payout_multiplier`. The wager is deducted before
//! the spin by the command layer (lose-then-resolve): a losing spin keeps
//! the stake, a winning spin refunds it as part of the payout.

use cookiebot_types::SlotsConfig;

use super::GameRng;

/// Result of one spin. `reels` index into the configured symbol set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinOutcome {
    pub reels: [usize; 3],
    pub payout: u64,
}

impl SpinOutcome {
    pub fn is_win(&self) -> bool {
        self.payout > 0
    }
}

/// Payout for already-drawn reels. Split out so the settle rule is
/// testable without a random source.
pub fn settle(reels: [usize; 3], wager: u64, config: &SlotsConfig) -> u64 {
    if reels[0] == reels[1] && reels[1] == reels[2] {
        wager.saturating_mul(config.payout_multiplier)
    } else {
        0
    }
}

/// Draw three reels and settle. The caller has validated `wager > 0` and
/// already collected it.
pub fn spin(config: &SlotsConfig, wager: u64, rng: &mut GameRng) -> SpinOutcome {
    let count = config.symbols.len();
    let reels = [
        rng.next_bounded(count),
        rng.next_bounded(count),
        rng.next_bounded(count),
    ];
    SpinOutcome {
        reels,
        payout: settle(reels, wager, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_three_of_a_kind() {
        let config = SlotsConfig::default();
        assert_eq!(settle([2, 2, 2], 10, &config), 1_000);
        assert_eq!(settle([0, 0, 0], 1, &config), 100);
    }

    #[test]
    fn test_settle_mixed_reels_pay_nothing() {
        let config = SlotsConfig::default();
        assert_eq!(settle([0, 0, 1], 10, &config), 0);
        assert_eq!(settle([1, 0, 0], 10, &config), 0);
        assert_eq!(settle([0, 1, 2], 10, &config), 0);
    }

    #[test]
    fn test_spin_reels_in_range() {
        let config = SlotsConfig::default();
        let mut rng = GameRng::from_seed(9);
        for _ in 0..1_000 {
            let outcome = spin(&config, 10, &mut rng);
            assert!(outcome.reels.iter().all(|&r| r < config.symbols.len()));
            if outcome.is_win() {
                assert_eq!(outcome.payout, 10 * config.payout_multiplier);
            }
        }
    }

    #[test]
    fn test_spin_win_rate_matches_uniform_reels() {
        // 5 symbols: P(three of a kind) = 1/25 = 0.04.
        let config = SlotsConfig::default();
        let mut rng = GameRng::from_seed(10);
        let trials = 100_000;
        let wins = (0..trials)
            .filter(|_| spin(&config, 1, &mut rng).is_win())
            .count();
        let rate = wins as f64 / trials as f64;
        assert!((rate - 0.04).abs() < 0.005, "observed win rate {rate}");
    }
}
