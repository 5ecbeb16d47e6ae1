//! Blackjack session state machine.
//!
//! One [`BlackjackHand`] covers exactly one hand: deal, player hits, stand,
//! settle. The hand owns its own freshly shuffled deck and is discarded
//! after settlement; only the final payout reaches the ledger (applied by
//! the command layer, which also deducts the wager before dealing).
//!
//! House rules: dealer stands on a configurable total (17 in the reference
//! config), natural blackjack pays 2.5x, a plain win returns 2x, a push
//! returns the stake.
//!
//! Hand totals use a greedy left-to-right scan: an Ace counts 11 exactly
//! when the running total at that point allows it, otherwise 1. There is no
//! soft/hard recount afterwards, so the value of an Ace depends on its
//! position in the hand.

use cookiebot_types::{
    BLACKJACK_PAYOUT_DENOMINATOR, BLACKJACK_PAYOUT_NUMERATOR, WIN_PAYOUT_MULTIPLIER,
};

use super::{cards, GameError, GameRng};

/// Lifecycle of a hand. `DealerTurn` is only observable from inside
/// [`BlackjackHand::stand`]; callers see `PlayerTurn` until settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Dealing,
    PlayerTurn,
    DealerTurn,
    Settled,
}

/// Final result of a hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Player natural blackjack (21 with the two dealt cards).
    Blackjack,
    /// Dealer busted or player outscored the dealer.
    Win,
    /// Equal totals, or both sides dealt naturals. Stake returned.
    Push,
    Lose,
    /// Dealer natural blackjack against a non-natural player hand.
    DealerBlackjack,
    /// Player drew past 21.
    Bust,
}

impl Outcome {
    /// Total return credited for the outcome (stake included on wins).
    pub fn payout(self, wager: u64) -> u64 {
        match self {
            Outcome::Blackjack => {
                wager.saturating_mul(BLACKJACK_PAYOUT_NUMERATOR) / BLACKJACK_PAYOUT_DENOMINATOR
            }
            Outcome::Win => wager.saturating_mul(WIN_PAYOUT_MULTIPLIER),
            Outcome::Push => wager,
            Outcome::Lose | Outcome::DealerBlackjack | Outcome::Bust => 0,
        }
    }
}

/// Settled hand summary handed back to the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub outcome: Outcome,
    pub payout: u64,
    pub player_total: u8,
    pub dealer_total: u8,
}

/// Greedy left-to-right hand total (see module docs for the Ace rule).
pub fn hand_total(hand: &[u8]) -> u8 {
    let mut total: u8 = 0;
    for &card in hand {
        let rank = cards::card_rank(card);
        let value = if rank == 0 {
            // Ace: 11 if it fits against the running total, else 1.
            if total + 11 <= 21 {
                11
            } else {
                1
            }
        } else if rank >= 9 {
            // 10, Jack, Queen, King.
            10
        } else {
            rank + 1
        };
        total += value;
    }
    total
}

/// A natural blackjack: 21 from exactly the two dealt cards.
pub fn is_natural(hand: &[u8]) -> bool {
    hand.len() == 2 && hand_total(hand) == 21
}

/// Transient state of one blackjack hand.
#[derive(Clone, Debug)]
pub struct BlackjackHand {
    deck: Vec<u8>,
    dealer_hand: Vec<u8>,
    player_hand: Vec<u8>,
    wager: u64,
    stage: Stage,
}

impl BlackjackHand {
    /// Start a hand: shuffle a fresh deck and deal two cards each, dealer
    /// first. The wager must already be deducted from the ledger; a failed
    /// deduction means this constructor is never reached.
    pub fn deal(wager: u64, rng: &mut GameRng) -> Result<Self, GameError> {
        Self::with_deck(rng.create_deck(), wager)
    }

    /// Start a hand from a prepared deck (dealt from the end). Used by
    /// tests to script exact scenarios.
    pub fn with_deck(deck: Vec<u8>, wager: u64) -> Result<Self, GameError> {
        if wager == 0 {
            return Err(GameError::InvalidWager);
        }
        let mut hand = Self {
            deck,
            dealer_hand: Vec::new(),
            player_hand: Vec::new(),
            wager,
            stage: Stage::Dealing,
        };
        for _ in 0..2 {
            let card = hand.draw()?;
            hand.dealer_hand.push(card);
        }
        for _ in 0..2 {
            let card = hand.draw()?;
            hand.player_hand.push(card);
        }
        hand.stage = Stage::PlayerTurn;
        Ok(hand)
    }

    /// Once dealt, a card leaves the deck and lives in exactly one hand.
    fn draw(&mut self) -> Result<u8, GameError> {
        self.deck.pop().ok_or(GameError::DeckExhausted)
    }

    pub fn wager(&self) -> u64 {
        self.wager
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn player_hand(&self) -> &[u8] {
        &self.player_hand
    }

    /// Dealer cards. The dispatcher decides how much to reveal mid-hand.
    pub fn dealer_hand(&self) -> &[u8] {
        &self.dealer_hand
    }

    pub fn player_total(&self) -> u8 {
        hand_total(&self.player_hand)
    }

    pub fn dealer_total(&self) -> u8 {
        hand_total(&self.dealer_hand)
    }

    /// Deal one card to the player and return it. A total over 21 busts
    /// and settles the hand as a loss (the stage moves to `Settled`).
    pub fn hit(&mut self) -> Result<u8, GameError> {
        if self.stage != Stage::PlayerTurn {
            return Err(GameError::HandComplete);
        }
        let card = self.draw()?;
        self.player_hand.push(card);
        if self.player_total() > 21 {
            self.stage = Stage::Settled;
        }
        Ok(card)
    }

    /// Settlement for a busted hand.
    pub fn bust_settlement(&self) -> Settlement {
        Settlement {
            outcome: Outcome::Bust,
            payout: 0,
            player_total: self.player_total(),
            dealer_total: self.dealer_total(),
        }
    }

    /// End the player turn: the dealer draws up to `dealer_stand_total`,
    /// then the hand settles. Turn timeouts funnel into this same path
    /// (auto-stand), so a cancelled turn can never leave a hand dangling.
    /// An exhausted deck forces the dealer to stand on the cards already
    /// out; the hand still settles.
    pub fn stand(&mut self, dealer_stand_total: u8) -> Result<Settlement, GameError> {
        if self.stage != Stage::PlayerTurn {
            return Err(GameError::HandComplete);
        }
        self.stage = Stage::DealerTurn;
        while self.dealer_total() < dealer_stand_total {
            let Some(card) = self.deck.pop() else { break };
            self.dealer_hand.push(card);
        }

        let player_total = self.player_total();
        let dealer_total = self.dealer_total();
        let player_natural = is_natural(&self.player_hand);
        let dealer_natural = is_natural(&self.dealer_hand);

        let outcome = if player_natural && dealer_natural {
            Outcome::Push
        } else if player_natural {
            Outcome::Blackjack
        } else if dealer_natural {
            Outcome::DealerBlackjack
        } else if dealer_total > 21 || player_total > dealer_total {
            Outcome::Win
        } else if player_total == dealer_total {
            Outcome::Push
        } else {
            Outcome::Lose
        };

        self.stage = Stage::Settled;
        Ok(Settlement {
            outcome,
            payout: outcome.payout(self.wager),
            player_total,
            dealer_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Card encodings: rank = card % 13 (0 is Ace), suit = card / 13.
    const ACE_H: u8 = 0;
    const FIVE_H: u8 = 4;
    const SIX_H: u8 = 5;
    const SEVEN_H: u8 = 6;
    const EIGHT_H: u8 = 7;
    const NINE_H: u8 = 8;
    const TEN_H: u8 = 9;
    const KING_H: u8 = 12;
    const ACE_D: u8 = 13;
    const NINE_D: u8 = 21;
    const TEN_D: u8 = 22;
    const KING_D: u8 = 25;
    const TWO_C: u8 = 27;

    /// Build a deck that deals `dealer` then `player` (two cards each) and
    /// then yields `draws` in order. Cards are dealt from the deck's end.
    fn scripted_deck(dealer: [u8; 2], player: [u8; 2], draws: &[u8]) -> Vec<u8> {
        let mut deck: Vec<u8> = draws.iter().rev().copied().collect();
        deck.push(player[1]);
        deck.push(player[0]);
        deck.push(dealer[1]);
        deck.push(dealer[0]);
        deck
    }

    #[test]
    fn test_hand_total_simple() {
        assert_eq!(hand_total(&[TEN_H, NINE_D]), 19);
        assert_eq!(hand_total(&[KING_H, TEN_D]), 20);
        assert_eq!(hand_total(&[FIVE_H, SIX_H]), 11);
    }

    #[test]
    fn test_ace_counts_eleven_when_it_fits() {
        assert_eq!(hand_total(&[ACE_H, KING_H]), 21);
        assert_eq!(hand_total(&[NINE_H, ACE_H]), 20);
    }

    #[test]
    fn test_ace_counts_one_against_high_running_total() {
        assert_eq!(hand_total(&[KING_H, NINE_H, ACE_H]), 20);
        // Two aces: the second one no longer fits as 11.
        assert_eq!(hand_total(&[ACE_H, ACE_D]), 12);
    }

    #[test]
    fn test_ace_value_depends_on_position() {
        // Greedy rule: King-Ace-Ace counts 10 + 11 + 1 = 22 because the
        // first Ace locks in 11 before the second arrives. No recount.
        assert_eq!(hand_total(&[KING_H, ACE_H, ACE_D]), 22);
    }

    #[test]
    fn test_natural_requires_two_cards() {
        assert!(is_natural(&[ACE_H, KING_H]));
        assert!(!is_natural(&[FIVE_H, SIX_H, KING_H])); // 21 on three cards
        assert!(!is_natural(&[TEN_H, NINE_D]));
    }

    #[test]
    fn test_deal_takes_four_cards() {
        let mut rng = GameRng::from_seed(1);
        let hand = BlackjackHand::deal(100, &mut rng).unwrap();
        assert_eq!(hand.stage(), Stage::PlayerTurn);
        assert_eq!(hand.player_hand().len(), 2);
        assert_eq!(hand.dealer_hand().len(), 2);

        // Dealt cards left the deck and appear exactly once.
        let mut seen = [false; 52];
        for &card in hand.player_hand().iter().chain(hand.dealer_hand()) {
            assert!(!seen[card as usize]);
            seen[card as usize] = true;
        }
    }

    #[test]
    fn test_zero_wager_rejected() {
        let mut rng = GameRng::from_seed(1);
        assert_eq!(
            BlackjackHand::deal(0, &mut rng).unwrap_err(),
            GameError::InvalidWager
        );
    }

    #[test]
    fn test_player_natural_pays_5_halves() {
        // Player Ace+King (natural), dealer 9+7 (16, draws).
        let deck = scripted_deck([NINE_H, SEVEN_H], [ACE_H, KING_H], &[FIVE_H]);
        let mut hand = BlackjackHand::with_deck(deck, 100).unwrap();
        let settlement = hand.stand(17).unwrap();
        assert_eq!(settlement.outcome, Outcome::Blackjack);
        assert_eq!(settlement.payout, 250);
        assert_eq!(settlement.player_total, 21);
        assert_eq!(hand.stage(), Stage::Settled);
    }

    #[test]
    fn test_equal_totals_push_returns_stake() {
        // 19 vs 19.
        let deck = scripted_deck([TEN_H, NINE_H], [TEN_D, NINE_D], &[]);
        let mut hand = BlackjackHand::with_deck(deck, 100).unwrap();
        let settlement = hand.stand(17).unwrap();
        assert_eq!(settlement.outcome, Outcome::Push);
        assert_eq!(settlement.payout, 100);
        assert_eq!(settlement.player_total, 19);
        assert_eq!(settlement.dealer_total, 19);
    }

    #[test]
    fn test_hit_to_21_is_not_a_natural() {
        // Player 5+6 hits a King for a three-card 21.
        let deck = scripted_deck([TEN_H, EIGHT_H], [FIVE_H, SIX_H], &[KING_D]);
        let mut hand = BlackjackHand::with_deck(deck, 100).unwrap();
        assert_eq!(hand.hit().unwrap(), KING_D);
        assert_eq!(hand.player_total(), 21);
        assert_eq!(hand.stage(), Stage::PlayerTurn);

        let settlement = hand.stand(17).unwrap();
        // 21 vs dealer 18: a plain win at 2x, not the 2.5x natural payout.
        assert_eq!(settlement.outcome, Outcome::Win);
        assert_eq!(settlement.payout, 200);
    }

    #[test]
    fn test_both_naturals_push() {
        let deck = scripted_deck([ACE_D, KING_D], [ACE_H, KING_H], &[]);
        let mut hand = BlackjackHand::with_deck(deck, 80).unwrap();
        let settlement = hand.stand(17).unwrap();
        assert_eq!(settlement.outcome, Outcome::Push);
        assert_eq!(settlement.payout, 80);
    }

    #[test]
    fn test_dealer_natural_beats_plain_20() {
        let deck = scripted_deck([ACE_D, KING_D], [TEN_H, KING_H], &[]);
        let mut hand = BlackjackHand::with_deck(deck, 100).unwrap();
        let settlement = hand.stand(17).unwrap();
        assert_eq!(settlement.outcome, Outcome::DealerBlackjack);
        assert_eq!(settlement.payout, 0);
    }

    #[test]
    fn test_dealer_draws_to_stand_total_and_busts() {
        // Dealer 16 draws a King and busts at 26.
        let deck = scripted_deck([TEN_H, SIX_H], [TEN_D, EIGHT_H], &[KING_D]);
        let mut hand = BlackjackHand::with_deck(deck, 50).unwrap();
        let settlement = hand.stand(17).unwrap();
        assert_eq!(settlement.outcome, Outcome::Win);
        assert_eq!(settlement.payout, 100);
        assert_eq!(settlement.dealer_total, 26);
        assert_eq!(hand.dealer_hand().len(), 3);
    }

    #[test]
    fn test_dealer_stands_on_17_and_wins() {
        // Dealer 17 stands; player 16 loses.
        let deck = scripted_deck([TEN_H, SEVEN_H], [TEN_D, SIX_H], &[]);
        let mut hand = BlackjackHand::with_deck(deck, 50).unwrap();
        let settlement = hand.stand(17).unwrap();
        assert_eq!(settlement.outcome, Outcome::Lose);
        assert_eq!(settlement.payout, 0);
        assert_eq!(hand.dealer_hand().len(), 2);
    }

    #[test]
    fn test_bust_ends_the_hand() {
        let deck = scripted_deck([TEN_H, SEVEN_H], [TEN_D, NINE_D], &[KING_D]);
        let mut hand = BlackjackHand::with_deck(deck, 100).unwrap();
        assert_eq!(hand.hit().unwrap(), KING_D);
        assert_eq!(hand.stage(), Stage::Settled);
        let settlement = hand.bust_settlement();
        assert_eq!(settlement.outcome, Outcome::Bust);
        assert_eq!(settlement.payout, 0);

        // No further moves on a settled hand.
        assert_eq!(hand.hit().unwrap_err(), GameError::HandComplete);
        assert_eq!(hand.stand(17).unwrap_err(), GameError::HandComplete);
    }

    #[test]
    fn test_stand_twice_rejected() {
        let deck = scripted_deck([TEN_H, SEVEN_H], [TEN_D, NINE_D], &[]);
        let mut hand = BlackjackHand::with_deck(deck, 100).unwrap();
        hand.stand(17).unwrap();
        assert_eq!(hand.stand(17).unwrap_err(), GameError::HandComplete);
    }

    #[test]
    fn test_dealer_stands_short_when_the_deck_runs_out() {
        // Only the four dealt cards: the dealer cannot reach 17 and
        // settles on 16 instead of wedging the hand mid-turn.
        let deck = scripted_deck([TEN_H, SIX_H], [TEN_D, NINE_D], &[]);
        let mut hand = BlackjackHand::with_deck(deck, 50).unwrap();
        let settlement = hand.stand(17).unwrap();
        assert_eq!(settlement.outcome, Outcome::Win);
        assert_eq!(settlement.payout, 100);
        assert_eq!(settlement.dealer_total, 16);
        assert_eq!(hand.stage(), Stage::Settled);
    }

    #[test]
    fn test_exhausted_deck_is_a_hand_level_error() {
        // Exactly the four dealt cards: the first hit has nothing to draw.
        let deck = scripted_deck([TEN_H, SEVEN_H], [TWO_C, NINE_D], &[]);
        let mut hand = BlackjackHand::with_deck(deck, 100).unwrap();
        assert_eq!(hand.hit().unwrap_err(), GameError::DeckExhausted);
    }

    #[test]
    fn test_odd_wager_natural_payout_floors() {
        let deck = scripted_deck([NINE_H, SEVEN_H], [ACE_H, KING_H], &[FIVE_H]);
        let mut hand = BlackjackHand::with_deck(deck, 101).unwrap();
        let settlement = hand.stand(17).unwrap();
        // 101 * 5 / 2 floors the half-cookie.
        assert_eq!(settlement.payout, 252);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn low_value(card: u8) -> u8 {
            let rank = cards::card_rank(card);
            if rank >= 9 {
                10
            } else {
                rank + 1
            }
        }

        proptest! {
            // Once one Ace locks in 11, the running total stays above 10,
            // so no later Ace fits as 11: the greedy total is the all-aces-
            // low total plus at most a single 10.
            #[test]
            fn prop_at_most_one_ace_counts_eleven(hand in prop::collection::vec(0u8..52, 0..12)) {
                let low: u8 = hand.iter().map(|&c| low_value(c)).sum();
                let total = hand_total(&hand);
                prop_assert!(total == low || total == low + 10);
            }

            #[test]
            fn prop_totals_never_decrease_as_cards_arrive(hand in prop::collection::vec(0u8..52, 1..12)) {
                for split in 1..hand.len() {
                    prop_assert!(hand_total(&hand[..split]) <= hand_total(&hand[..split + 1]));
                }
            }
        }
    }
}
