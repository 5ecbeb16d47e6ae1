//! Shared playing-card helpers.
//!
//! Cards are encoded as `0..=51`, where:
//! - suit = card / 13 (0..=3)
//! - rank = card % 13 (0 is Ace, 12 is King)

/// Total cards in a standard deck.
pub const CARDS_PER_DECK: u8 = 52;

/// Ranks per suit.
pub const RANKS_PER_SUIT: u8 = 13;

const RANK_NAMES: [&str; 13] = [
    "Ace", "2", "3", "4", "5", "6", "7", "8", "9", "10", "Jack", "Queen", "King",
];

const SUIT_NAMES: [&str; 4] = ["Hearts", "Diamonds", "Clubs", "Spades"];

/// Returns the 0-based rank (0..=12), where 0 is Ace.
pub fn card_rank(card: u8) -> u8 {
    card % RANKS_PER_SUIT
}

/// Returns the suit (0..=3).
pub fn card_suit(card: u8) -> u8 {
    card / RANKS_PER_SUIT
}

/// Display name like "Queen of Hearts", for the chat layer.
pub fn card_name(card: u8) -> String {
    format!(
        "{} of {}",
        RANK_NAMES[card_rank(card) as usize],
        SUIT_NAMES[card_suit(card) as usize]
    )
}
