//! Dispatcher-facing command surface.
//!
//! One method per chat command. Each call is a single synchronous step:
//! validate input, move cookies, resolve the game, persist, and hand back a
//! plain reply value for the chat layer to format. Wagers are always
//! collected before any randomness runs (lose-then-resolve); a failed
//! deduction means the game never starts.

use thiserror::Error as ThisError;
use tracing::{debug, info};

use cookiebot_types::{AccountKey, FishSpecies, FishingProfile, GamesConfig, Rarity};

use crate::games::blackjack::{BlackjackHand, Settlement, Stage};
use crate::games::fishing::CastOutcome;
use crate::games::{fishing, slots, GameError, GameRng};
use crate::ledger::Ledger;
use crate::store::ProfileStore;

#[derive(Debug, ThisError)]
pub enum CommandError {
    /// User-visible game refusal (bad wager, unknown item, stale hand).
    #[error(transparent)]
    Game(#[from] GameError),
    /// Storage collaborator failure; fatal to this command only.
    #[error("storage failure: {0}")]
    Store(#[from] anyhow::Error),
}

/// Account read for balance commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountSummary {
    pub balance: u64,
    pub total_earned: u64,
    pub total_lost: u64,
    pub max_balance: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotsReply {
    InsufficientFunds,
    Spun {
        symbols: [String; 3],
        payout: u64,
        balance: u64,
    },
}

#[derive(Debug)]
pub enum DealReply {
    InsufficientFunds,
    Dealt(BlackjackHand),
}

/// Result of a player hit. `settlement` is present when the card busted
/// the hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitReply {
    pub card: u8,
    pub total: u8,
    pub settlement: Option<Settlement>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CastReply {
    NoBait,
    Missed {
        dry_streak: u32,
        longest_dry_streak: u32,
    },
    Caught {
        species: FishSpecies,
        rarity: Rarity,
        leveled_up: bool,
        /// The catch beat the player's most valuable one so far.
        new_record: bool,
        level: u32,
        balance: u64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurchaseReply {
    CannotAfford { cost: u64, balance: u64 },
    Bought { bait_count: u64, balance: u64 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RodReply {
    CannotAfford { price: u64, balance: u64 },
    Equipped { rod: String, purchased: bool, balance: u64 },
}

/// The game engine behind the chat commands.
pub struct GameCommands<S: ProfileStore> {
    store: S,
    config: GamesConfig,
    rng: GameRng,
}

impl<S: ProfileStore> GameCommands<S> {
    pub fn new(store: S, config: GamesConfig) -> Self {
        Self::with_rng(store, config, GameRng::from_entropy())
    }

    /// Deterministic constructor for tests and simulation.
    pub fn with_rng(store: S, config: GamesConfig, rng: GameRng) -> Self {
        Self { store, config, rng }
    }

    pub fn config(&self) -> &GamesConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ------------------------------------------------------------------
    // Cookies
    // ------------------------------------------------------------------

    pub fn balance(&mut self, key: AccountKey) -> Result<AccountSummary, CommandError> {
        let ledger = Ledger::new(&mut self.store, key);
        Ok(AccountSummary {
            balance: ledger.balance()?,
            total_earned: ledger.total_earned()?,
            total_lost: ledger.total_lost()?,
            max_balance: ledger.max_balance()?,
        })
    }

    /// Privileged override used by admin commands only.
    pub fn set_balance(&mut self, key: AccountKey, amount: u64) -> Result<(), CommandError> {
        Ledger::new(&mut self.store, key).set_balance(amount)?;
        info!(player = key.player, community = key.community, amount, "balance override");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Slots
    // ------------------------------------------------------------------

    pub fn slots(&mut self, key: AccountKey, wager: u64) -> Result<SlotsReply, CommandError> {
        if wager == 0 {
            return Err(GameError::InvalidWager.into());
        }
        let mut ledger = Ledger::new(&mut self.store, key);
        if !ledger.lose(wager)? {
            return Ok(SlotsReply::InsufficientFunds);
        }

        let outcome = slots::spin(&self.config.slots, wager, &mut self.rng);
        let mut ledger = Ledger::new(&mut self.store, key);
        if outcome.payout > 0 {
            ledger.earn(outcome.payout)?;
        }
        let balance = ledger.balance()?;
        info!(
            player = key.player,
            community = key.community,
            wager,
            payout = outcome.payout,
            "slots spin"
        );

        let symbols = &self.config.slots.symbols;
        Ok(SlotsReply::Spun {
            symbols: [
                symbols[outcome.reels[0]].clone(),
                symbols[outcome.reels[1]].clone(),
                symbols[outcome.reels[2]].clone(),
            ],
            payout: outcome.payout,
            balance,
        })
    }

    // ------------------------------------------------------------------
    // Blackjack
    // ------------------------------------------------------------------

    /// Start a hand: the wager leaves the ledger first, and the hand is
    /// only created if the deduction succeeds. The caller (guild session)
    /// owns the returned hand until it settles.
    pub fn blackjack_deal(&mut self, key: AccountKey, wager: u64) -> Result<DealReply, CommandError> {
        if wager == 0 {
            return Err(GameError::InvalidWager.into());
        }
        let mut ledger = Ledger::new(&mut self.store, key);
        if !ledger.lose(wager)? {
            return Ok(DealReply::InsufficientFunds);
        }
        let hand = BlackjackHand::deal(wager, &mut self.rng)?;
        debug!(player = key.player, community = key.community, wager, "blackjack deal");
        Ok(DealReply::Dealt(hand))
    }

    /// Player hit. A bust settles the hand immediately (payout 0, nothing
    /// to credit).
    pub fn blackjack_hit(&mut self, hand: &mut BlackjackHand) -> Result<HitReply, CommandError> {
        let card = hand.hit()?;
        let busted = hand.stage() == Stage::Settled;
        Ok(HitReply {
            card,
            total: hand.player_total(),
            settlement: busted.then(|| hand.bust_settlement()),
        })
    }

    /// Player stand (also the auto-stand path on turn timeout): runs the
    /// dealer turn, settles, and credits any payout.
    pub fn blackjack_stand(
        &mut self,
        key: AccountKey,
        hand: &mut BlackjackHand,
    ) -> Result<Settlement, CommandError> {
        let settlement = hand.stand(self.config.blackjack.dealer_stand_total)?;
        if settlement.payout > 0 {
            Ledger::new(&mut self.store, key).earn(settlement.payout)?;
        }
        info!(
            player = key.player,
            community = key.community,
            wager = hand.wager(),
            outcome = ?settlement.outcome,
            payout = settlement.payout,
            "blackjack settled"
        );
        Ok(settlement)
    }

    // ------------------------------------------------------------------
    // Fishing
    // ------------------------------------------------------------------

    /// Cast a line. With `use_bait`, one bait is consumed and the catch is
    /// guaranteed; without, a single draw against the computed chance
    /// decides. Catch value (the rarity price) is credited exactly once.
    pub fn cast(&mut self, key: AccountKey, use_bait: bool) -> Result<CastReply, CommandError> {
        let mut profile = self.store.fishing_profile(key)?;
        if use_bait && !profile.consume_bait() {
            return Ok(CastReply::NoBait);
        }

        let fishing = &self.config.fishing;
        let rod_name = profile.equipped(&fishing.catalog.starter_rod);
        let rod_modifier = fishing
            .catalog
            .rod(rod_name)
            .map(|rod| rod.modifier)
            .unwrap_or(0.0);

        let outcome = fishing::cast(fishing, profile.level, rod_modifier, use_bait, &mut self.rng)?;
        match outcome {
            CastOutcome::Missed => {
                profile.record_miss();
                let reply = CastReply::Missed {
                    dry_streak: profile.dry_streak,
                    longest_dry_streak: profile.longest_dry_streak,
                };
                self.store.put_fishing_profile(key, profile)?;
                debug!(player = key.player, community = key.community, "cast missed");
                Ok(reply)
            }
            CastOutcome::Caught { species, rarity } => {
                let update = profile.record_catch(
                    &species,
                    &rarity,
                    fishing.experience_per_catch,
                    fishing.experience_per_level,
                );
                let level = profile.level;
                self.store.put_fishing_profile(key, profile)?;

                let mut ledger = Ledger::new(&mut self.store, key);
                ledger.earn(rarity.price)?;
                let balance = ledger.balance()?;
                info!(
                    player = key.player,
                    community = key.community,
                    species = %species.name,
                    rarity = %rarity.name,
                    price = rarity.price,
                    leveled_up = update.leveled_up,
                    new_record = update.new_record,
                    "fish caught"
                );
                Ok(CastReply::Caught {
                    species,
                    rarity,
                    leveled_up: update.leveled_up,
                    new_record: update.new_record,
                    level,
                    balance,
                })
            }
        }
    }

    /// Buy `amount` bait of the named type. Availability is confirmed
    /// before the deduction, and the deduction before the count bump, so a
    /// refusal leaves nothing half-applied.
    pub fn buy_bait(
        &mut self,
        key: AccountKey,
        bait: &str,
        amount: u64,
    ) -> Result<PurchaseReply, CommandError> {
        if amount == 0 {
            return Err(GameError::InvalidWager.into());
        }
        let price = self
            .config
            .fishing
            .catalog
            .bait(bait)
            .ok_or_else(|| GameError::UnknownItem(bait.to_string()))?
            .price;
        let cost = price.saturating_mul(amount);

        let mut ledger = Ledger::new(&mut self.store, key);
        if !ledger.lose(cost)? {
            let balance = ledger.balance()?;
            return Ok(PurchaseReply::CannotAfford { cost, balance });
        }
        let balance = ledger.balance()?;

        let mut profile = self.store.fishing_profile(key)?;
        profile.bait_count = profile.bait_count.saturating_add(amount);
        let bait_count = profile.bait_count;
        self.store.put_fishing_profile(key, profile)?;
        info!(player = key.player, community = key.community, amount, cost, "bait bought");
        Ok(PurchaseReply::Bought { bait_count, balance })
    }

    /// Equip a rod, buying it first if not owned. Already-owned rods
    /// (including the starter) swap in for free.
    pub fn equip_rod(&mut self, key: AccountKey, rod: &str) -> Result<RodReply, CommandError> {
        let catalog = &self.config.fishing.catalog;
        let definition = catalog
            .rod(rod)
            .ok_or_else(|| GameError::UnknownItem(rod.to_string()))?;
        let starter = catalog.starter_rod.clone();
        let price = definition.price;

        let mut profile = self.store.fishing_profile(key)?;
        let mut purchased = false;
        if !profile.owns(rod, &starter) {
            let mut ledger = Ledger::new(&mut self.store, key);
            if price > 0 && !ledger.lose(price)? {
                let balance = ledger.balance()?;
                return Ok(RodReply::CannotAfford { price, balance });
            }
            profile.owned_rods.insert(rod.to_string());
            purchased = true;
        }
        profile.equip(rod, &starter);
        self.store.put_fishing_profile(key, profile)?;

        let balance = Ledger::new(&mut self.store, key).balance()?;
        info!(player = key.player, community = key.community, rod, purchased, "rod equipped");
        Ok(RodReply::Equipped {
            rod: rod.to_string(),
            purchased,
            balance,
        })
    }

    pub fn fishing_stats(&mut self, key: AccountKey) -> Result<FishingProfile, CommandError> {
        Ok(self.store.fishing_profile(key)?)
    }
}
