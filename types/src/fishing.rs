use std::collections::BTreeSet;

use crate::catalog::{FishSpecies, Rarity};

/// Outcome flags from recording a catch, for the announcement layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatchUpdate {
    /// The catch advanced the player a level.
    pub leveled_up: bool,
    /// The catch beat the previous most valuable one.
    pub new_record: bool,
}

/// Cumulative fishing stats and equipped-item state for one
/// (player, community) pair.
///
/// Created lazily with everything at zero, mutated on every cast, never
/// deleted. `equipped_rod == None` means the starter rod from the catalog
/// is in use; the starter rod is implicitly owned and never appears in
/// `owned_rods`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FishingProfile {
    pub total_caught: u64,
    /// Grams of fish landed, lifetime.
    pub total_weight: u64,
    /// Cookies earned from catches, lifetime.
    pub total_value: u64,
    /// Value of the single best catch so far; ties do not re-record.
    pub most_valuable_catch: u64,
    pub level: u32,
    /// Always `< experience_per_level` after a transition.
    pub experience: u32,
    pub dry_streak: u32,
    pub longest_dry_streak: u32,
    pub equipped_rod: Option<String>,
    pub owned_rods: BTreeSet<String>,
    pub bait_count: u64,
}

impl FishingProfile {
    /// Record a successful catch. Reports level-ups (at most one level per
    /// cast; configs with `xp_per_catch > xp_per_level` are rejected at
    /// load) and whether this beat the most valuable catch so far.
    pub fn record_catch(
        &mut self,
        species: &FishSpecies,
        rarity: &Rarity,
        xp_per_catch: u32,
        xp_per_level: u32,
    ) -> CatchUpdate {
        self.total_caught += 1;
        self.total_weight = self.total_weight.saturating_add(species.weight);
        self.total_value = self.total_value.saturating_add(rarity.price);
        self.dry_streak = 0;

        let new_record = rarity.price > self.most_valuable_catch;
        if new_record {
            self.most_valuable_catch = rarity.price;
        }

        self.experience += xp_per_catch;
        let leveled_up = self.experience >= xp_per_level;
        if leveled_up {
            self.level += 1;
            self.experience = 0;
        }
        CatchUpdate {
            leveled_up,
            new_record,
        }
    }

    /// Record a failed cast, extending the dry streak.
    pub fn record_miss(&mut self) {
        self.dry_streak += 1;
        if self.dry_streak > self.longest_dry_streak {
            self.longest_dry_streak = self.dry_streak;
        }
    }

    /// Whether the given rod is available to equip without purchase.
    pub fn owns(&self, rod: &str, starter_rod: &str) -> bool {
        rod == starter_rod || self.owned_rods.contains(rod)
    }

    /// Equip a rod, replacing whichever one was equipped. Ownership is the
    /// caller's concern; this is the bare swap.
    pub fn equip(&mut self, rod: &str, starter_rod: &str) {
        if rod == starter_rod {
            self.equipped_rod = None;
        } else {
            self.equipped_rod = Some(rod.to_string());
        }
    }

    /// Name of the rod currently in use.
    pub fn equipped<'a>(&'a self, starter_rod: &'a str) -> &'a str {
        self.equipped_rod.as_deref().unwrap_or(starter_rod)
    }

    /// Spend one bait. Returns `false` (no mutation) when none is left.
    pub fn consume_bait(&mut self) -> bool {
        if self.bait_count == 0 {
            return false;
        }
        self.bait_count -= 1;
        true
    }
}
