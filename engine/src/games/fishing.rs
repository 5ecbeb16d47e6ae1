//! Fishing cast resolution.
//!
//! A cast is a single uniform draw against the computed catch chance
//! (bait short-circuits it to a guaranteed success). Successful casts pick
//! a rarity tier by relative weight, then a species uniformly within the
//! tier. Streak/level bookkeeping lives on the profile; crediting the
//! catch value is the command layer's job, and it happens exactly once per
//! catch.

use cookiebot_types::{FishSpecies, FishingConfig, Rarity};

use super::{GameError, GameRng};

/// What came out of the water.
#[derive(Clone, Debug, PartialEq)]
pub enum CastOutcome {
    Caught { species: FishSpecies, rarity: Rarity },
    Missed,
}

/// Catch probability for a cast:
/// `base * (1 + level * level_modifier) * (1 + rod_modifier)`, clamped
/// to 1. The starter rod carries a zero modifier, so "no rod bonus" and
/// "starter rod equipped" compute the same chance.
pub fn catch_chance(config: &FishingConfig, level: u32, rod_modifier: f64) -> f64 {
    let chance = config.base_catch_chance
        * (1.0 + level as f64 * config.level_modifier)
        * (1.0 + rod_modifier);
    chance.min(1.0)
}

/// Resolve one cast. `with_bait` forces the catch regardless of the draw.
pub fn cast(
    config: &FishingConfig,
    level: u32,
    rod_modifier: f64,
    with_bait: bool,
    rng: &mut GameRng,
) -> Result<CastOutcome, GameError> {
    let hooked = with_bait || rng.chance(catch_chance(config, level, rod_modifier));
    if !hooked {
        return Ok(CastOutcome::Missed);
    }

    let catalog = &config.catalog;
    let tier = rng.weighted(&catalog.rarity_weights())?;
    let rarity = &catalog.rarities[tier];
    let species_pool = catalog.species_in(&rarity.name);
    let species = rng.pick(&species_pool)?;

    Ok(CastOutcome::Caught {
        species: (*species).clone(),
        rarity: rarity.clone(),
    })
}
