//! Game-balance configuration.
//!
//! All tunables live here so the core stays free of magic numbers. Configs
//! deserialize from YAML and are validated once at load; the defaults
//! reproduce the reference deployment.

use serde::Deserialize;
use thiserror::Error as ThisError;

use crate::catalog::{CatalogError, FishingCatalog};
use crate::constants;

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("slots need at least two symbols (got {0})")]
    TooFewSymbols(usize),
    #[error("slots payout multiplier must be positive")]
    ZeroPayoutMultiplier,
    #[error("dealer stand total {0} out of range (2..=21)")]
    BadStandTotal(u8),
    #[error("base catch chance {0} out of range (0, 1]")]
    BadCatchChance(f64),
    #[error("level modifier {0} must be finite and non-negative")]
    BadLevelModifier(f64),
    #[error("experience per level must be positive")]
    ZeroExperiencePerLevel,
    #[error("experience per catch must be in 1..=experience_per_level (got {per_catch} vs {per_level})")]
    BadExperiencePerCatch { per_catch: u32, per_level: u32 },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SlotsConfig {
    pub symbols: Vec<String>,
    pub payout_multiplier: u64,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self {
            symbols: constants::SLOT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            payout_multiplier: constants::SLOT_PAYOUT_MULTIPLIER,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BlackjackConfig {
    /// Dealer draws while below this total.
    pub dealer_stand_total: u8,
}

impl Default for BlackjackConfig {
    fn default() -> Self {
        Self {
            dealer_stand_total: constants::DEALER_STAND_TOTAL,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FishingConfig {
    pub base_catch_chance: f64,
    pub level_modifier: f64,
    pub experience_per_level: u32,
    pub experience_per_catch: u32,
    pub catalog: FishingCatalog,
}

impl Default for FishingConfig {
    fn default() -> Self {
        Self {
            base_catch_chance: constants::BASE_CATCH_CHANCE,
            level_modifier: constants::LEVEL_MODIFIER,
            experience_per_level: constants::EXPERIENCE_PER_LEVEL,
            experience_per_catch: constants::EXPERIENCE_PER_CATCH,
            catalog: FishingCatalog::default(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GamesConfig {
    pub slots: SlotsConfig,
    pub blackjack: BlackjackConfig,
    pub fishing: FishingConfig,
}

impl GamesConfig {
    /// Parse and validate a YAML config. Missing sections fall back to the
    /// reference defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slots.symbols.len() < 2 {
            return Err(ConfigError::TooFewSymbols(self.slots.symbols.len()));
        }
        if self.slots.payout_multiplier == 0 {
            return Err(ConfigError::ZeroPayoutMultiplier);
        }
        if !(2..=21).contains(&self.blackjack.dealer_stand_total) {
            return Err(ConfigError::BadStandTotal(self.blackjack.dealer_stand_total));
        }

        let fishing = &self.fishing;
        if !(fishing.base_catch_chance > 0.0 && fishing.base_catch_chance <= 1.0) {
            return Err(ConfigError::BadCatchChance(fishing.base_catch_chance));
        }
        if !(fishing.level_modifier >= 0.0 && fishing.level_modifier.is_finite()) {
            return Err(ConfigError::BadLevelModifier(fishing.level_modifier));
        }
        if fishing.experience_per_level == 0 {
            return Err(ConfigError::ZeroExperiencePerLevel);
        }
        // Caps per-catch gain at one level so the tracker never has to
        // carry experience across multiple level-ups in a single cast.
        if fishing.experience_per_catch == 0
            || fishing.experience_per_catch > fishing.experience_per_level
        {
            return Err(ConfigError::BadExperiencePerCatch {
                per_catch: fishing.experience_per_catch,
                per_level: fishing.experience_per_level,
            });
        }
        fishing.catalog.validate()?;
        Ok(())
    }
}
