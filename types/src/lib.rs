//! Domain types for the cookiebot game core.
//!
//! Defines account/fishing state and the static game-balance configuration
//! consumed by the engine and the command dispatcher.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod economy;
pub mod fishing;

pub use catalog::{Bait, CatalogError, FishSpecies, FishingCatalog, Rarity, Rod};
pub use config::{BlackjackConfig, ConfigError, FishingConfig, GamesConfig, SlotsConfig};
pub use constants::*;
pub use economy::{Account, AccountKey};
pub use fishing::{CatchUpdate, FishingProfile};

/// Identifier of a player on the messaging platform.
pub type PlayerId = u64;

/// Identifier of a community (guild/server) on the messaging platform.
pub type CommunityId = u64;
