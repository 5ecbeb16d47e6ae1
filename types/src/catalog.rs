//! Static fishing catalogs: rarity tiers, species, rods and bait.
//!
//! Catalogs are external configuration, loaded once and validated into
//! typed records. Nothing here is mutated at runtime; profiles reference
//! entries by name.

use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error as ThisError;

/// A weighted rarity class. `weight` is relative (weights across tiers need
/// not sum to 1); `price` is the cookie value credited per catch.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Rarity {
    pub name: String,
    pub weight: f64,
    pub price: u64,
}

/// A catchable species, assigned to a rarity tier by name.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FishSpecies {
    pub name: String,
    /// Weight in grams, accumulated into the profile's `total_weight`.
    pub weight: u64,
    pub rarity: String,
}

/// A purchasable rod. `modifier` scales the catch chance by `1 + modifier`
/// while equipped.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Rod {
    pub name: String,
    pub price: u64,
    pub modifier: f64,
}

/// A purchasable bait type. Using bait guarantees the next cast.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Bait {
    pub name: String,
    pub price: u64,
}

#[derive(Debug, ThisError, PartialEq)]
pub enum CatalogError {
    #[error("catalog has no rarity tiers")]
    NoRarities,
    #[error("catalog has no fish species")]
    NoSpecies,
    #[error("duplicate catalog entry: {0}")]
    DuplicateName(String),
    #[error("rarity {name} has non-positive weight {weight}")]
    BadWeight { name: String, weight: f64 },
    #[error("rarity {name} has zero price")]
    ZeroPrice { name: String },
    #[error("species {species} references unknown rarity {rarity}")]
    UnknownRarity { species: String, rarity: String },
    #[error("rarity {0} holds no species")]
    EmptyRarity(String),
    #[error("starter rod {0} is not in the rod catalog")]
    UnknownStarterRod(String),
}

/// The full fishing catalog.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FishingCatalog {
    pub rarities: Vec<Rarity>,
    pub species: Vec<FishSpecies>,
    pub rods: Vec<Rod>,
    pub baits: Vec<Bait>,
    /// Implicitly owned by every profile; equipped until another rod is.
    pub starter_rod: String,
}

impl FishingCatalog {
    pub fn rarity(&self, name: &str) -> Option<&Rarity> {
        self.rarities.iter().find(|r| r.name == name)
    }

    pub fn rod(&self, name: &str) -> Option<&Rod> {
        self.rods.iter().find(|r| r.name == name)
    }

    pub fn bait(&self, name: &str) -> Option<&Bait> {
        self.baits.iter().find(|b| b.name == name)
    }

    /// All species belonging to the given rarity tier.
    pub fn species_in(&self, rarity: &str) -> Vec<&FishSpecies> {
        self.species.iter().filter(|s| s.rarity == rarity).collect()
    }

    /// Relative selection weights, index-aligned with `rarities`.
    pub fn rarity_weights(&self) -> Vec<f64> {
        self.rarities.iter().map(|r| r.weight).collect()
    }

    /// Validate referential integrity once at load time.
    ///
    /// A catalog that passes here cannot produce a missing-name failure at
    /// cast time: every weighted tier pick lands on a tier with at least
    /// one species, and the starter rod always resolves.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.rarities.is_empty() {
            return Err(CatalogError::NoRarities);
        }
        if self.species.is_empty() {
            return Err(CatalogError::NoSpecies);
        }

        let mut seen = HashSet::new();
        for name in self
            .rarities
            .iter()
            .map(|r| &r.name)
            .chain(self.species.iter().map(|s| &s.name))
            .chain(self.rods.iter().map(|r| &r.name))
            .chain(self.baits.iter().map(|b| &b.name))
        {
            if !seen.insert(name.as_str()) {
                return Err(CatalogError::DuplicateName(name.clone()));
            }
        }

        for rarity in &self.rarities {
            if !(rarity.weight > 0.0 && rarity.weight.is_finite()) {
                return Err(CatalogError::BadWeight {
                    name: rarity.name.clone(),
                    weight: rarity.weight,
                });
            }
            if rarity.price == 0 {
                return Err(CatalogError::ZeroPrice {
                    name: rarity.name.clone(),
                });
            }
            if self.species_in(&rarity.name).is_empty() {
                return Err(CatalogError::EmptyRarity(rarity.name.clone()));
            }
        }

        for species in &self.species {
            if self.rarity(&species.rarity).is_none() {
                return Err(CatalogError::UnknownRarity {
                    species: species.name.clone(),
                    rarity: species.rarity.clone(),
                });
            }
        }

        if self.rod(&self.starter_rod).is_none() {
            return Err(CatalogError::UnknownStarterRod(self.starter_rod.clone()));
        }

        Ok(())
    }
}

impl Default for FishingCatalog {
    /// Reference catalog mirroring the shipped configuration.
    fn default() -> Self {
        let rarity = |name: &str, weight: f64, price: u64| Rarity {
            name: name.to_string(),
            weight,
            price,
        };
        let species = |name: &str, weight: u64, rarity: &str| FishSpecies {
            name: name.to_string(),
            weight,
            rarity: rarity.to_string(),
        };
        let rod = |name: &str, price: u64, modifier: f64| Rod {
            name: name.to_string(),
            price,
            modifier,
        };
        Self {
            rarities: vec![
                rarity("Common", 0.60, 10),
                rarity("Uncommon", 0.25, 25),
                rarity("Rare", 0.12, 60),
                rarity("Legendary", 0.03, 250),
            ],
            species: vec![
                species("Herring", 350, "Common"),
                species("Perch", 900, "Common"),
                species("Mackerel", 1_100, "Common"),
                species("Trout", 2_000, "Uncommon"),
                species("Carp", 4_500, "Uncommon"),
                species("Pike", 5_500, "Rare"),
                species("Sturgeon", 12_000, "Rare"),
                species("Golden Koi", 7_000, "Legendary"),
            ],
            rods: vec![
                rod("CastLite", 0, 0.0),
                rod("Graphite Pro", 500, 0.25),
                rod("Carbon Elite", 2_000, 0.50),
            ],
            baits: vec![Bait {
                name: "Worm".to_string(),
                price: crate::constants::BAIT_PRICE,
            }],
            starter_rod: "CastLite".to_string(),
        }
    }
}
