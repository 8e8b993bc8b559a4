//! Card catalog.
//!
//! The `Catalog` stores every Babe card and Effect script for a game. It is
//! filled once at startup by whatever imports the card data and is read-only
//! afterwards.

use rustc_hash::FxHashMap;

use super::definition::{BabeCard, BabeType};
use crate::core::{BabeId, EffectId};
use crate::effects::EffectScript;
use crate::error::CatalogError;

/// Registry of Babe cards and Effect scripts.
///
/// ## Example
///
/// ```
/// use babes_engine::cards::{BabeCard, BabeType, Catalog};
/// use babes_engine::core::BabeId;
///
/// let mut catalog = Catalog::new();
/// catalog.register_babe(BabeCard::new(BabeId::new(1), "Roxy", BabeType::Baddie, 8)).unwrap();
///
/// let found = catalog.babe(BabeId::new(1)).unwrap();
/// assert_eq!(found.name, "Roxy");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    babes: FxHashMap<BabeId, BabeCard>,
    effects: FxHashMap<EffectId, EffectScript>,
}

impl Catalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from card lists.
    pub fn from_cards(
        babes: impl IntoIterator<Item = BabeCard>,
        effects: impl IntoIterator<Item = EffectScript>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for babe in babes {
            catalog.register_babe(babe)?;
        }
        for effect in effects {
            catalog.register_effect(effect)?;
        }
        Ok(catalog)
    }

    /// Register a Babe card.
    pub fn register_babe(&mut self, card: BabeCard) -> Result<(), CatalogError> {
        if self.babes.contains_key(&card.id) {
            return Err(CatalogError::DuplicateBabe(card.id));
        }
        self.babes.insert(card.id, card);
        Ok(())
    }

    /// Register an Effect script.
    pub fn register_effect(&mut self, script: EffectScript) -> Result<(), CatalogError> {
        if self.effects.contains_key(&script.id) {
            return Err(CatalogError::DuplicateEffect(script.id));
        }
        self.effects.insert(script.id, script);
        Ok(())
    }

    #[must_use]
    pub fn babe(&self, id: BabeId) -> Option<&BabeCard> {
        self.babes.get(&id)
    }

    #[must_use]
    pub fn effect(&self, id: EffectId) -> Option<&EffectScript> {
        self.effects.get(&id)
    }

    /// Find a Babe by display name.
    #[must_use]
    pub fn babe_named(&self, name: &str) -> Option<&BabeCard> {
        self.babes.values().find(|c| c.name == name)
    }

    /// Find Babes by type.
    pub fn babes_of_type(&self, babe_type: BabeType) -> impl Iterator<Item = &BabeCard> {
        self.babes.values().filter(move |c| c.is_type(babe_type))
    }

    pub fn babes(&self) -> impl Iterator<Item = &BabeCard> {
        self.babes.values()
    }

    pub fn effects(&self) -> impl Iterator<Item = &EffectScript> {
        self.effects.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.babes.len() + self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.babes.is_empty() && self.effects.is_empty()
    }
}
