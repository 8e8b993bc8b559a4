//! Babe card definitions.
//!
//! `BabeCard` holds the immutable catalog data of a Babe: name, type and
//! base score. A Babe on the table this turn is a `PlayedBabe`, which pairs
//! the catalog card with the identity of that particular play.

use serde::{Deserialize, Serialize};

use crate::core::{BabeId, PlayId};

/// Categorical type tag of a Babe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BabeType {
    Baddie,
    Busty,
    Petite,
    Milf,
    Goth,
    Alt,
    Cosplay,
    Fitness,
}

impl BabeType {
    /// Every type tag, in catalog order.
    pub const ALL: [BabeType; 8] = [
        BabeType::Baddie,
        BabeType::Busty,
        BabeType::Petite,
        BabeType::Milf,
        BabeType::Goth,
        BabeType::Alt,
        BabeType::Cosplay,
        BabeType::Fitness,
    ];

    /// Upper-case tag as printed on the card.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BabeType::Baddie => "BADDIE",
            BabeType::Busty => "BUSTY",
            BabeType::Petite => "PETITE",
            BabeType::Milf => "MILF",
            BabeType::Goth => "GOTH",
            BabeType::Alt => "ALT",
            BabeType::Cosplay => "COSPLAY",
            BabeType::Fitness => "FITNESS",
        }
    }
}

impl std::fmt::Display for BabeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static Babe card.
///
/// ## Example
///
/// ```
/// use babes_engine::cards::{BabeCard, BabeType};
/// use babes_engine::core::BabeId;
///
/// let card = BabeCard::new(BabeId::new(1), "Roxy", BabeType::Baddie, 8);
/// assert_eq!(card.base_score, 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BabeCard {
    /// Catalog identity.
    pub id: BabeId,

    /// Display name.
    pub name: String,

    /// Type tag.
    #[serde(rename = "type")]
    pub babe_type: BabeType,

    /// Printed score before any effect.
    pub base_score: i64,
}

impl BabeCard {
    /// Create a new Babe card.
    #[must_use]
    pub fn new(id: BabeId, name: impl Into<String>, babe_type: BabeType, base_score: i64) -> Self {
        Self {
            id,
            name: name.into(),
            babe_type,
            base_score,
        }
    }

    /// Check the type tag.
    #[must_use]
    pub fn is_type(&self, babe_type: BabeType) -> bool {
        self.babe_type == babe_type
    }
}

/// A Babe played this turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedBabe {
    /// Identity of this play.
    pub play_id: PlayId,

    /// The catalog card.
    pub card: BabeCard,

    /// Entered without using a Babe slot (free replay, or moved into play
    /// by an effect).
    #[serde(default)]
    pub slot_free: bool,
}

impl PlayedBabe {
    /// Create a played Babe that occupies a slot.
    #[must_use]
    pub fn new(play_id: PlayId, card: BabeCard) -> Self {
        Self {
            play_id,
            card,
            slot_free: false,
        }
    }

    /// Create a played Babe that does not count against the Babe limit.
    #[must_use]
    pub fn free(play_id: PlayId, card: BabeCard) -> Self {
        Self {
            play_id,
            card,
            slot_free: true,
        }
    }

    /// Catalog ID of the card.
    #[must_use]
    pub fn card_id(&self) -> BabeId {
        self.card.id
    }

    /// Type tag of the card.
    #[must_use]
    pub fn babe_type(&self) -> BabeType {
        self.card.babe_type
    }
}
