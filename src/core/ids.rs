//! Identifier types.
//!
//! Three kinds of identity exist in a turn:
//! - `BabeId`: catalog identity of a Babe card
//! - `EffectId`: catalog identity of an Effect script
//! - `PlayId`: identity of one *play* of a card this turn
//!
//! The same catalog Babe can be played, discarded and replayed across
//! turns, so anything that needs to tell two plays apart uses `PlayId`.
//!
//! ```
//! use babes_engine::core::{BabeId, PlayId};
//!
//! let card = BabeId::new(7);
//! let play = PlayId::new(1);
//!
//! assert_eq!(card.raw(), 7);
//! assert_eq!(format!("{}", play), "Play(1)");
//! ```

use serde::{Deserialize, Serialize};

/// Catalog identifier for a Babe card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BabeId(pub u32);

impl BabeId {
    /// Create a new Babe ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for BabeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Babe({})", self.0)
    }
}

impl From<u32> for BabeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Catalog identifier for an Effect script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EffectId(pub u32);

impl EffectId {
    /// Create a new Effect ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Effect({})", self.0)
    }
}

/// Identity of a single play within a turn.
///
/// Allocated by whoever owns the turn state. Unique among played Babes
/// and among bound Effects of the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayId(pub u32);

impl PlayId {
    /// Create a new play ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for PlayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Play({})", self.0)
    }
}
