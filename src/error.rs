//! Error types shared across modules.
//!
//! Validation and eligibility failures live next to the code that produces
//! them (`effects::TargetError`, `rules::Ineligible`). This module holds the
//! errors of the catalog and the turn store, which wrap those.
//!
//! Scoring has no error type: a turn always produces a score.

use crate::cards::BabeType;
use crate::core::{BabeId, EffectId, PlayId};
use crate::effects::TargetError;
use crate::rules::Ineligible;

/// Catalog construction failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("babe {0} is already registered")]
    DuplicateBabe(BabeId),

    #[error("effect {0} is already registered")]
    DuplicateEffect(EffectId),
}

/// A play action the turn store refused.
///
/// Every variant is recoverable: the caller blocks the action and shows the
/// message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error("babe limit reached ({limit})")]
    BabeLimitReached { limit: u32 },

    #[error("only {allowed} babes can be played this turn")]
    BabeTypeRestricted { allowed: BabeType },

    #[error("effect limit reached ({limit})")]
    EffectLimitReached { limit: u32 },

    #[error("{0}")]
    Ineligible(#[from] Ineligible),

    #[error("invalid target: {0}")]
    Target(#[from] TargetError),

    #[error("nothing in play with {0}")]
    UnknownPlay(PlayId),

    #[error("{0} is not in the deck")]
    NotInDeck(BabeId),

    #[error("{0} is already in the play area")]
    AlreadyInPlay(PlayId),
}

impl PlayError {
    /// Human-readable reason.
    #[must_use]
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

/// Failure encoding or decoding a store snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("snapshot encoding failed: {0}")]
    Encode(#[source] bincode::Error),

    #[error("snapshot decoding failed: {0}")]
    Decode(#[source] bincode::Error),
}
