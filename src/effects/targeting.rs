//! Effect targeting.
//!
//! - `TargetDecl`: What an effect may target, and where
//! - `TargetKind`: How many targets it takes
//! - `TargetError`: Why a caller-supplied selection was rejected
//!
//! The engine never picks targets. Callers select IDs; `validate` checks the
//! selection against the declaration and the current zones, and
//! `has_enough_targets` tells whether a legal selection can exist at all.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{BabeCard, BabeType};
use crate::core::{BabeId, TurnState, Zone};

/// Number of targets an effect takes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
    #[default]
    None,
    OneBabe,
    ManyBabes { min: usize, max: usize },
}

/// Target declaration of an effect script.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDecl {
    #[serde(default)]
    pub kind: TargetKind,

    /// Every target must have this type.
    #[serde(default)]
    pub of_type: Option<BabeType>,

    /// Selected targets must all have different types.
    #[serde(default)]
    pub distinct_types: bool,

    /// Zone targets are chosen from.
    #[serde(default)]
    pub zone: Zone,
}

/// Rejection of a target selection.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("this effect takes no targets, got {got}")]
    NoTargetsExpected { got: usize },

    #[error("choose exactly one babe, got {got}")]
    ExactlyOne { got: usize },

    #[error("choose between {min} and {max} babes, got {got}")]
    OutOfRange { min: usize, max: usize, got: usize },

    #[error("{id} is not in the {zone}")]
    NotInZone { id: BabeId, zone: Zone },

    #[error("{name} is not a {expected} babe")]
    WrongType { name: String, expected: BabeType },

    #[error("{id} was selected more than once")]
    Duplicate { id: BabeId },

    #[error("selected babes must all have different types")]
    TypesNotDistinct,
}

impl TargetDecl {
    /// No targets.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Exactly one Babe in play.
    #[must_use]
    pub fn one_babe() -> Self {
        Self {
            kind: TargetKind::OneBabe,
            ..Self::default()
        }
    }

    /// Between `min` and `max` Babes in play.
    #[must_use]
    pub fn many_babes(min: usize, max: usize) -> Self {
        Self {
            kind: TargetKind::ManyBabes { min, max },
            ..Self::default()
        }
    }

    /// Restrict targets to a type (builder pattern).
    #[must_use]
    pub fn of_type(mut self, babe_type: BabeType) -> Self {
        self.of_type = Some(babe_type);
        self
    }

    /// Require pairwise distinct types (builder pattern).
    #[must_use]
    pub fn distinct_types(mut self) -> Self {
        self.distinct_types = true;
        self
    }

    /// Choose targets from another zone (builder pattern).
    #[must_use]
    pub fn in_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        self.kind == TargetKind::None
    }

    /// Minimum number of targets a legal selection needs.
    #[must_use]
    pub fn min_targets(&self) -> usize {
        match self.kind {
            TargetKind::None => 0,
            TargetKind::OneBabe => 1,
            TargetKind::ManyBabes { min, .. } => min,
        }
    }

    /// Cards in the declared zone that pass the type filter.
    #[must_use]
    pub fn candidates<'a>(&self, state: &'a TurnState) -> Vec<&'a BabeCard> {
        state
            .cards_in(self.zone)
            .into_iter()
            .filter(|card| self.of_type.map_or(true, |t| card.is_type(t)))
            .collect()
    }

    /// Check whether a legal selection can exist.
    ///
    /// The deck is not visible to the engine, so deck targets always pass
    /// and the caller decides.
    #[must_use]
    pub fn has_enough_targets(&self, state: &TurnState) -> bool {
        if self.is_none() || self.zone == Zone::Deck {
            return true;
        }

        let candidates = self.candidates(state);
        match self.kind {
            TargetKind::None => true,
            TargetKind::OneBabe => !candidates.is_empty(),
            TargetKind::ManyBabes { min, .. } if self.distinct_types => {
                let types: FxHashSet<BabeType> = candidates.iter().map(|c| c.babe_type).collect();
                types.len() >= min
            }
            TargetKind::ManyBabes { min, .. } => candidates.len() >= min,
        }
    }

    /// Validate a caller-supplied selection.
    pub fn validate(&self, state: &TurnState, selected: &[BabeId]) -> Result<(), TargetError> {
        let got = selected.len();
        match self.kind {
            TargetKind::None if got > 0 => return Err(TargetError::NoTargetsExpected { got }),
            TargetKind::None => return Ok(()),
            TargetKind::OneBabe if got != 1 => return Err(TargetError::ExactlyOne { got }),
            TargetKind::ManyBabes { min, max } if got < min || got > max => {
                return Err(TargetError::OutOfRange { min, max, got });
            }
            _ => {}
        }

        let mut seen = FxHashSet::default();
        let mut types = FxHashSet::default();
        for &id in selected {
            if !seen.insert(id) {
                return Err(TargetError::Duplicate { id });
            }

            let card = state
                .find_in_zone(self.zone, id)
                .ok_or(TargetError::NotInZone { id, zone: self.zone })?;

            if let Some(expected) = self.of_type {
                if !card.is_type(expected) {
                    return Err(TargetError::WrongType {
                        name: card.name.clone(),
                        expected,
                    });
                }
            }

            types.insert(card.babe_type);
        }

        if self.distinct_types && types.len() != selected.len() {
            return Err(TargetError::TypesNotDistinct);
        }

        Ok(())
    }
}
