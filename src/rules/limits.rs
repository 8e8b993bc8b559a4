//! Per-turn play limits.
//!
//! `LimitResolver` folds every `LimitMod` of the effects in play into a
//! `Limits` record, starting from `RulesConfig`. It is recomputed from
//! scratch on every change, so taking an effect out of play un-applies its
//! modifiers without any bookkeeping.
//!
//! The fold runs in two passes so effect order never matters:
//! 1. Additive modifiers, flags, type restriction and typed extra slots
//! 2. `set-babe-limit-to` (max) and `cap-effect-limit-to` (min), applied to
//!    the additive result
//!
//! `Limits::check_babe` and `Limits::check_effect` are the only places that
//! do slot arithmetic.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{BabeType, PlayedBabe};
use crate::core::{RulesConfig, TurnState};
use crate::effects::{BoundEffect, EffectScript, LimitMod};
use crate::error::PlayError;
use crate::scoring::PendingNext;

/// Play limits in force for the turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// General Babe slots.
    pub babes: u32,

    /// Effects that may be played.
    pub effects: u32,

    pub ignore_effect_limit: bool,

    /// Lifted by last turn's carry-over.
    pub ignore_babe_limit: bool,

    /// Only this type may be played. Last restricting effect wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrict_babe_type_to: Option<BabeType>,

    /// Extra slots usable only by one type.
    #[serde(default, skip_serializing_if = "std::collections::HashMap::is_empty")]
    pub extra_babes_by_type: FxHashMap<BabeType, u32>,
}

/// Computes `Limits` from the effects in play.
#[derive(Clone, Copy, Debug, Default)]
pub struct LimitResolver {
    config: RulesConfig,
}

impl LimitResolver {
    /// Create a resolver with the given base limits.
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Fold the limit modifiers of `scripts`.
    #[must_use]
    pub fn resolve<'a>(
        &self,
        scripts: impl IntoIterator<Item = &'a EffectScript>,
        pending: Option<&PendingNext>,
    ) -> Limits {
        let mut limits = Limits {
            babes: self.config.base_babe_limit,
            effects: self.config.base_effect_limit,
            ignore_babe_limit: pending.is_some_and(|p| p.ignore_babe_limit_next),
            ..Limits::default()
        };

        let mut babe_floor: Option<u32> = None;
        let mut effect_cap: Option<u32> = None;

        for limit in scripts.into_iter().flat_map(|s| s.limits.iter()) {
            match *limit {
                LimitMod::IgnoreEffectLimit => limits.ignore_effect_limit = true,
                LimitMod::SetBabeLimitTo { n } => {
                    babe_floor = Some(babe_floor.map_or(n, |f| f.max(n)));
                }
                LimitMod::ExtraPlays { babes, effects } => {
                    limits.babes += babes;
                    limits.effects += effects;
                }
                LimitMod::CapEffectLimitTo { n } => {
                    effect_cap = Some(effect_cap.map_or(n, |c| c.min(n)));
                }
                LimitMod::RestrictBabeTypeTo { babe_type } => {
                    limits.restrict_babe_type_to = Some(babe_type);
                }
                LimitMod::ConsumesBabeSlot => {}
                LimitMod::ExtraTypePlays { babe_type, n } => {
                    *limits.extra_babes_by_type.entry(babe_type).or_insert(0) += n;
                }
            }
        }

        if let Some(floor) = babe_floor {
            limits.babes = limits.babes.max(floor);
        }
        if let Some(cap) = effect_cap {
            limits.effects = limits.effects.min(cap);
        }

        limits
    }

    /// Limits for a turn: every bound effect plus the carry-over.
    #[must_use]
    pub fn for_turn(&self, state: &TurnState) -> Limits {
        self.resolve(
            state.played_effects.iter().map(|e| &e.script),
            state.pending.as_ref(),
        )
    }
}

/// Slot usage of the Babes and slot-consuming Effects in play.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotUsage {
    /// General slots in use.
    pub general: u32,

    /// Typed extra slots in use.
    pub typed: FxHashMap<BabeType, u32>,
}

impl Limits {
    /// Work out which slots the current table occupies.
    ///
    /// Babes fill their typed extra slots first, then general slots.
    /// Slot-consuming effects take general slots. Free Babes take nothing.
    #[must_use]
    pub fn slot_usage(&self, babes: &[PlayedBabe], effects: &[BoundEffect]) -> SlotUsage {
        let mut usage = SlotUsage::default();

        for babe in babes.iter().filter(|b| !b.slot_free) {
            let typed_cap = self.extra_babes_by_type.get(&babe.babe_type()).copied().unwrap_or(0);
            let typed = usage.typed.entry(babe.babe_type()).or_insert(0);
            if *typed < typed_cap {
                *typed += 1;
            } else {
                usage.general += 1;
            }
        }

        usage.general += effects.iter().filter(|e| e.script.consumes_babe_slot()).count() as u32;
        usage
    }

    /// Check the type restriction alone.
    pub fn check_babe_type(&self, candidate: BabeType) -> Result<(), PlayError> {
        match self.restrict_babe_type_to {
            Some(allowed) if allowed != candidate => Err(PlayError::BabeTypeRestricted { allowed }),
            _ => Ok(()),
        }
    }

    /// Check whether a Babe of `candidate` type can take a slot.
    pub fn check_babe(&self, state: &TurnState, candidate: BabeType) -> Result<(), PlayError> {
        self.check_babe_type(candidate)?;

        if self.ignore_babe_limit {
            return Ok(());
        }

        let usage = self.slot_usage(&state.played_babes, &state.played_effects);
        let typed_cap = self.extra_babes_by_type.get(&candidate).copied().unwrap_or(0);
        let typed_used = usage.typed.get(&candidate).copied().unwrap_or(0);

        if typed_used < typed_cap || usage.general < self.babes {
            Ok(())
        } else {
            Err(PlayError::BabeLimitReached { limit: self.babes })
        }
    }

    /// Check whether one more effect can be played.
    pub fn check_effect(&self, state: &TurnState) -> Result<(), PlayError> {
        if self.ignore_effect_limit || (state.played_effects.len() as u32) < self.effects {
            Ok(())
        } else {
            Err(PlayError::EffectLimitReached { limit: self.effects })
        }
    }
}
