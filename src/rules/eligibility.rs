//! Effect eligibility.
//!
//! Decides whether an effect can legally be played given the current turn.
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. Bespoke requirements (play history, exact discard base score)
//! 2. Generic requirements
//! 3. The effect's own `cap-effect-limit-to` against effects already played
//! 4. The effect's own type restriction against Babes already played
//! 5. A free Babe slot, if the effect consumes one
//! 6. Target availability
//!
//! Check 4 only stops a restricting effect from being played late; it never
//! removes Babes that are already down.

use crate::cards::BabeType;
use crate::core::{PlayId, TurnState};
use crate::effects::{BoundEffect, EffectScript, Requirement};

use super::limits::LimitResolver;

/// Reason an effect cannot be played.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Ineligible {
    #[error("{name} must be the only babe played")]
    NotOnlyBabe { name: String },

    #[error("{name} must be in the discard pile")]
    MissingFromDiscard { name: String },

    #[error("needs {need} {babe_type} babes in the discard pile, found {have}")]
    NotEnoughOfType { babe_type: BabeType, need: usize, have: usize },

    #[error("a babe named {prefix}... must have been played this game")]
    NeverPlayed { prefix: String },

    #[error("needs a babe worth {score} in the discard pile")]
    NoBaseScoreInDiscard { score: i64 },

    #[error("only {cap} effects may be played with this effect")]
    EffectCapReached { cap: u32 },

    #[error("{name} is already in play and is not {allowed}")]
    WrongTypeInPlay { name: String, allowed: BabeType },

    #[error("no babe slot left ({limit})")]
    NoBabeSlot { limit: u32 },

    #[error("no valid targets")]
    NoTargets,
}

impl Ineligible {
    /// Human-readable reason.
    #[must_use]
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

impl Requirement {
    /// Requirements that stand in for per-card special cases.
    #[must_use]
    pub fn is_bespoke(&self) -> bool {
        matches!(
            self,
            Requirement::PlayedHistoryHasPrefix { .. } | Requirement::DiscardHasBaseScore { .. }
        )
    }

    /// Evaluate against the current turn.
    pub fn check(&self, state: &TurnState) -> Result<(), Ineligible> {
        match self {
            Requirement::OnlyBabePlayed { name } => {
                match state.played_babes.as_slice() {
                    [only] if only.card.name == *name => Ok(()),
                    _ => Err(Ineligible::NotOnlyBabe { name: name.clone() }),
                }
            }
            Requirement::DiscardHasBabe { name } => {
                if state.discard.iter().any(|c| c.name == *name) {
                    Ok(())
                } else {
                    Err(Ineligible::MissingFromDiscard { name: name.clone() })
                }
            }
            Requirement::DiscardHasTypeAtLeast { babe_type, count } => {
                let have = state.discard_count_of_type(*babe_type);
                if have >= *count {
                    Ok(())
                } else {
                    Err(Ineligible::NotEnoughOfType {
                        babe_type: *babe_type,
                        need: *count,
                        have,
                    })
                }
            }
            Requirement::PlayedHistoryHasPrefix { prefix } => {
                if state.play_history.iter().any(|n| n.starts_with(prefix.as_str())) {
                    Ok(())
                } else {
                    Err(Ineligible::NeverPlayed { prefix: prefix.clone() })
                }
            }
            Requirement::DiscardHasBaseScore { score } => {
                if state.discard.iter().any(|c| c.base_score == *score) {
                    Ok(())
                } else {
                    Err(Ineligible::NoBaseScoreInDiscard { score: *score })
                }
            }
        }
    }
}

/// Gates effect plays.
#[derive(Clone, Copy, Debug, Default)]
pub struct EligibilityChecker {
    limits: LimitResolver,
}

impl EligibilityChecker {
    #[must_use]
    pub fn new(limits: LimitResolver) -> Self {
        Self { limits }
    }

    /// Check a candidate effect that is not yet in play.
    pub fn check(&self, script: &EffectScript, state: &TurnState) -> Result<(), Ineligible> {
        self.check_excluding(script, state, None)
    }

    /// Re-check an effect that is already bound, as if it were played now.
    pub fn recheck(&self, bound: &BoundEffect, state: &TurnState) -> Result<(), Ineligible> {
        self.check_excluding(&bound.script, state, Some(bound.play_id))
    }

    fn check_excluding(
        &self,
        script: &EffectScript,
        state: &TurnState,
        exclude: Option<PlayId>,
    ) -> Result<(), Ineligible> {
        let others: Vec<&BoundEffect> = state
            .played_effects
            .iter()
            .filter(|e| Some(e.play_id) != exclude)
            .collect();

        let bespoke = script.requires.iter().filter(|r| r.is_bespoke());
        let generic = script.requires.iter().filter(|r| !r.is_bespoke());
        for requirement in bespoke.chain(generic) {
            requirement.check(state)?;
        }

        if let Some(cap) = script.effect_cap() {
            if others.len() as u32 >= cap {
                return Err(Ineligible::EffectCapReached { cap });
            }
        }

        if let Some(allowed) = script.babe_type_restriction() {
            if let Some(wrong) = state.played_babes.iter().find(|b| b.babe_type() != allowed) {
                return Err(Ineligible::WrongTypeInPlay {
                    name: wrong.card.name.clone(),
                    allowed,
                });
            }
        }

        if script.consumes_babe_slot() {
            let limits = self
                .limits
                .resolve(others.iter().map(|e| &e.script), state.pending.as_ref());
            let mut used = limits.slot_usage(&state.played_babes, &state.played_effects).general;
            if exclude.is_some_and(|id| state.played_effect(id).is_some()) {
                used = used.saturating_sub(1);
            }
            if !limits.ignore_babe_limit && used >= limits.babes {
                return Err(Ineligible::NoBabeSlot { limit: limits.babes });
            }
        }

        if !script.target.has_enough_targets(state) {
            return Err(Ineligible::NoTargets);
        }

        Ok(())
    }
}
