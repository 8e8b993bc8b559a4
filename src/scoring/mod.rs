//! Turn scoring.
//!
//! `Engine` is the one entry point callers need: it recomputes the score
//! breakdown, limits, carry-over and resolution log of a turn from scratch,
//! and answers eligibility and target-validation questions.
//!
//! ```
//! use babes_engine::cards::{BabeCard, BabeType, PlayedBabe};
//! use babes_engine::core::{BabeId, EffectId, PlayId, TurnState};
//! use babes_engine::effects::{BoundEffect, EffectScript, ScoreOp};
//! use babes_engine::scoring::Engine;
//!
//! let state = TurnState::new()
//!     .with_babe(PlayedBabe::new(
//!         PlayId::new(0),
//!         BabeCard::new(BabeId::new(1), "Roxy", BabeType::Baddie, 10),
//!     ))
//!     .with_effect(BoundEffect::untargeted(
//!         PlayId::new(1),
//!         EffectScript::new(EffectId::new(1), "Bonus").with_op(ScoreOp::final_add(5.0)),
//!     ));
//!
//! let report = Engine::default().evaluate(&state);
//! assert_eq!(report.final_score(), 15);
//! ```

mod breakdown;
pub mod carry_over;
pub mod engine;

pub use breakdown::{BabeScore, ScoreBreakdown};
pub use carry_over::{collect, PendingNext};
pub use engine::{compute, RunningState};

use serde::{Deserialize, Serialize};

use crate::core::{BabeId, RulesConfig, TurnState};
use crate::effects::{EffectScript, TargetDecl, TargetError};
use crate::rules::{EligibilityChecker, Ineligible, LimitResolver, Limits};

/// Everything recomputed after a state change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub breakdown: ScoreBreakdown,
    pub limits: Limits,

    /// Carry-over the current effects would leave for next turn.
    pub pending_next: Option<PendingNext>,

    /// Resolution log, one line per step.
    pub log: Vec<String>,
}

impl TurnReport {
    /// Displayed score: `final_after`, never below zero.
    #[must_use]
    pub fn final_score(&self) -> i64 {
        self.breakdown.final_after.max(0)
    }
}

/// Facade over the limit resolver, eligibility checker, target validator
/// and score engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct Engine {
    resolver: LimitResolver,
    checker: EligibilityChecker,
}

impl Engine {
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        let resolver = LimitResolver::new(config);
        Self {
            resolver,
            checker: EligibilityChecker::new(resolver),
        }
    }

    #[must_use]
    pub fn resolver(&self) -> &LimitResolver {
        &self.resolver
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        self.resolver.config()
    }

    /// Recompute the whole turn.
    #[must_use]
    pub fn evaluate(&self, state: &TurnState) -> TurnReport {
        let (breakdown, log) = compute(state);
        TurnReport {
            breakdown,
            limits: self.limits(state),
            pending_next: collect(&state.played_effects),
            log,
        }
    }

    /// Limits in force for the turn.
    #[must_use]
    pub fn limits(&self, state: &TurnState) -> Limits {
        self.resolver.for_turn(state)
    }

    /// Eligibility of a candidate effect.
    pub fn check_effect(&self, script: &EffectScript, state: &TurnState) -> Result<(), Ineligible> {
        self.checker.check(script, state)
    }

    /// Validate a caller-supplied target selection.
    pub fn validate_targets(
        &self,
        target: &TargetDecl,
        state: &TurnState,
        selected: &[BabeId],
    ) -> Result<(), TargetError> {
        target.validate(state, selected)
    }
}
