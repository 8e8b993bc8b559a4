//! Score computation.
//!
//! Scoring is a left fold over the score ops of the bound effects, in play
//! order and then declaration order. Each op is one transition
//! `RunningState -> RunningState`:
//!
//! 1. Every played Babe starts at its base score, delta 0, multiplier 1
//! 2. Carry-over multipliers apply to matching Babes
//! 3. Effects apply in play order. After any `babe` op the running final is
//!    re-summed from the Babe totals, so later `final` ops see it
//! 4. Carry-over add, then carry-over multiplier
//! 5. The running final is rounded into `final_after`
//!
//! `final_before` is the Babe total sum after step 3. Flooring at zero is
//! left to `TurnReport::final_score`.

use tracing::{debug, warn};

use crate::cards::PlayedBabe;
use crate::core::{BabeId, TurnState};
use crate::effects::{BabeSelector, BoundEffect, OpKind, OpScope, ScoreOp};

use super::breakdown::{BabeScore, ScoreBreakdown};

/// Accumulator threaded through the fold.
#[derive(Clone, Debug, PartialEq)]
pub struct RunningState {
    pub babes: Vec<BabeScore>,
    pub running: f64,
    pub log: Vec<String>,
}

impl RunningState {
    /// Step 1: every Babe at its base score.
    #[must_use]
    pub fn start(played: &[PlayedBabe]) -> Self {
        let babes: Vec<BabeScore> = played.iter().map(BabeScore::from_played).collect();
        let mut log = Vec::with_capacity(babes.len() + 1);
        for babe in &babes {
            log.push(format!("{} starts at {}", babe.name, babe.base));
        }

        Self {
            running: babe_sum(&babes),
            babes,
            log,
        }
    }

    #[must_use]
    pub fn babe_sum(&self) -> f64 {
        babe_sum(&self.babes)
    }

    fn resum(mut self) -> Self {
        self.running = self.babe_sum();
        self
    }

    fn note(mut self, line: String) -> Self {
        self.log.push(line);
        self
    }

    /// Step 2: multipliers promised to replayed Babes.
    #[must_use]
    pub fn apply_carried_mults(mut self, state: &TurnState) -> Self {
        let Some(pending) = state.pending.as_ref() else {
            return self;
        };

        for babe in &mut self.babes {
            if let Some(mult) = pending.babe_mult(babe.card_id) {
                babe.mult *= mult;
                self.log.push(format!("{} carries x{} from last turn", babe.name, mult));
            }
        }
        self.resum()
    }

    /// Step 3: one score op of one effect.
    #[must_use]
    pub fn apply_op(self, state: &TurnState, effect: &BoundEffect, op: &ScoreOp) -> Self {
        match (op.scope, op.op) {
            (OpScope::Final, OpKind::Add) => self.final_add(effect, op.amount),
            (OpScope::Final, OpKind::Mult) => self.final_mult(effect, op.amount),
            (OpScope::Final, OpKind::AddTargetBase) => self.add_target_base(state, effect, op),
            (OpScope::FinalPerBabe, OpKind::Add) => self.final_per_babe(state, effect, op),
            (OpScope::Babe, OpKind::Add | OpKind::Mult) => self.babe_op(state, effect, op),
            _ => {
                warn!(effect = effect.name(), op = %op.tag(), "unhandled score op");
                self.note(format!("unhandled operation: {}", op.tag()))
            }
        }
    }

    fn final_add(mut self, effect: &BoundEffect, amount: f64) -> Self {
        self.running += amount;
        let line = format!("{}: final {:+} = {}", effect.name(), amount, self.running);
        self.note(line)
    }

    fn final_mult(mut self, effect: &BoundEffect, amount: f64) -> Self {
        self.running *= amount;
        let line = format!("{}: final x{} = {}", effect.name(), amount, self.running);
        self.note(line)
    }

    fn final_per_babe(mut self, state: &TurnState, effect: &BoundEffect, op: &ScoreOp) -> Self {
        if let Some(gate) = op.only_if_all_type {
            if !state.played_babes.iter().all(|b| b.card.is_type(gate)) {
                return self;
            }
        }

        let count = state
            .played_babes
            .iter()
            .filter(|b| op.of_type.map_or(true, |t| b.card.is_type(t)))
            .count();
        let added = op.amount * count as f64;
        self.running += added;

        let line = format!(
            "{}: {:+} for each of {} babes = {:+}",
            effect.name(),
            op.amount,
            count,
            added
        );
        self.note(line)
    }

    fn add_target_base(mut self, state: &TurnState, effect: &BoundEffect, op: &ScoreOp) -> Self {
        let mut base = 0i64;
        for &id in effect.targets() {
            match catalog_base(state, id) {
                Some(score) => base += score,
                None => {
                    warn!(effect = effect.name(), target = %id, "bound target not found");
                    self.log.push(format!("{}: {} not found, adds 0", effect.name(), id));
                }
            }
        }

        let only_effect = state.played_effects.len() == 1;
        let mult = match op.when_only_effect_multiplier {
            Some(escalated) if only_effect => escalated,
            _ => op.multiplier.unwrap_or(1.0),
        };
        let added = base as f64 * mult;
        self.running += added;

        let line = format!("{}: target base {} x{} = {:+}", effect.name(), base, mult, added);
        self.note(line)
    }

    fn babe_op(mut self, state: &TurnState, effect: &BoundEffect, op: &ScoreOp) -> Self {
        if op.applies_to == BabeSelector::Targets {
            for &id in effect.targets() {
                if !state.played_babes.iter().any(|b| b.card.id == id) {
                    warn!(effect = effect.name(), target = %id, "bound target not in play");
                    self.log.push(format!("{}: {} not found", effect.name(), id));
                }
            }
        }

        let selected = select_babes(state, effect, op);
        if selected.is_empty() {
            let line = format!("{}: no babes to {}", effect.name(), op.op.as_str());
            return self.note(line);
        }

        for index in selected {
            let babe = &mut self.babes[index];
            let line = match op.op {
                OpKind::Mult => {
                    babe.mult *= op.amount;
                    format!("{}: {} x{} = {}", effect.name(), babe.name, op.amount, babe.total())
                }
                _ => {
                    babe.delta += op.amount;
                    format!("{}: {} {:+} = {}", effect.name(), babe.name, op.amount, babe.total())
                }
            };
            self.log.push(line);
        }
        self.resum()
    }

    /// Step 4: last turn's carry-over, add before multiply.
    #[must_use]
    pub fn apply_carried_final(mut self, state: &TurnState) -> Self {
        let Some(pending) = state.pending.as_ref() else {
            return self;
        };

        if pending.add_next != 0.0 {
            self.running += pending.add_next;
            let line = format!("carry-over: final {:+} = {}", pending.add_next, self.running);
            self = self.note(line);
        }
        if pending.mult_next != 1.0 {
            self.running *= pending.mult_next;
            let line = format!("carry-over: final x{} = {}", pending.mult_next, self.running);
            self = self.note(line);
        }
        self
    }
}

fn babe_sum(babes: &[BabeScore]) -> f64 {
    babes.iter().map(|b| b.total() as f64).sum()
}

/// Catalog base score of a target, looked up in play first, then the
/// discard pile.
fn catalog_base(state: &TurnState, id: BabeId) -> Option<i64> {
    state
        .played_babes
        .iter()
        .map(|b| &b.card)
        .chain(state.discard.iter())
        .find(|c| c.id == id)
        .map(|c| c.base_score)
}

/// Indices into `played_babes` a `babe` op applies to.
fn select_babes(state: &TurnState, effect: &BoundEffect, op: &ScoreOp) -> Vec<usize> {
    let played = state.played_babes.iter().enumerate();
    match op.applies_to {
        BabeSelector::Targets => played
            .filter(|(_, b)| effect.targets().contains(&b.card.id))
            .map(|(i, _)| i)
            .collect(),
        BabeSelector::AllOfType => match op.of_type.or(effect.resolved_type()) {
            Some(babe_type) => played
                .filter(|(_, b)| b.card.is_type(babe_type))
                .map(|(i, _)| i)
                .collect(),
            None => Vec::new(),
        },
    }
}

/// Score a turn. Total: every input produces a breakdown.
#[must_use]
pub fn compute(state: &TurnState) -> (ScoreBreakdown, Vec<String>) {
    debug!(
        turn = state.turn_number,
        babes = state.played_babes.len(),
        effects = state.played_effects.len(),
        "computing score"
    );

    let folded = state
        .played_effects
        .iter()
        .flat_map(|effect| effect.script.score.iter().map(move |op| (effect, op)))
        .fold(
            RunningState::start(&state.played_babes).apply_carried_mults(state),
            |acc, (effect, op)| acc.apply_op(state, effect, op),
        );

    let final_before = folded.babe_sum().round() as i64;
    let mut finished = folded.apply_carried_final(state);
    let final_after = finished.running.round() as i64;
    finished.log.push(format!("final score: {}", final_after));

    let breakdown = ScoreBreakdown {
        babes: finished.babes,
        final_before,
        final_after,
    };
    (breakdown, finished.log)
}
