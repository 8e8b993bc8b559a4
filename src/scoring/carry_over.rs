//! Carry-over between turns.
//!
//! At end of turn the `future` clauses of every bound effect fold into one
//! `PendingNext`. A fold that leaves every field at its identity yields
//! `None`, so "nothing pending" is never a zeroed struct.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::BabeId;
use crate::effects::BoundEffect;

fn one() -> f64 {
    1.0
}

/// Payload handed from one turn to the next.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingNext {
    /// Flat bonus added to next turn's final score.
    #[serde(default)]
    pub add_next: f64,

    /// Multiplier on next turn's final score, applied after `add_next`.
    #[serde(default = "one")]
    pub mult_next: f64,

    /// Babes that may be played next turn without using a slot.
    #[serde(default)]
    pub replay_babes: Vec<BabeId>,

    /// Multiplier promised to specific Babes if they are played next turn.
    #[serde(default)]
    pub babe_mult_next: FxHashMap<BabeId, f64>,

    #[serde(default)]
    pub ignore_babe_limit_next: bool,
}

impl Default for PendingNext {
    fn default() -> Self {
        Self {
            add_next: 0.0,
            mult_next: 1.0,
            replay_babes: Vec::new(),
            babe_mult_next: FxHashMap::default(),
            ignore_babe_limit_next: false,
        }
    }
}

impl PendingNext {
    /// True if applying this payload would change nothing.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.add_next == 0.0
            && self.mult_next == 1.0
            && self.replay_babes.is_empty()
            && self.babe_mult_next.is_empty()
            && !self.ignore_babe_limit_next
    }

    /// Check whether a Babe may be replayed for free.
    #[must_use]
    pub fn is_replayable(&self, id: BabeId) -> bool {
        self.replay_babes.contains(&id)
    }

    /// Multiplier promised to a Babe, if any.
    #[must_use]
    pub fn babe_mult(&self, id: BabeId) -> Option<f64> {
        self.babe_mult_next.get(&id).copied()
    }
}

/// Fold the deferred clauses of the effects in play.
#[must_use]
pub fn collect(effects: &[BoundEffect]) -> Option<PendingNext> {
    let mut pending = PendingNext::default();

    for effect in effects {
        let Some(future) = effect.script.future.as_ref() else {
            continue;
        };

        pending.add_next += future.next_add;
        pending.mult_next *= future.next_mult;
        pending.ignore_babe_limit_next |= future.ignore_babe_limit_next;

        if future.replay_targets {
            for &id in effect.targets() {
                if !pending.replay_babes.contains(&id) {
                    pending.replay_babes.push(id);
                }
            }
        }

        if let Some(mult) = future.targets_next_turn_mult {
            for &id in effect.targets() {
                *pending.babe_mult_next.entry(id).or_insert(1.0) *= mult;
            }
        }
    }

    (!pending.is_identity()).then_some(pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EffectId, PlayId};
    use crate::effects::{EffectScript, FutureClause, TargetBinding};

    fn future_effect(play: u32, future: FutureClause, targets: &[u32]) -> BoundEffect {
        let script = EffectScript::new(EffectId::new(play), "Later").with_future(future);
        BoundEffect::new(
            PlayId::new(play),
            script,
            TargetBinding::targets(targets.iter().map(|&t| BabeId::new(t))),
        )
    }

    #[test]
    fn test_nothing_pending() {
        assert_eq!(collect(&[]), None);

        let plain =
            BoundEffect::untargeted(PlayId::new(0), EffectScript::new(EffectId::new(1), "Plain"));
        assert_eq!(collect(&[plain]), None);

        // A clause made only of identities is still nothing
        let idle = future_effect(1, FutureClause::default(), &[]);
        assert_eq!(collect(&[idle]), None);
    }

    #[test]
    fn test_add_and_mult_accumulate() {
        let a = future_effect(0, FutureClause { next_add: 30.0, ..FutureClause::default() }, &[]);
        let both = FutureClause { next_add: 5.0, next_mult: 2.0, ..FutureClause::default() };
        let b = future_effect(1, both, &[]);
        let c = future_effect(2, FutureClause { next_mult: 1.5, ..FutureClause::default() }, &[]);

        let pending = collect(&[a, b, c]).unwrap();
        assert_eq!(pending.add_next, 35.0);
        assert_eq!(pending.mult_next, 3.0);
        assert!(pending.replay_babes.is_empty());
    }

    #[test]
    fn test_replay_needs_targets() {
        let replay = FutureClause { replay_targets: true, ..FutureClause::default() };
        assert_eq!(collect(&[future_effect(0, replay.clone(), &[])]), None);

        let pending = collect(&[
            future_effect(0, replay.clone(), &[4, 2]),
            future_effect(1, replay, &[2]),
        ])
        .unwrap();
        assert_eq!(pending.replay_babes, vec![BabeId::new(4), BabeId::new(2)]);
        assert!(pending.is_replayable(BabeId::new(2)));
        assert!(!pending.is_replayable(BabeId::new(3)));
    }

    #[test]
    fn test_per_babe_multipliers_compound() {
        let twice = FutureClause { targets_next_turn_mult: Some(2.0), ..FutureClause::default() };
        let thrice = FutureClause { targets_next_turn_mult: Some(3.0), ..FutureClause::default() };
        let effects = [future_effect(0, twice, &[7]), future_effect(1, thrice, &[7, 8])];
        let pending = collect(&effects).unwrap();

        assert_eq!(pending.babe_mult(BabeId::new(7)), Some(6.0));
        assert_eq!(pending.babe_mult(BabeId::new(8)), Some(3.0));
        assert_eq!(pending.babe_mult(BabeId::new(9)), None);
    }

    #[test]
    fn test_ignore_babe_limit_flag() {
        let clause = FutureClause { ignore_babe_limit_next: true, ..FutureClause::default() };
        let pending = collect(&[future_effect(0, clause, &[])]).unwrap();
        assert!(pending.ignore_babe_limit_next);
        assert_eq!(pending.add_next, 0.0);
        assert_eq!(pending.mult_next, 1.0);
    }
}
